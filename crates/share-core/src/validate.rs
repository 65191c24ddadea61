//! Checks applied before any change is made

use std::path::Path;

use share_conf::{Section, is_reserved_section, keys};

use crate::error::{Error, Result};

/// A section name that can be written back as a `[name]` header.
pub fn check_section_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Section name must not be empty"));
    }
    if name != name.trim() {
        return Err(Error::validation(format!(
            "Section name '{}' must not start or end with whitespace",
            name
        )));
    }
    if name.contains(['[', ']', '\n', '\r']) {
        return Err(Error::validation(format!(
            "Section name '{}' contains a forbidden character",
            name.escape_debug()
        )));
    }
    Ok(())
}

/// A share name: a valid section name that is not reserved.
pub fn check_share_name(name: &str) -> Result<()> {
    check_section_name(name)?;
    if is_reserved_section(name) {
        return Err(Error::validation(format!(
            "'{}' is a reserved section and cannot be managed as a share",
            name
        )));
    }
    Ok(())
}

/// Parameters that survive a write and read back unchanged.
pub fn check_params(section: &Section) -> Result<()> {
    for (key, value) in section.iter() {
        if key.trim().is_empty() || key != key.trim() {
            return Err(Error::validation(format!("Invalid parameter name '{}'", key)));
        }
        if key.contains(['=', '\n', '\r']) || key.starts_with(['#', ';', '[']) {
            return Err(Error::validation(format!(
                "Parameter name '{}' contains a forbidden character",
                key.escape_debug()
            )));
        }
        if value.contains(['\n', '\r']) {
            return Err(Error::validation(format!(
                "Value of '{}' must be a single line",
                key
            )));
        }
        if value != value.trim() {
            return Err(Error::validation(format!(
                "Value of '{}' must not start or end with whitespace",
                key
            )));
        }
    }
    Ok(())
}

/// Parse the `permissions` parameter as octal mode bits (`0775`, `755`).
pub fn parse_permissions(value: &str) -> Result<u32> {
    let digits = value.trim();
    let digits = digits.strip_prefix("0o").unwrap_or(digits);
    match u32::from_str_radix(digits, 8) {
        Ok(mode) if !digits.is_empty() && mode <= 0o7777 => Ok(mode),
        _ => Err(Error::validation(format!(
            "Invalid permissions '{}', expected an octal mode such as 0775",
            value
        ))),
    }
}

/// Everything about a share that can be checked without touching the host.
///
/// Returns the share path.
pub fn check_share(name: &str, share: &Section) -> Result<String> {
    check_share_name(name)?;
    check_params(share)?;

    let path = share
        .path()
        .ok_or_else(|| Error::validation(format!("Share '{}' has no path", name)))?;
    if !Path::new(path).is_absolute() {
        return Err(Error::validation(format!(
            "Path '{}' of share '{}' must be absolute",
            path, name
        )));
    }
    if let Some(permissions) = share.get(keys::PERMISSIONS) {
        parse_permissions(permissions)?;
    }
    Ok(path.to_string())
}
