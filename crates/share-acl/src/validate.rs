//! Checking that a share only references existing local users

use share_conf::{Section, is_opaque_reference, keys, split_principal_list};

use crate::directory::PrincipalDirectory;
use crate::error::{Error, Result};

/// Reject a share whose access lists name unknown local users.
///
/// `valid users` is checked before `write list`; the first unknown name is
/// reported together with the list it came from. Entries starting with `@`,
/// `+` or `&` are group or special references and are not checked. The
/// directory is only consulted when there is something to check.
pub fn validate_users(share: &Section, directory: &dyn PrincipalDirectory) -> Result<()> {
    let candidates: Vec<(&str, &str)> = [keys::VALID_USERS, keys::WRITE_LIST]
        .into_iter()
        .filter_map(|list| share.get(list).map(|value| (list, value)))
        .flat_map(|(list, value)| split_principal_list(value).map(move |name| (list, name)))
        .filter(|(_, name)| !is_opaque_reference(name))
        .collect();

    if candidates.is_empty() {
        return Ok(());
    }

    let known = directory.principals()?;
    match candidates.into_iter().find(|(_, name)| !known.contains(*name)) {
        Some((list, name)) => Err(Error::UnknownPrincipal {
            principal: name.to_string(),
            list: list.to_string(),
        }),
        None => Ok(()),
    }
}
