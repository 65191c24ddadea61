//! Parsing of df / du output and human-readable sizes

use crate::cache::FilesystemUsage;

/// Filesystem sources reported by df that are not backed by a disk.
const VIRTUAL_FILESYSTEMS: [&str; 4] = ["none", "udev", "tmpfs", "overlay"];

const DISPLAY_NAME_MAX: usize = 20;

pub fn is_virtual_filesystem(filesystem: &str) -> bool {
    VIRTUAL_FILESYSTEMS.contains(&filesystem)
}

/// Convert a size such as `4.2G`, `512K` or `1.5 TB` to bytes.
///
/// Units are binary multiples and case-insensitive; a bare number is
/// bytes. Empty or unparseable input yields 0.
pub fn parse_size(size: &str) -> u64 {
    let size = size.trim();
    if size.is_empty() {
        return 0;
    }

    let split = size
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(size.len());
    let (number, unit) = size.split_at(split);

    let Ok(number) = number.parse::<f64>() else {
        tracing::warn!(size, "Unparseable size, counting as 0");
        return 0;
    };
    let multiplier: u64 = match unit.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" => 1 << 10,
        "M" | "MB" => 1 << 20,
        "G" | "GB" => 1 << 30,
        "T" | "TB" => 1 << 40,
        "P" | "PB" => 1 << 50,
        _ => {
            tracing::warn!(size, "Unknown size unit, counting as 0");
            return 0;
        }
    };

    (number * multiplier as f64).round() as u64
}

/// Shorten long mount paths to `/first/…/last` for display.
pub fn display_name(mount: &str) -> String {
    if mount.len() <= DISPLAY_NAME_MAX {
        return mount.to_string();
    }
    let parts: Vec<&str> = mount.split('/').collect();
    match (parts.get(1), parts.last()) {
        (Some(first), Some(last)) if parts.len() > 3 => format!("/{}/…/{}", first, last),
        _ => mount.to_string(),
    }
}

/// Parse `df -h` output, skipping the header line and short lines.
///
/// A mount point containing spaces is kept whole.
pub fn parse_df(output: &str) -> Vec<FilesystemUsage> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 6 {
                return None;
            }
            let mounted_on = fields[5..].join(" ");
            Some(FilesystemUsage {
                filesystem: fields[0].to_string(),
                size: fields[1].to_string(),
                used: fields[2].to_string(),
                available: fields[3].to_string(),
                use_percent: fields[4].trim_end_matches('%').parse().unwrap_or(0.0),
                display_name: display_name(&mounted_on),
                is_virtual: is_virtual_filesystem(fields[0]),
                mounted_on,
            })
        })
        .collect()
}

/// The size column of `du -sh` output.
pub fn parse_du(output: &str) -> Option<String> {
    let mut fields = output.split_whitespace();
    let size = fields.next()?;
    fields.next()?;
    Some(size.to_string())
}
