//! The two cached usage views

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use share_conf::ConfigStore;
use share_sys::NormalizedPath;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::parse::{parse_df, parse_du, parse_size};
use crate::probe::{CommandProbe, UsageProbe};
use crate::ttl::{CacheEntry, TtlCell};

/// Age after which a cached view is recomputed.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// One mounted filesystem as reported by df
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesystemUsage {
    pub filesystem: String,
    pub size: String,
    pub used: String,
    pub available: String,
    pub use_percent: f64,
    pub mounted_on: String,
    pub display_name: String,
    pub is_virtual: bool,
}

/// Disk consumption of one share.
///
/// `size` and `available` describe the filesystem holding the share,
/// `used` is the share directory's own size, and `use_percent` is that
/// directory's share of the whole filesystem.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareUsage {
    pub name: String,
    pub path: String,
    pub size: String,
    pub used: String,
    pub available: String,
    pub use_percent: f64,
}

/// Pull-based cache of filesystem and share usage.
///
/// There is no explicit invalidation: a share created or changed after the
/// last refresh shows up once the share view expires.
pub struct UsageCache {
    probe: Arc<dyn UsageProbe>,
    clock: Arc<dyn Clock>,
    filesystems: TtlCell<Vec<FilesystemUsage>>,
    shares: TtlCell<Vec<ShareUsage>>,
}

impl UsageCache {
    pub fn new(ttl: Duration, probe: Arc<dyn UsageProbe>, clock: Arc<dyn Clock>) -> Self {
        Self {
            probe,
            clock,
            filesystems: TtlCell::new(ttl),
            shares: TtlCell::new(ttl),
        }
    }

    /// Cache backed by `df`/`du` and the system clock.
    pub fn system(ttl: Duration, tool_timeout: Duration) -> Self {
        Self::new(
            ttl,
            Arc::new(CommandProbe::new(tool_timeout)),
            Arc::new(SystemClock),
        )
    }

    pub fn ttl(&self) -> Duration {
        self.filesystems.ttl()
    }

    /// Usage of every mounted filesystem.
    pub fn filesystems(&self) -> Result<CacheEntry<Vec<FilesystemUsage>>> {
        self.filesystems.get_or_refresh(self.clock.as_ref(), || -> Result<_> {
            tracing::debug!("Refreshing filesystem usage");
            let output = self.probe.disk_free()?;
            Ok(parse_df(&output))
        })
    }

    /// Usage of every share that has a path on a known mount.
    ///
    /// Shares without a path, without a matching mount, or whose directory
    /// cannot be measured are left out.
    pub fn shares(&self, store: &ConfigStore) -> Result<CacheEntry<Vec<ShareUsage>>> {
        self.shares.get_or_refresh(self.clock.as_ref(), || -> Result<_> {
            tracing::debug!("Refreshing share usage");
            let filesystems = self.filesystems()?.value;
            let doc = store.read()?;

            let usage = doc
                .shares()
                .filter_map(|(name, section)| {
                    let path = section.path()?;
                    self.measure_share(name, path, &filesystems)
                })
                .collect();
            Ok(usage)
        })
    }

    fn measure_share(&self, name: &str, path: &str, filesystems: &[FilesystemUsage]) -> Option<ShareUsage> {
        let Some(filesystem) = best_mount(path, filesystems) else {
            tracing::debug!(share = name, path, "No mount found for share path");
            return None;
        };

        let used = match self.probe.disk_usage(Path::new(path)) {
            Ok(output) => parse_du(&output),
            Err(e) => {
                tracing::warn!(share = name, path, error = %e, "Skipping share, size unavailable");
                return None;
            }
        };
        let Some(used) = used else {
            tracing::warn!(share = name, path, "Skipping share, unexpected du output");
            return None;
        };

        let total = parse_size(&filesystem.size);
        let use_percent = if total > 0 {
            parse_size(&used) as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Some(ShareUsage {
            name: name.to_string(),
            path: path.to_string(),
            size: filesystem.size.clone(),
            used,
            available: filesystem.available.clone(),
            use_percent,
        })
    }
}

impl std::fmt::Debug for UsageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageCache")
            .field("ttl", &self.ttl())
            .finish_non_exhaustive()
    }
}

/// The filesystem whose mount point is the longest component-wise prefix
/// of `path`. Among identical mount points the last listed wins, as it
/// shadows the earlier ones.
pub fn best_mount<'a>(path: &str, filesystems: &'a [FilesystemUsage]) -> Option<&'a FilesystemUsage> {
    let path = NormalizedPath::new(path);
    filesystems
        .iter()
        .map(|fs| (NormalizedPath::new(&fs.mounted_on), fs))
        .filter(|(mount, _)| mount.contains(&path))
        .max_by_key(|(mount, _)| mount.depth())
        .map(|(_, fs)| fs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_df;

    const DF: &str = "\
Filesystem      Size  Used Avail Use% Mounted on
/dev/sda1        98G   41G   52G  44% /
/dev/sdb1       1.8T  900G  850G  52% /data
/dev/sdc1       100G   10G   90G  10% /data/archive
";

    #[test]
    fn longest_prefix_wins() {
        let fs = parse_df(DF);
        assert_eq!(best_mount("/data/shared", &fs).unwrap().mounted_on, "/data");
        assert_eq!(best_mount("/data/archive/2024", &fs).unwrap().mounted_on, "/data/archive");
        assert_eq!(best_mount("/srv/docs", &fs).unwrap().mounted_on, "/");
    }

    #[test]
    fn prefix_match_respects_components() {
        let fs = parse_df(DF);
        assert_eq!(best_mount("/database", &fs).unwrap().mounted_on, "/");
    }

    #[test]
    fn relative_path_matches_nothing() {
        let fs = parse_df(DF);
        assert!(best_mount("srv/docs", &fs).is_none());
    }
}
