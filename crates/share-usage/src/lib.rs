//! Disk usage views for Share Manager.
//!
//! Two views are cached, each behind its own [`TtlCell`]:
//!
//! - [`FilesystemUsage`]: one row per mounted filesystem, from `df -h`
//! - [`ShareUsage`]: one row per share with a `path`, from `du -sh`, set
//!   against the filesystem whose mount point is the longest prefix of the
//!   share path
//!
//! Values are recomputed on demand once older than the TTL. Concurrent
//! callers that find a stale value trigger exactly one recomputation.

pub mod cache;
pub mod clock;
pub mod error;
pub mod parse;
pub mod probe;
pub mod ttl;

pub use cache::{DEFAULT_TTL, FilesystemUsage, ShareUsage, UsageCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use parse::{display_name, is_virtual_filesystem, parse_df, parse_du, parse_size};
pub use probe::{CommandProbe, UsageProbe};
pub use ttl::{CacheEntry, TtlCell};
