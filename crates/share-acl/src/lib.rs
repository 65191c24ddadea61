//! POSIX ACL handling for Share Manager.
//!
//! A share's `valid users` and `write list` parameters are translated into
//! an ordered sequence of primitive ACL operations ([`AclStep`]) and
//! executed against an [`AclBackend`]:
//!
//! 1. clear every extended entry on the share root
//! 2. cap the mask at `r-x`
//! 3. grant `r-x` to each `valid users` entry, then `rwx` to each
//!    `write list` entry (a principal in both lists ends up with `rwx`)
//! 4. set the default mask and the same grants as default entries,
//!    recursively, so new files inherit them
//!
//! [`SetfaclBackend`] shells out to `setfacl`/`getfacl`;
//! [`RecordingAclBackend`] records the calls and simulates the resulting
//! ACL so the ordering rules can be tested without touching a filesystem.

pub mod backend;
pub mod directory;
pub mod entry;
pub mod error;
pub mod inspect;
pub mod recording;
pub mod translator;
pub mod validate;

pub use backend::{AclBackend, SetfaclBackend};
pub use directory::{PdbeditDirectory, PrincipalDirectory, StaticDirectory};
pub use entry::{AccessEntry, AclScope, AclStep, Permission};
pub use error::{Error, Result};
pub use inspect::{AclEntryView, ShareAcl, parse_getfacl};
pub use recording::{AclCall, RecordingAclBackend};
pub use translator::AccessPolicyTranslator;
pub use validate::validate_users;
