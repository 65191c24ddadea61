//! Filesystem and subprocess plumbing for Share Manager
//!
//! Provides atomic whole-file replacement, absolute-path helpers, and
//! bounded execution of the external tools (setfacl, df, du, systemctl...)
//! the rest of the workspace shells out to.

pub mod command;
pub mod error;
pub mod io;
pub mod path;

pub use command::{ToolCommand, ToolOutput, DEFAULT_TOOL_TIMEOUT};
pub use error::{Error, Result};
pub use path::NormalizedPath;
