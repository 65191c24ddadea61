//! External disk measurement

use std::path::Path;
use std::time::Duration;

use share_sys::{DEFAULT_TOOL_TIMEOUT, ToolCommand};

use crate::error::Result;

/// Source of raw disk usage output.
pub trait UsageProbe: Send + Sync {
    /// `df -h` style listing of every mounted filesystem.
    fn disk_free(&self) -> Result<String>;

    /// `du -sh` style summary for one directory.
    fn disk_usage(&self, path: &Path) -> Result<String>;
}

/// Runs `df` and `du`.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    timeout: Duration,
}

impl CommandProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for CommandProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_TIMEOUT)
    }
}

impl UsageProbe for CommandProbe {
    fn disk_free(&self) -> Result<String> {
        let output = ToolCommand::new("df").timeout(self.timeout).arg("-h").run()?;
        Ok(output.stdout)
    }

    fn disk_usage(&self, path: &Path) -> Result<String> {
        let output = ToolCommand::new("du")
            .timeout(self.timeout)
            .arg("-sh")
            .path_arg(path)
            .run()?;
        Ok(output.stdout)
    }
}
