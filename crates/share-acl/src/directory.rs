//! Sources of known local principal names

use std::collections::BTreeSet;
use std::time::Duration;

use share_sys::{DEFAULT_TOOL_TIMEOUT, ToolCommand};

use crate::error::{Error, Result};

/// A flat list of principal names that exist on the host.
pub trait PrincipalDirectory: Send + Sync {
    fn principals(&self) -> Result<BTreeSet<String>>;
}

/// Lists the service's user database with `pdbedit -L`.
#[derive(Debug, Clone)]
pub struct PdbeditDirectory {
    timeout: Duration,
}

impl PdbeditDirectory {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for PdbeditDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_TIMEOUT)
    }
}

impl PrincipalDirectory for PdbeditDirectory {
    fn principals(&self) -> Result<BTreeSet<String>> {
        let output = ToolCommand::new("pdbedit")
            .timeout(self.timeout)
            .arg("-L")
            .run()
            .map_err(Error::Directory)?;
        Ok(parse_pdbedit_list(&output.stdout))
    }
}

/// Extract user names from `pdbedit -L` output (`name:uid:full name`).
pub fn parse_pdbedit_list(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .filter(|line| line.contains(':'))
        .filter_map(|line| line.split(':').next())
        .map(str::trim)
        .filter(|name| !name.is_empty() && !name.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// A fixed set of names.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    names: BTreeSet<String>,
}

impl StaticDirectory {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl PrincipalDirectory for StaticDirectory {
    fn principals(&self) -> Result<BTreeSet<String>> {
        Ok(self.names.clone())
    }
}
