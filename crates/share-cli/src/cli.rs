//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Share Manager - Administer file shares, their access lists and disk usage
#[derive(Parser, Debug)]
#[command(name = "shareadm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Share configuration file (overrides settings and SAMBA_CONF_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub conf: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List, inspect, provision and remove shares
    Shares {
        #[command(subcommand)]
        action: SharesAction,
    },

    /// Show filesystem and per-share disk usage
    Usage {
        #[command(subcommand)]
        action: UsageAction,
    },

    /// Read and edit configuration sections, including reserved ones
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Query or restart the file sharing service
    Service {
        #[command(subcommand)]
        action: ServiceAction,
    },
}

/// Share actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SharesAction {
    /// List all shares
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show one share's parameters
    Show {
        name: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Create or update a share and provision its directory and ACL
    ///
    /// Parameters are merged into the existing definition unless
    /// --replace is given.
    ///
    /// Examples:
    ///   shareadm shares set docs path=/srv/docs "write list=alice"
    ///   shareadm shares set docs "valid users=bob,@eng" --dry-run
    ///   shareadm shares set docs --unset "write list"
    Set {
        name: String,

        /// Parameters as key=value
        #[arg(value_parser = parse_param, value_name = "KEY=VALUE")]
        params: Vec<(String, String)>,

        /// Parameters to remove
        #[arg(long, value_name = "KEY")]
        unset: Vec<String>,

        /// Start from an empty definition instead of the current one
        #[arg(long)]
        replace: bool,

        /// Show the configuration change without applying anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove a share from the configuration
    ///
    /// The share directory and its ACL are left in place.
    Delete {
        name: String,

        /// Show the configuration change without applying it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the ACL currently set on a share's directory
    Acl {
        name: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Re-apply the ACL of every share from its access lists
    RefreshAcls,
}

/// Usage actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum UsageAction {
    /// Mounted filesystems
    Disks {
        /// Include virtual filesystems (tmpfs, overlay, ...)
        #[arg(short, long)]
        all: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Space used by each share
    Shares {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

/// Configuration actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show one section, all sections, or the raw file
    Show {
        /// Section to show (all sections when omitted)
        section: Option<String>,

        /// Print the configuration file verbatim
        #[arg(long, conflicts_with = "section")]
        raw: bool,

        /// Output as JSON for scripting
        #[arg(long, conflicts_with = "raw")]
        json: bool,
    },

    /// Set parameters of any section, then reload the service
    ///
    /// Examples:
    ///   shareadm config set global workgroup=HOME
    ///   shareadm config set global --unset "log file" --dry-run
    Set {
        section: String,

        /// Parameters as key=value
        #[arg(value_parser = parse_param, value_name = "KEY=VALUE")]
        params: Vec<(String, String)>,

        /// Parameters to remove
        #[arg(long, value_name = "KEY")]
        unset: Vec<String>,

        /// Start from an empty section instead of the current one
        #[arg(long)]
        replace: bool,

        /// Show the configuration change without applying it
        #[arg(long)]
        dry_run: bool,
    },

    /// Replace the whole configuration file, then refresh ACLs and reload
    Replace {
        /// File holding the new configuration
        file: PathBuf,

        /// Show the configuration change without applying it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Service actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ServiceAction {
    /// Show whether the service is running and since when
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Refresh every share's ACL, then reload the service
    Restart,
}

/// Parse a `key=value` argument. Key and value are both trimmed.
fn parse_param(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", arg))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing parameter name in '{}'", arg));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
