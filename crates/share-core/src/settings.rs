//! Settings of the administration tool itself
//!
//! Resolved in three layers: built-in defaults, then the settings file
//! (JSON or TOML, chosen by extension), then environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings file consulted when `CONFIG_PATH` is unset.
pub const DEFAULT_SETTINGS_PATH: &str = "/etc/share-manager/config.json";

const DEFAULT_SAMBA_CONF: &str = "/etc/samba/smb.conf";
const DEFAULT_SERVICE: &str = "smbd";
const DEFAULT_CACHE_TTL_SECS: u64 = 60;
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Share configuration file to manage
    pub samba_conf_path: PathBuf,
    /// systemd unit reloaded after configuration changes
    pub service_name: String,
    pub cache_ttl_secs: u64,
    /// Upper bound for every external tool invocation
    pub tool_timeout_secs: u64,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            samba_conf_path: PathBuf::from(DEFAULT_SAMBA_CONF),
            service_name: DEFAULT_SERVICE.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            tool_timeout_secs: DEFAULT_TOOL_TIMEOUT_SECS,
            debug: false,
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn load() -> Self {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Resolve settings using `env` to look up variables.
    ///
    /// A missing settings file is not an error. An unreadable or invalid
    /// one is logged and skipped, keeping defaults. Invalid numeric
    /// overrides are logged and ignored.
    pub fn load_with<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = env("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));

        let mut settings = if path.exists() {
            match Self::from_file(&path) {
                Ok(settings) => {
                    tracing::debug!(path = %path.display(), "Loaded settings file");
                    settings
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring settings file, using defaults");
                    Self::default()
                }
            }
        } else {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            Self::default()
        };

        settings.apply_env(env);
        settings
    }

    /// Parse a settings file; the format follows the file extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = share_sys::io::read_text(path)?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let invalid = |message: String| Error::Settings {
            path: path.to_path_buf(),
            message,
        };

        match extension.to_lowercase().as_str() {
            "json" => serde_json::from_str(&content).map_err(|e| invalid(e.to_string())),
            "toml" => toml::from_str(&content).map_err(|e| invalid(e.to_string())),
            other => Err(invalid(format!("unsupported settings format '{}'", other))),
        }
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = env("SAMBA_CONF_PATH") {
            self.samba_conf_path = PathBuf::from(path);
        }
        if let Some(name) = env("SERVICE_NAME") {
            self.service_name = name;
        }
        if let Some(secs) = env_secs(&env, "CACHE_TTL_SECS") {
            self.cache_ttl_secs = secs;
        }
        if let Some(secs) = env_secs(&env, "TOOL_TIMEOUT_SECS") {
            self.tool_timeout_secs = secs;
        }
        if let Some(debug) = env("DEBUG") {
            self.debug = matches!(debug.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes");
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }
}

fn env_secs<F>(env: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(secs) => Some(secs),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring non-numeric override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("none.json");
        let settings = Settings::load_with(env_of(&[("CONFIG_PATH", missing.to_str().unwrap())]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.cache_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn json_file_with_partial_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"samba_conf_path": "/tmp/smb.conf", "debug": true}"#).unwrap();

        let settings = Settings::load_with(env_of(&[("CONFIG_PATH", path.to_str().unwrap())]));

        assert_eq!(settings.samba_conf_path, PathBuf::from("/tmp/smb.conf"));
        assert!(settings.debug);
        assert_eq!(settings.service_name, "smbd");
    }

    #[test]
    fn toml_file_is_supported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "service_name = \"samba\"\ncache_ttl_secs = 5\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();

        assert_eq!(settings.service_name, "samba");
        assert_eq!(settings.cache_ttl_secs, 5);
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"service_name": "samba", "tool_timeout_secs": 30}"#).unwrap();

        let settings = Settings::load_with(env_of(&[
            ("CONFIG_PATH", path.to_str().unwrap()),
            ("SERVICE_NAME", "smb"),
            ("TOOL_TIMEOUT_SECS", "not-a-number"),
            ("DEBUG", "TRUE"),
        ]));

        assert_eq!(settings.service_name, "smb");
        assert_eq!(settings.tool_timeout_secs, 30);
        assert!(settings.debug);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let settings = Settings::load_with(env_of(&[("CONFIG_PATH", path.to_str().unwrap())]));

        assert_eq!(settings, Settings::default());
        assert!(matches!(Settings::from_file(&path), Err(Error::Settings { .. })));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "x").unwrap();
        assert!(matches!(Settings::from_file(&path), Err(Error::Settings { .. })));
    }
}
