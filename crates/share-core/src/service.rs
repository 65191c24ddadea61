//! Control of the file-sharing service

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use share_sys::{DEFAULT_TOOL_TIMEOUT, ToolCommand};

/// Reload and status of the background service.
pub trait ServiceControl: Send + Sync {
    /// Unit name, e.g. `smbd`.
    fn name(&self) -> &str;

    /// Make the service pick up the current configuration. Idempotent.
    fn reload(&self) -> share_sys::Result<()>;

    fn status(&self) -> share_sys::Result<ServiceStatus>;
}

/// Service state as shown to administrators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub service: String,
    pub active: bool,
    /// `running` or `stopped`
    pub status: String,
    /// Time since activation, e.g. `3d 4h 12m`; `N/A` when unknown
    pub uptime: String,
    /// Activation time, e.g. `Jan 2, 2026 15:04:05`; empty when unknown
    pub since: String,
}

impl ServiceStatus {
    /// Build a status from `systemctl is-active` output and, for active
    /// services, the `ActiveEnterTimestamp` property.
    pub fn from_systemctl(service: &str, is_active: &str, show: Option<&str>, now: DateTime<Utc>) -> Self {
        let active = is_active.trim() == "active";
        let started = show.filter(|_| active).and_then(parse_active_enter);

        let (uptime, since) = match started {
            Some(started) => (
                format_uptime(now.signed_duration_since(started)),
                started.format("%b %-d, %Y %H:%M:%S").to_string(),
            ),
            None => ("N/A".to_string(), String::new()),
        };

        Self {
            service: service.to_string(),
            active,
            status: if active { "running" } else { "stopped" }.to_string(),
            uptime,
            since,
        }
    }
}

/// Parse `ActiveEnterTimestamp=Tue 2026-03-03 09:15:02 UTC`.
///
/// The zone abbreviation is not resolved; the time is taken as UTC.
pub fn parse_active_enter(show: &str) -> Option<DateTime<Utc>> {
    let value = show
        .lines()
        .find_map(|line| line.trim().strip_prefix("ActiveEnterTimestamp="))?
        .trim();
    let without_zone = match value.rsplit_once(' ') {
        Some((head, zone)) if zone.chars().all(|c| c.is_ascii_alphabetic()) => head,
        _ => value,
    };
    NaiveDateTime::parse_from_str(without_zone, "%a %Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Render an elapsed time as `Xd Yh Zm`, dropping leading zero units.
pub fn format_uptime(elapsed: chrono::TimeDelta) -> String {
    let minutes_total = elapsed.num_minutes().max(0);
    let days = minutes_total / (24 * 60);
    let hours = (minutes_total / 60) % 24;
    let minutes = minutes_total % 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// A systemd unit driven through `systemctl`
#[derive(Debug, Clone)]
pub struct SystemdService {
    name: String,
    timeout: Duration,
}

impl SystemdService {
    pub fn new(name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            timeout,
        }
    }

    fn systemctl(&self) -> ToolCommand {
        ToolCommand::new("systemctl").timeout(self.timeout)
    }
}

impl Default for SystemdService {
    fn default() -> Self {
        Self::new("smbd", DEFAULT_TOOL_TIMEOUT)
    }
}

impl ServiceControl for SystemdService {
    fn name(&self) -> &str {
        &self.name
    }

    fn reload(&self) -> share_sys::Result<()> {
        self.systemctl().args(["restart", self.name.as_str()]).run()?;
        tracing::info!(service = %self.name, "Service restarted");
        Ok(())
    }

    fn status(&self) -> share_sys::Result<ServiceStatus> {
        // is-active exits non-zero for inactive units; the output is the answer.
        let (_, state) = self
            .systemctl()
            .args(["is-active", self.name.as_str()])
            .run_unchecked()?;

        let show = if state.stdout.trim() == "active" {
            self.systemctl()
                .args(["show", self.name.as_str(), "--property=ActiveEnterTimestamp"])
                .run()
                .map(|out| out.stdout)
                .ok()
        } else {
            None
        };

        Ok(ServiceStatus::from_systemctl(
            &self.name,
            &state.stdout,
            show.as_deref(),
            Utc::now(),
        ))
    }
}
