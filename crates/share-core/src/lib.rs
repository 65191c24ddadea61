//! Share administration for Share Manager
//!
//! This crate composes the Layer 0 crates into the operations an
//! administrator performs:
//!
//! - **Provisioning**: validate a share, create its directory, apply
//!   ownership and mode, apply ACLs, persist the configuration, reload the
//!   service (see [`ProvisioningOrchestrator`])
//! - **Share and section editing**: list, read, update and delete
//!   configuration sections, or replace the raw file
//! - **Read paths**: share ACL inspection, disk usage, service status
//!
//! # Architecture
//!
//! ```text
//!                 shareadm (CLI)
//!                       |
//!                  share-core
//!                       |
//!     +----------+------+------+-----------+
//!     |          |             |           |
//! share-conf  share-acl   share-usage   share-sys
//! ```
//!
//! Everything process-wide (configuration path, usage caches, external
//! collaborators) lives in one [`AdminContext`] built at startup.

pub mod admin;
pub mod context;
pub mod error;
pub mod host;
pub mod provision;
pub mod service;
pub mod settings;
pub mod validate;

pub use admin::ConfigPreview;
pub use context::AdminContext;
pub use error::{Error, Result, StatusClass};
pub use host::{HostOps, SystemHost};
pub use provision::{ProvisionReport, ProvisionStage, ProvisioningOrchestrator};
pub use service::{ServiceControl, ServiceStatus, SystemdService};
pub use settings::Settings;
