//! Shared test fixtures for the share-manager workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`conf`]: [`TestConf`], a scratch directory holding an `smb.conf`
//! - [`fixtures`]: canned configuration text and df/du output

pub mod conf;
pub mod fixtures;

pub use conf::TestConf;
