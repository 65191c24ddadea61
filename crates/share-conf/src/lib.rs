//! Format-preserving configuration handling for Share Manager.
//!
//! The share configuration is an INI-style file (`[section]` headers,
//! `key = value` parameters, `#`/`;` comments) that administrators also edit
//! by hand. This crate reads it into a [`ConfigDocument`] and writes changes
//! back with a *merge write*: only the parameter blocks of the sections named
//! in the change set are replaced, every other byte of the on-disk file is
//! carried through untouched.
//!
//! ```text
//! [global]                 <- reserved, never a share, never rewritten by share ops
//!    workgroup = WORKGROUP
//! # hand-written comment   <- preserved verbatim
//! [docs]                   <- share; its parameter lines are replaced on write
//!    path = /srv/docs
//! ```
//!
//! The [`classify`] module holds the pure rules (reserved section names,
//! principal prefixes) that the ACL translator shares with this crate so the
//! two never disagree.

pub mod classify;
pub mod document;
pub mod error;
pub mod line;
pub mod section;
pub mod store;
pub mod writer;

pub use classify::{
    PrincipalKind, PrincipalRef, RESERVED_SECTIONS, classify_principal, is_opaque_reference,
    is_reserved_section, split_principal_list,
};
pub use document::ConfigDocument;
pub use error::{Error, Result};
pub use section::{Section, keys};
pub use store::ConfigStore;
pub use writer::merge;
