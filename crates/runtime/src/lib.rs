//! Runtime orchestration for character builds.
//!
//! This crate owns the mutable edge of the system: it loads content through
//! `character-content`, publishes the resulting catalog as a versioned
//! snapshot, and serves validation, resolution, export and comparison
//! requests against whichever snapshot is active.
//!
//! Modules are organized by responsibility:
//! - [`registry`] holds and atomically swaps catalog snapshots
//! - [`service`] is the facade transport layers call into
//! - [`config`] reads environment overrides
pub mod config;
pub mod error;
pub mod registry;
pub mod service;

pub use config::{EngineOverrides, RuntimeConfig};
pub use error::{Result, RuntimeError};
pub use registry::{CatalogRegistry, CatalogSnapshot};
pub use service::{BuildReport, BuildService};
