//! Data-driven character content and loaders.
//!
//! This crate reads the definition store from a data directory:
//! - Class definitions (data-driven via RON)
//! - Skill trees (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//! - Build requests (RON or JSON)
//!
//! All loaders deserialize straight into `character-core` types. Nothing here
//! checks rule invariants; that is [`character_core::Catalog::build`]'s job.

pub mod loaders;

pub use loaders::{BuildLoader, ClassLoader, ConfigLoader, ContentFactory, SkillTreeLoader};
