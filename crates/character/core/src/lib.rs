//! Deterministic character build rules shared by the runtime and tools.
//!
//! `character-core` turns class and skill-tree definitions into an immutable
//! [`Catalog`], checks proposed builds against it with [`validate`], computes
//! final stats with [`resolve`] and renders the engine-facing document with
//! [`export`]. Every entry point is a pure function of its inputs; loading
//! files, logging and swapping catalogs belong to the crates above this one.
pub mod balance;
pub mod catalog;
pub mod config;
pub mod definition;
pub mod error;
pub mod export;
pub mod stats;
pub mod validate;

#[cfg(test)]
mod test_fixtures;

pub use balance::{
    BuildComparison, Playstyle, Winner, compare_builds, optimize_allocation, power_level,
    suggest_allocation,
};
pub use catalog::{Catalog, DefinitionError, DefinitionErrorKind, SkillIndex, SkillNode, SkillTree};
pub use config::EngineConfig;
pub use definition::{
    Attribute, AttributeSet, ClassDefinition, ClassId, Modifier, ModifierOp, Prerequisite,
    SkillId, SkillNodeDefinition, SkillTreeDefinition, StatId, TreeId,
};
pub use error::{ErrorSeverity, RuleError};
pub use export::{
    CharacterExport, ExportDocument, ExportError, ExportOptions, SchemaVersion, export,
};
pub use stats::{ResolvedBuild, ResolvedStats, StatValue, resolve};
pub use validate::{
    Appearance, AttributeAllocation, BudgetKind, BuildRequest, SkillSelection, ValidatedBuild,
    ValidationError, ValidationOptions, validate,
};
