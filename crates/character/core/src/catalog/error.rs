//! Catalog construction errors.

use crate::error::{ErrorSeverity, RuleError};

/// Which definition invariant was violated.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DefinitionErrorKind {
    /// Two classes, trees or skills share an id.
    DuplicateIdentifier,
    /// A reference names a tree or skill that does not exist where it must.
    DanglingReference,
    /// A node is malformed on its own (tier 0, empty stat name, empty group).
    InvalidNode,
    /// The prerequisite graph contains a cycle.
    CycleDetected,
    /// A prerequisite is not in a strictly lower tier than its dependent.
    TierViolation,
}

/// Rejected definition set.
///
/// `offenders` lists the offending class/tree/skill ids in ascending order,
/// without duplicates.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, serde::Serialize)]
#[error("{kind}: {}", .offenders.join(", "))]
pub struct DefinitionError {
    pub kind: DefinitionErrorKind,
    pub offenders: Vec<String>,
}

impl DefinitionError {
    pub fn new<I, S>(kind: DefinitionErrorKind, offenders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut offenders: Vec<String> = offenders.into_iter().map(Into::into).collect();
        offenders.sort();
        offenders.dedup();
        Self { kind, offenders }
    }

    pub fn kind(&self) -> DefinitionErrorKind {
        self.kind
    }

    pub fn offenders(&self) -> &[String] {
        &self.offenders
    }

    /// Returns true if `id` is among the offenders.
    pub fn names(&self, id: &str) -> bool {
        self.offenders.iter().any(|o| o == id)
    }
}

impl RuleError for DefinitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Definition
    }

    fn error_code(&self) -> &'static str {
        use DefinitionErrorKind::*;
        match self.kind {
            DuplicateIdentifier => "DEFINITION_DUPLICATE_IDENTIFIER",
            DanglingReference => "DEFINITION_DANGLING_REFERENCE",
            InvalidNode => "DEFINITION_INVALID_NODE",
            CycleDetected => "DEFINITION_CYCLE_DETECTED",
            TierViolation => "DEFINITION_TIER_VIOLATION",
        }
    }
}
