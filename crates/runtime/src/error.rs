//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule, export and content failures so transport layers can bubble
//! them up with a stable error code.
use thiserror::Error;

use character_core::{DefinitionError, ErrorSeverity, ExportError, RuleError, ValidationError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid definitions: {0}")]
    Definition(#[from] DefinitionError),

    #[error("build rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("catalog registry has no content source to reload from")]
    NoContentSource,

    #[error(transparent)]
    Content(#[from] anyhow::Error),
}

impl RuntimeError {
    /// Stable code for rule errors; `None` for export and I/O failures.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Definition(e) => Some(e.error_code()),
            Self::Validation(e) => Some(e.error_code()),
            _ => None,
        }
    }

    pub fn severity(&self) -> Option<ErrorSeverity> {
        match self {
            Self::Definition(e) => Some(e.severity()),
            Self::Validation(e) => Some(e.severity()),
            _ => None,
        }
    }

    /// True when the caller's build, not the data, was at fault.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
