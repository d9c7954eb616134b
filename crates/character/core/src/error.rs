//! Common error infrastructure for character-core.
//!
//! Domain errors live next to the component that produces them
//! ([`crate::catalog::DefinitionError`], [`crate::validate::ValidationError`],
//! [`crate::export::ExportError`]). This module holds the classification they
//! share so calling layers can map any of them to a status code or message.

/// Severity of a rule error, used by callers to pick a recovery strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// The user's build was rejected. Expected outcome; surface it and let the
    /// user change the build.
    Validation,

    /// The definitions themselves are malformed. The catalog must not be put
    /// into service; any previously active catalog stays active.
    Definition,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Definition => "definition",
        }
    }

    /// Returns true if the error came from user input rather than data files.
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation)
    }
}

/// Common trait for all rule errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error
/// - Carry the offending ids and limits in the variant, never a preformatted
///   message
/// - `error_code` must be stable; transport layers key on it
pub trait RuleError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant.
    fn error_code(&self) -> &'static str;
}
