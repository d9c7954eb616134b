//! Build validation errors.

use crate::definition::{Attribute, ClassId, SkillId, TreeId};
use crate::error::{ErrorSeverity, RuleError};

/// Which point budget was exceeded.
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
pub enum BudgetKind {
    /// Attribute points allocated across all attributes.
    Attribute,
    /// Total cost of selected skills.
    Skill,
}

/// Why a proposed build was rejected.
///
/// Rejection is an expected outcome, not a fault: callers surface it to the
/// user. Variants carry the offending ids and limits so a message can be
/// rendered without re-deriving state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("unknown class `{class}`")]
    UnknownClass { class: ClassId },

    /// Level is 0 or above the class maximum.
    #[error("level {level} is not allowed for this class")]
    InvalidLevel { level: u32, max_level: Option<u32> },

    #[error("unknown attribute `{attribute}`")]
    UnknownAttribute { attribute: String },

    /// The same attribute was given twice under different spellings.
    #[error("attribute {attribute} allocated more than once")]
    DuplicateAttribute { attribute: Attribute },

    #[error("attribute {attribute} has negative allocation {points}")]
    NegativeAllocation { attribute: Attribute, points: i64 },

    #[error("attribute {attribute} has {points} points, cap is {cap}")]
    AttributeCapExceeded {
        attribute: Attribute,
        cap: u32,
        points: u64,
    },

    #[error("{budget} budget exceeded: {actual} > {limit}")]
    BudgetExceeded {
        budget: BudgetKind,
        limit: u64,
        actual: u64,
    },

    #[error("unknown skill `{skill}`")]
    UnknownSkill { skill: SkillId },

    #[error("skill `{skill}` belongs to tree `{tree}`, which this class cannot use")]
    SkillNotAllowed { skill: SkillId, tree: TreeId },

    #[error("skill `{skill}` requires `{missing}`")]
    MissingPrerequisite { skill: SkillId, missing: SkillId },

    #[error(
        "skill `{skill}` requires one of: {}",
        .options.iter().map(SkillId::as_str).collect::<Vec<_>>().join(", ")
    )]
    UnsatisfiedAnyOf {
        skill: SkillId,
        options: Vec<SkillId>,
    },

    #[error("skill `{skill}` selected more than once")]
    DuplicateSkill { skill: SkillId },
}

impl RuleError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ValidationError::*;
        match self {
            UnknownClass { .. } => "BUILD_UNKNOWN_CLASS",
            InvalidLevel { .. } => "BUILD_INVALID_LEVEL",
            UnknownAttribute { .. } => "BUILD_UNKNOWN_ATTRIBUTE",
            DuplicateAttribute { .. } => "BUILD_DUPLICATE_ATTRIBUTE",
            NegativeAllocation { .. } => "BUILD_NEGATIVE_ALLOCATION",
            AttributeCapExceeded { .. } => "BUILD_ATTRIBUTE_CAP_EXCEEDED",
            BudgetExceeded {
                budget: BudgetKind::Attribute,
                ..
            } => "BUILD_ATTRIBUTE_BUDGET_EXCEEDED",
            BudgetExceeded {
                budget: BudgetKind::Skill,
                ..
            } => "BUILD_SKILL_BUDGET_EXCEEDED",
            UnknownSkill { .. } => "BUILD_UNKNOWN_SKILL",
            SkillNotAllowed { .. } => "BUILD_SKILL_NOT_ALLOWED",
            MissingPrerequisite { .. } => "BUILD_MISSING_PREREQUISITE",
            UnsatisfiedAnyOf { .. } => "BUILD_UNSATISFIED_ANY_OF",
            DuplicateSkill { .. } => "BUILD_DUPLICATE_SKILL",
        }
    }
}
