//! Definition types supplied by the definition store.
//!
//! These are the loosely trusted inputs to [`crate::catalog::Catalog::build`].
//! They deserialize straight from configuration files and carry no invariants
//! of their own; the catalog is the only place they are checked.

mod attribute;
mod ids;

use std::collections::BTreeMap;

pub use attribute::{Attribute, AttributeSet};
pub use ids::{ClassId, SkillId, StatId, TreeId};

/// A playable class.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClassDefinition {
    pub id: ClassId,
    pub name: String,

    /// Attribute values before any allocation.
    pub base_attributes: AttributeSet<i32>,

    /// Starting values of non-attribute stats (e.g. `HP`).
    #[serde(default)]
    pub base_stats: BTreeMap<StatId, i32>,

    /// Attribute points the player may distribute.
    pub attribute_points: u32,

    /// Maximum points a single attribute may receive.
    #[serde(default)]
    pub attribute_cap: Option<u32>,

    /// Skill points available at level 1.
    pub skill_points: u32,

    /// Skill points gained for every level above 1.
    #[serde(default)]
    pub skill_points_per_level: u32,

    #[serde(default)]
    pub max_level: Option<u32>,

    /// Trees this class may pick skills from.
    pub skill_trees: Vec<TreeId>,

    /// Per-attribute weight (percent) used by balance analysis.
    #[serde(default)]
    pub power_weights: Option<AttributeSet<u32>>,
}

impl ClassDefinition {
    pub const DEFAULT_POWER_WEIGHT: u32 = 100;

    pub fn new(
        id: impl Into<ClassId>,
        name: impl Into<String>,
        base_attributes: AttributeSet<i32>,
        attribute_points: u32,
        skill_points: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_attributes,
            base_stats: BTreeMap::new(),
            attribute_points,
            attribute_cap: None,
            skill_points,
            skill_points_per_level: 0,
            max_level: None,
            skill_trees: Vec::new(),
            power_weights: None,
        }
    }

    pub fn with_skill_tree(mut self, tree: impl Into<TreeId>) -> Self {
        self.skill_trees.push(tree.into());
        self
    }

    pub fn with_base_stat(mut self, stat: impl Into<StatId>, value: i32) -> Self {
        self.base_stats.insert(stat.into(), value);
        self
    }

    pub fn with_attribute_cap(mut self, cap: u32) -> Self {
        self.attribute_cap = Some(cap);
        self
    }

    pub fn with_skill_points_per_level(mut self, points: u32) -> Self {
        self.skill_points_per_level = points;
        self
    }

    pub fn with_max_level(mut self, level: u32) -> Self {
        self.max_level = Some(level);
        self
    }

    pub fn with_power_weights(mut self, weights: AttributeSet<u32>) -> Self {
        self.power_weights = Some(weights);
        self
    }

    /// Skill-point budget at `level`: `skill_points + per_level × (level − 1)`.
    pub fn skill_budget(&self, level: u32) -> u64 {
        let extra_levels = u64::from(level.saturating_sub(1));
        u64::from(self.skill_points) + u64::from(self.skill_points_per_level) * extra_levels
    }

    pub fn allows_tree(&self, tree: &TreeId) -> bool {
        self.skill_trees.contains(tree)
    }

    pub fn power_weight(&self, attribute: Attribute) -> u32 {
        self.power_weights
            .as_ref()
            .map_or(Self::DEFAULT_POWER_WEIGHT, |w| *w.get(attribute))
    }
}

/// A skill tree as authored: a named group of skill nodes.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SkillTreeDefinition {
    pub id: TreeId,
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<SkillNodeDefinition>,
}

impl SkillTreeDefinition {
    pub fn new(id: impl Into<TreeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    pub fn with_node(mut self, node: SkillNodeDefinition) -> Self {
        self.nodes.push(node);
        self
    }
}

/// A skill node as authored.
///
/// `tree` may be omitted, in which case the node belongs to the tree that
/// lists it. When present it must name that same tree.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SkillNodeDefinition {
    pub id: SkillId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tree: Option<TreeId>,
    pub tier: u32,
    pub cost: u32,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl SkillNodeDefinition {
    pub fn new(id: impl Into<SkillId>, tier: u32, cost: u32) -> Self {
        Self {
            id: id.into(),
            name: None,
            tree: None,
            tier,
            cost,
            prerequisites: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn in_tree(mut self, tree: impl Into<TreeId>) -> Self {
        self.tree = Some(tree.into());
        self
    }

    pub fn requires(mut self, skill: impl Into<SkillId>) -> Self {
        self.prerequisites.push(Prerequisite::Skill(skill.into()));
        self
    }

    pub fn requires_any<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SkillId>,
    {
        self.prerequisites
            .push(Prerequisite::AnyOf(skills.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

/// One prerequisite entry of a skill node.
///
/// In RON: `Skill("power_strike")` or `AnyOf(["fireball", "frost_bolt"])`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Prerequisite {
    /// The named skill must be selected.
    Skill(SkillId),
    /// At least one of the named skills must be selected.
    AnyOf(Vec<SkillId>),
}

/// How a modifier changes its target stat.
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
pub enum ModifierOp {
    /// Adds `magnitude`.
    Add,
    /// Percentage increase, `10` = +10%. All percentages on a stat are summed
    /// into one multiplier.
    Multiply,
    /// Fixes the stat to `magnitude`, overriding adds and multipliers.
    Set,
}

/// A rule attached to a skill that alters one stat.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Modifier {
    pub stat: StatId,
    pub op: ModifierOp,
    pub magnitude: i32,
}

impl Modifier {
    pub fn new(stat: impl Into<StatId>, op: ModifierOp, magnitude: i32) -> Self {
        Self {
            stat: stat.into(),
            op,
            magnitude,
        }
    }

    pub fn add(stat: impl Into<StatId>, magnitude: i32) -> Self {
        Self::new(stat, ModifierOp::Add, magnitude)
    }

    pub fn multiply(stat: impl Into<StatId>, percent: i32) -> Self {
        Self::new(stat, ModifierOp::Multiply, percent)
    }

    pub fn set(stat: impl Into<StatId>, value: i32) -> Self {
        Self::new(stat, ModifierOp::Set, value)
    }
}
