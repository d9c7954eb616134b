//! Stat Resolver: turns a validated build into final stats.
//!
//! # Order
//!
//! ```text
//! [ Class base attributes + base stats ]
//!      ↓
//! [ + Attribute allocation ]
//!      ↓
//! [ Skill modifiers per stat: Add → Multiply → Set ]
//!      ↓
//! [ Exact values, rounded only at export ]
//! ```
//!
//! Resolution is infallible and deterministic: modifiers are gathered from
//! selected skills in ascending id order, and the bonus stack itself is order
//! independent.

mod bonus;
mod value;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::definition::{Attribute, AttributeSet, ClassDefinition, StatId};
use crate::validate::{Appearance, AttributeAllocation, SkillSelection, ValidatedBuild};

pub use bonus::{Bonus, BonusStack};
pub use value::StatValue;

/// Final stat values keyed by stat id. Always contains the six attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedStats(BTreeMap<StatId, StatValue>);

impl ResolvedStats {
    pub fn get(&self, stat: &str) -> Option<StatValue> {
        self.0.get(stat).copied()
    }

    pub fn attribute(&self, attribute: Attribute) -> StatValue {
        self.get(attribute.as_ref()).unwrap_or_default()
    }

    pub fn attributes(&self) -> AttributeSet<StatValue> {
        AttributeSet::splat(()).map(|a, _| self.attribute(a))
    }

    /// All stats in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&StatId, StatValue)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }

    /// Stats other than the six attributes, in ascending id order.
    pub fn derived(&self) -> impl Iterator<Item = (&StatId, StatValue)> {
        self.iter().filter(|(id, _)| Attribute::parse(id.as_str()).is_none())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A fully resolved build. Immutable; produced only by [`resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedBuild {
    class: Arc<ClassDefinition>,
    level: u32,
    allocation: AttributeAllocation,
    selection: SkillSelection,
    stats: ResolvedStats,
    appearance: AppearanceSnapshot,
}

/// Appearance held by a resolved build.
///
/// `serde_json::Value` is not `Eq`; equality here is structural equality of
/// the JSON values.
#[derive(Clone, Debug, Default, PartialEq)]
struct AppearanceSnapshot(Appearance);

impl Eq for AppearanceSnapshot {}

impl ResolvedBuild {
    pub fn class(&self) -> &Arc<ClassDefinition> {
        &self.class
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn allocation(&self) -> &AttributeAllocation {
        &self.allocation
    }

    pub fn selection(&self) -> &SkillSelection {
        &self.selection
    }

    pub fn stats(&self) -> &ResolvedStats {
        &self.stats
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance.0
    }
}

/// Computes final stats for a validated build.
pub fn resolve(build: &ValidatedBuild<'_>) -> ResolvedBuild {
    let class = build.class();
    let catalog = build.catalog();

    // 1-2. Base values plus allocation
    let mut values: BTreeMap<StatId, StatValue> = class
        .base_stats
        .iter()
        .map(|(stat, base)| (stat.clone(), StatValue::from(*base)))
        .collect();
    for (attribute, base) in class.base_attributes.iter() {
        let points = build.allocation().points(attribute);
        values.insert(
            StatId::from(attribute),
            StatValue::from(i64::from(*base) + i64::from(points)),
        );
    }

    // 3. Group modifiers by target stat
    let mut stacks: BTreeMap<&StatId, BonusStack> = BTreeMap::new();
    for &index in build.nodes() {
        let node = catalog.node(index);
        for modifier in node.modifiers() {
            stacks
                .entry(&modifier.stat)
                .or_default()
                .add(Bonus::from_modifier(modifier, node.tier(), node.id()));
        }
    }

    // 4. Apply each stack
    for (stat, stack) in stacks {
        let base = values.get(stat).copied().unwrap_or_default();
        values.insert(stat.clone(), stack.apply(base));
    }

    ResolvedBuild {
        class: Arc::clone(class),
        level: build.level(),
        allocation: *build.allocation(),
        selection: build.selection().clone(),
        stats: ResolvedStats(values),
        appearance: AppearanceSnapshot(build.appearance().clone()),
    }
}
