//! Allocation Validator: checks a proposed build against the catalog.
//!
//! Checks run in a fixed order and stop at the first violation:
//!
//! 1. class exists, level is in range
//! 2. attribute keys, values, per-attribute cap, attribute budget
//! 3. every skill exists and belongs to an allowed tree
//! 4. skill-point budget (distinct skills only)
//! 5. prerequisite closure and any-of groups
//! 6. duplicate skills, when strict
//!
//! Duplicate skill ids are collapsed before step 3, so a repeated id is never
//! charged twice even when strict mode later rejects it.

mod error;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use crate::catalog::{Catalog, SkillIndex};
use crate::definition::{Attribute, AttributeSet, ClassDefinition, ClassId, SkillId};

pub use error::{BudgetKind, ValidationError};

/// Opaque appearance data supplied by the caller and passed through to the
/// export untouched. Top-level keys iterate in sorted order whatever features
/// `serde_json` is built with.
pub type Appearance = BTreeMap<String, serde_json::Value>;

/// A proposed build as received from a collaborator.
///
/// Attribute keys are raw strings; they are checked by [`validate`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BuildRequest {
    pub class: ClassId,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub attributes: BTreeMap<String, i64>,
    #[serde(default)]
    pub skills: Vec<SkillId>,
    #[serde(default)]
    pub appearance: Appearance,
}

impl BuildRequest {
    pub fn new(class: impl Into<ClassId>) -> Self {
        Self {
            class: class.into(),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn allocate(mut self, attribute: impl Into<String>, points: i64) -> Self {
        self.attributes.insert(attribute.into(), points);
        self
    }

    /// Replaces the attribute map with all six canonical keys of `allocation`.
    pub fn with_allocation(mut self, allocation: &AttributeAllocation) -> Self {
        self.attributes = allocation
            .as_set()
            .iter()
            .map(|(attribute, points)| (attribute.to_string(), i64::from(*points)))
            .collect();
        self
    }

    pub fn select(mut self, skill: impl Into<SkillId>) -> Self {
        self.skills.push(skill.into());
        self
    }

    pub fn with_appearance(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.appearance.insert(key.into(), value.into());
        self
    }

    /// Level used for budgeting; absent means level 1.
    pub fn effective_level(&self) -> u32 {
        self.level.unwrap_or(1)
    }
}

/// Validation switches chosen by the surrounding service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject repeated skill ids instead of collapsing them.
    pub strict_duplicates: bool,
}

impl ValidationOptions {
    pub const fn strict() -> Self {
        Self {
            strict_duplicates: true,
        }
    }
}

/// Points assigned to each attribute. Always within the class budget once
/// part of a [`ValidatedBuild`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct AttributeAllocation(AttributeSet<u32>);

impl AttributeAllocation {
    pub(crate) const fn from_points(points: AttributeSet<u32>) -> Self {
        Self(points)
    }

    pub fn points(&self, attribute: Attribute) -> u32 {
        *self.0.get(attribute)
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, p)| u64::from(*p)).sum()
    }

    pub fn as_set(&self) -> &AttributeSet<u32> {
        &self.0
    }
}

/// Distinct selected skills, iterated in ascending id order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct SkillSelection(BTreeSet<SkillId>);

impl SkillSelection {
    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A build that passed every check. Holds no computed stats.
#[derive(Clone, Debug)]
pub struct ValidatedBuild<'c> {
    catalog: &'c Catalog,
    class: &'c Arc<ClassDefinition>,
    level: u32,
    allocation: AttributeAllocation,
    selection: SkillSelection,
    nodes: Vec<SkillIndex>,
    appearance: Appearance,
}

impl<'c> ValidatedBuild<'c> {
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn class(&self) -> &'c Arc<ClassDefinition> {
        self.class
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

    /// Selected nodes in ascending skill id order.
    pub fn nodes(&self) -> &[SkillIndex] {
        &self.nodes
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn skill_cost(&self) -> u64 {
        self.nodes
            .iter()
            .map(|i| u64::from(self.catalog.node(*i).cost()))
            .sum()
    }

    pub fn unspent_attribute_points(&self) -> u64 {
        u64::from(self.class.attribute_points) - self.allocation.total()
    }

    pub fn unspent_skill_points(&self) -> u64 {
        self.class.skill_budget(self.level) - self.skill_cost()
    }
}

/// Checks `request` against `catalog`.
///
/// `request.attributes` may be partial: any of the six attributes it leaves
/// out counts as 0 points. Keys match in any ASCII case, and two keys naming
/// the same attribute (`str` and `STR`) are rejected.
pub fn validate<'c>(
    catalog: &'c Catalog,
    request: &BuildRequest,
    options: &ValidationOptions,
) -> Result<ValidatedBuild<'c>, ValidationError> {
    // 1. Class and level
    let class = catalog
        .class(request.class.as_str())
        .ok_or_else(|| ValidationError::UnknownClass {
            class: request.class.clone(),
        })?;
    let level = request.effective_level();
    if level == 0 || class.max_level.is_some_and(|max| level > max) {
        return Err(ValidationError::InvalidLevel {
            level,
            max_level: class.max_level,
        });
    }

    // 2. Attributes
    let allocation = check_attributes(class, &request.attributes)?;

    // 3. Skill membership
    let mut seen = HashSet::with_capacity(request.skills.len());
    let first_duplicate = request.skills.iter().find(|id| !seen.insert(*id));
    let distinct: BTreeSet<&SkillId> = request.skills.iter().collect();

    let mut nodes = Vec::with_capacity(distinct.len());
    for id in &distinct {
        let index = catalog
            .skill_index(id.as_str())
            .ok_or_else(|| ValidationError::UnknownSkill {
                skill: (*id).clone(),
            })?;
        let node = catalog.node(index);
        if !class.allows_tree(node.tree()) {
            return Err(ValidationError::SkillNotAllowed {
                skill: (*id).clone(),
                tree: node.tree().clone(),
            });
        }
        nodes.push(index);
    }

    // 4. Skill budget
    let limit = class.skill_budget(level);
    let actual: u64 = nodes
        .iter()
        .map(|i| u64::from(catalog.node(*i).cost()))
        .sum();
    if actual > limit {
        return Err(ValidationError::BudgetExceeded {
            budget: BudgetKind::Skill,
            limit,
            actual,
        });
    }

    // 5. Prerequisites
    let selected: HashSet<SkillIndex> = nodes.iter().copied().collect();
    for &index in &nodes {
        let node = catalog.node(index);
        if let Some(missing) = catalog
            .closure(index)
            .iter()
            .find(|p| !selected.contains(*p))
        {
            return Err(ValidationError::MissingPrerequisite {
                skill: node.id().clone(),
                missing: catalog.node(*missing).id().clone(),
            });
        }
        if let Some(group) = node
            .any_of()
            .iter()
            .find(|group| !group.iter().any(|m| selected.contains(m)))
        {
            return Err(ValidationError::UnsatisfiedAnyOf {
                skill: node.id().clone(),
                options: group.iter().map(|m| catalog.node(*m).id().clone()).collect(),
            });
        }
    }

    // 6. Duplicates
    if let (true, Some(duplicate)) = (options.strict_duplicates, first_duplicate) {
        return Err(ValidationError::DuplicateSkill {
            skill: duplicate.clone(),
        });
    }

    Ok(ValidatedBuild {
        catalog,
        class,
        level,
        allocation,
        selection: SkillSelection(distinct.into_iter().cloned().collect()),
        nodes,
        appearance: request.appearance.clone(),
    })
}

fn check_attributes(
    class: &ClassDefinition,
    raw: &BTreeMap<String, i64>,
) -> Result<AttributeAllocation, ValidationError> {
    let mut assigned: AttributeSet<Option<u64>> = AttributeSet::default();
    for (key, &points) in raw {
        let attribute =
            Attribute::parse(key).ok_or_else(|| ValidationError::UnknownAttribute {
                attribute: key.clone(),
            })?;
        if points < 0 {
            return Err(ValidationError::NegativeAllocation { attribute, points });
        }
        let points = points.unsigned_abs();
        if let Some(cap) = class.attribute_cap {
            if points > u64::from(cap) {
                return Err(ValidationError::AttributeCapExceeded {
                    attribute,
                    cap,
                    points,
                });
            }
        }
        let slot = assigned.get_mut(attribute);
        if slot.is_some() {
            return Err(ValidationError::DuplicateAttribute { attribute });
        }
        *slot = Some(points);
    }

    let actual = assigned
        .iter()
        .fold(0u64, |sum, (_, p)| sum.saturating_add(p.unwrap_or(0)));
    let limit = u64::from(class.attribute_points);
    if actual > limit {
        return Err(ValidationError::BudgetExceeded {
            budget: BudgetKind::Attribute,
            limit,
            actual,
        });
    }

    // Each value is at most `limit`, which fits in u32.
    Ok(AttributeAllocation(assigned.map(|_, p| {
        u32::try_from(p.unwrap_or(0)).unwrap_or(u32::MAX)
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::definition::{SkillNodeDefinition, SkillTreeDefinition};
    use crate::error::{ErrorSeverity, RuleError};
    use crate::test_fixtures::{catalog, combat_tree, warrior};

    fn lenient() -> ValidationOptions {
        ValidationOptions::default()
    }

    fn full_allocation(request: BuildRequest) -> BuildRequest {
        request
            .allocate("STR", 10)
            .allocate("DEX", 0)
            .allocate("INT", 0)
            .allocate("WIS", 0)
            .allocate("CON", 0)
            .allocate("CHA", 0)
    }

    #[test]
    fn accepts_warrior_with_power_strike() {
        let catalog = catalog();
        let request = full_allocation(BuildRequest::new("Warrior")).select("PowerStrike");

        let build = validate(&catalog, &request, &lenient()).unwrap();

        assert_eq!(build.class().id.as_str(), "Warrior");
        assert_eq!(build.allocation().points(Attribute::Str), 10);
        assert_eq!(build.allocation().total(), 10);
        assert!(build.selection().contains("PowerStrike"));
        assert_eq!(build.skill_cost(), 2);
        assert_eq!(build.unspent_skill_points(), 3);
        assert_eq!(build.unspent_attribute_points(), 0);
    }

    #[test]
    fn attribute_budget_reported_before_skill_budget() {
        let catalog = catalog();
        let request = BuildRequest::new("Warrior")
            .allocate("STR", 10)
            .allocate("DEX", 5)
            .select("PowerStrike")
            .select("WhirlwindAttack")
            .select("Earthshaker");

        let err = validate(&catalog, &request, &lenient()).unwrap_err();

        assert_eq!(
            err,
            ValidationError::BudgetExceeded {
                budget: BudgetKind::Attribute,
                limit: 10,
                actual: 15,
            }
        );
        assert_eq!(err.error_code(), "BUILD_ATTRIBUTE_BUDGET_EXCEEDED");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn rejects_skill_budget_overrun() {
        let catalog = catalog();
        let request = BuildRequest::new("Warrior")
            .select("PowerStrike")
            .select("WhirlwindAttack")
            .select("Earthshaker");

        let err = validate(&catalog, &request, &lenient()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::BudgetExceeded {
                budget: BudgetKind::Skill,
                limit: 5,
                actual: 7,
            }
        );
    }

    #[test]
    fn level_raises_skill_budget() {
        let class = warrior().with_skill_points_per_level(1).with_max_level(20);
        let catalog = Catalog::build(&[class], &[combat_tree()]).unwrap();
        let request = BuildRequest::new("Warrior")
            .with_level(3)
            .select("PowerStrike")
            .select("WhirlwindAttack")
            .select("Earthshaker");

        let build = validate(&catalog, &request, &lenient()).unwrap();
        assert_eq!(build.level(), 3);
        assert_eq!(build.unspent_skill_points(), 0);

        let too_high = request.clone().with_level(21);
        assert_eq!(
            validate(&catalog, &too_high, &lenient()).unwrap_err(),
            ValidationError::InvalidLevel {
                level: 21,
                max_level: Some(20),
            }
        );
    }

    #[test]
    fn rejects_level_zero() {
        let catalog = catalog();
        let request = BuildRequest::new("Warrior").with_level(0);
        assert!(matches!(
            validate(&catalog, &request, &lenient()),
            Err(ValidationError::InvalidLevel { level: 0, .. })
        ));
    }

    #[test]
    fn rejects_missing_prerequisite() {
        let catalog = catalog();
        let request = BuildRequest::new("Warrior").select("WhirlwindAttack");

        let err = validate(&catalog, &request, &lenient()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingPrerequisite {
                skill: "WhirlwindAttack".into(),
                missing: "PowerStrike".into(),
            }
        );
    }

    #[test]
    fn transitive_prerequisites_are_required() {
        let class = warrior().with_skill_points_per_level(5);
        let catalog = Catalog::build(&[class], &[combat_tree()]).unwrap();
        let request = BuildRequest::new("Warrior")
            .with_level(2)
            .select("Earthshaker")
            .select("WhirlwindAttack");

        let err = validate(&catalog, &request, &lenient()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingPrerequisite {
                skill: "Earthshaker".into(),
                missing: "PowerStrike".into(),
            }
        );
    }

    #[test]
    fn any_of_group_needs_one_member() {
        let catalog = catalog();

        let missing = BuildRequest::new("Warrior").select("Berserk");
        assert_eq!(
            validate(&catalog, &missing, &lenient()).unwrap_err(),
            ValidationError::UnsatisfiedAnyOf {
                skill: "Berserk".into(),
                options: vec!["IronSkin".into(), "WhirlwindAttack".into()],
            }
        );

        let satisfied = BuildRequest::new("Warrior")
            .select("Berserk")
            .select("IronSkin")
            .select("Toughness");
        assert!(validate(&catalog, &satisfied, &lenient()).is_ok());
    }

    #[test]
    fn rejects_unknown_class_and_skill() {
        let catalog = catalog();

        let err = validate(&catalog, &BuildRequest::new("Bard"), &lenient()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownClass {
                class: "Bard".into()
            }
        );

        let request = BuildRequest::new("Warrior").select("Fireball");
        let err = validate(&catalog, &request, &lenient()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownSkill {
                skill: "Fireball".into()
            }
        );
    }

    #[test]
    fn rejects_skill_from_foreign_tree() {
        let arcane = SkillTreeDefinition::new("arcane", "Arcane")
            .with_node(SkillNodeDefinition::new("Spark", 1, 1));
        let catalog = Catalog::build(&[warrior()], &[combat_tree(), arcane]).unwrap();
        let request = BuildRequest::new("Warrior").select("Spark");

        let err = validate(&catalog, &request, &lenient()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::SkillNotAllowed {
                skill: "Spark".into(),
                tree: "arcane".into(),
            }
        );
    }

    #[test]
    fn attribute_key_checks() {
        let catalog = catalog();

        let unknown = BuildRequest::new("Warrior").allocate("LUCK", 1);
        assert_eq!(
            validate(&catalog, &unknown, &lenient()).unwrap_err(),
            ValidationError::UnknownAttribute {
                attribute: "LUCK".into()
            }
        );

        let negative = BuildRequest::new("Warrior").allocate("DEX", -2);
        assert_eq!(
            validate(&catalog, &negative, &lenient()).unwrap_err(),
            ValidationError::NegativeAllocation {
                attribute: Attribute::Dex,
                points: -2,
            }
        );

        let twice = BuildRequest::new("Warrior").allocate("str", 1).allocate("STR", 1);
        assert_eq!(
            validate(&catalog, &twice, &lenient()).unwrap_err(),
            ValidationError::DuplicateAttribute {
                attribute: Attribute::Str
            }
        );
    }

    #[test]
    fn missing_attribute_keys_count_as_zero() {
        let catalog = catalog();
        let request = BuildRequest::new("Warrior").allocate("CON", 4);
        let build = validate(&catalog, &request, &lenient()).unwrap();
        assert_eq!(build.allocation().points(Attribute::Con), 4);
        assert_eq!(build.allocation().points(Attribute::Str), 0);
    }

    #[test]
    fn enforces_attribute_cap() {
        let class = warrior().with_attribute_cap(6);
        let catalog = Catalog::build(&[class], &[combat_tree()]).unwrap();
        let request = BuildRequest::new("Warrior").allocate("STR", 7);

        assert_eq!(
            validate(&catalog, &request, &lenient()).unwrap_err(),
            ValidationError::AttributeCapExceeded {
                attribute: Attribute::Str,
                cap: 6,
                points: 7,
            }
        );
    }

    #[test]
    fn duplicates_collapse_unless_strict() {
        let catalog = catalog();
        let request = BuildRequest::new("Warrior")
            .select("PowerStrike")
            .select("PowerStrike")
            .select("WhirlwindAttack");

        let build = validate(&catalog, &request, &lenient()).unwrap();
        assert_eq!(build.selection().len(), 2);
        assert_eq!(build.skill_cost(), 4);

        let err = validate(&catalog, &request, &ValidationOptions::strict()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateSkill {
                skill: "PowerStrike".into()
            }
        );
    }

    #[test]
    fn outcome_ignores_selection_order() {
        let catalog = catalog();
        let forward = BuildRequest::new("Warrior")
            .select("PowerStrike")
            .select("WhirlwindAttack");
        let reverse = BuildRequest::new("Warrior")
            .select("WhirlwindAttack")
            .select("PowerStrike");

        let a = validate(&catalog, &forward, &lenient()).unwrap();
        let b = validate(&catalog, &reverse, &lenient()).unwrap();
        assert_eq!(a.selection(), b.selection());
        assert_eq!(a.nodes(), b.nodes());
    }

    #[test]
    fn accepted_builds_respect_budgets_and_closure() {
        let catalog = catalog();
        let skills = [
            "PowerStrike",
            "Toughness",
            "WhirlwindAttack",
            "IronSkin",
            "Earthshaker",
            "Berserk",
        ];

        // Every subset of the tree, with and without a full allocation.
        for mask in 0u32..(1 << skills.len()) {
            for str_points in [0, 10, 11] {
                let mut request = BuildRequest::new("Warrior").allocate("STR", str_points);
                for (bit, skill) in skills.iter().enumerate() {
                    if mask & (1 << bit) != 0 {
                        request = request.select(*skill);
                    }
                }

                let Ok(build) = validate(&catalog, &request, &lenient()) else {
                    continue;
                };
                assert!(build.allocation().total() <= 10);
                assert!(build.skill_cost() <= 5);
                for &index in build.nodes() {
                    for prereq in catalog.closure(index) {
                        assert!(build.nodes().contains(prereq));
                    }
                }
            }
        }
    }

    #[test]
    fn appearance_keys_iterate_sorted() {
        let request: BuildRequest = serde_json::from_str(
            r#"{"class":"Warrior","appearance":{"hair":"red","build":"stocky","eyes":"grey"}}"#,
        )
        .unwrap();
        let catalog = catalog();
        let build = validate(&catalog, &request, &lenient()).unwrap();

        let keys: Vec<&str> = build.appearance().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["build", "eyes", "hair"]);
    }

    #[test]
    fn errors_serialize_with_kind_tag() {
        let err = ValidationError::MissingPrerequisite {
            skill: "WhirlwindAttack".into(),
            missing: "PowerStrike".into(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"missing_prerequisite","skill":"WhirlwindAttack","missing":"PowerStrike"}"#
        );
    }
}
