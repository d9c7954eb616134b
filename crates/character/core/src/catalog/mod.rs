//! Rule Catalog: the validated, immutable view of all class and skill-tree
//! definitions.
//!
//! [`Catalog::build`] is the single trust boundary between configuration data
//! and the rest of the engine. Every structural invariant (unique ids,
//! resolvable references, acyclic prerequisites, strictly increasing tiers) is
//! checked here, so validation and resolution can rely on them.
//!
//! Skill nodes live in an arena indexed by [`SkillIndex`]; prerequisite edges
//! are index pairs. The catalog holds no interior mutability and is shared
//! across threads behind an `Arc`.

mod error;
mod graph;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::definition::{
    Attribute, ClassDefinition, ClassId, Modifier, Prerequisite, SkillId, SkillTreeDefinition,
    StatId, TreeId,
};
use graph::PrerequisiteGraph;

pub use error::{DefinitionError, DefinitionErrorKind};

/// Position of a skill node in the catalog arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SkillIndex(usize);

impl SkillIndex {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }

    const fn from_usize(index: usize) -> Self {
        Self(index)
    }
}

/// A resolved skill node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillNode {
    id: SkillId,
    name: String,
    tree: TreeId,
    tier: u32,
    cost: u32,
    requires: Vec<SkillIndex>,
    any_of: Vec<Vec<SkillIndex>>,
    modifiers: Vec<Modifier>,
}

impl SkillNode {
    pub fn id(&self) -> &SkillId {
        &self.id
    }

    /// Display name; falls back to the id when none was authored.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tree(&self) -> &TreeId {
        &self.tree
    }

    pub fn tier(&self) -> u32 {
        self.tier
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Direct prerequisites that must all be selected.
    pub fn requires(&self) -> &[SkillIndex] {
        &self.requires
    }

    /// Prerequisite groups of which at least one member must be selected.
    pub fn any_of(&self) -> &[Vec<SkillIndex>] {
        &self.any_of
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }
}

/// A resolved skill tree with nodes grouped by tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillTree {
    id: TreeId,
    name: String,
    tiers: BTreeMap<u32, Vec<SkillIndex>>,
}

impl SkillTree {
    pub fn id(&self) -> &TreeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nodes of one tier, in authoring order.
    pub fn tier(&self, tier: u32) -> &[SkillIndex] {
        self.tiers.get(&tier).map_or(&[], Vec::as_slice)
    }

    /// `(tier, nodes)` pairs in ascending tier order.
    pub fn tiers(&self) -> impl Iterator<Item = (u32, &[SkillIndex])> {
        self.tiers.iter().map(|(t, nodes)| (*t, nodes.as_slice()))
    }

    pub fn depth(&self) -> u32 {
        self.tiers.keys().next_back().copied().unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }
}

/// Validated, immutable class and skill definitions.
#[derive(Clone, Debug)]
pub struct Catalog {
    classes: HashMap<ClassId, Arc<ClassDefinition>>,
    class_order: Vec<ClassId>,
    trees: HashMap<TreeId, SkillTree>,
    tree_order: Vec<TreeId>,
    nodes: Vec<SkillNode>,
    by_id: HashMap<SkillId, SkillIndex>,
    edges: Vec<(SkillIndex, SkillIndex)>,
    closure: Vec<Vec<SkillIndex>>,
}

impl Catalog {
    /// Normalizes raw definitions into a catalog.
    ///
    /// Checks run in order: duplicate ids, dangling references, malformed
    /// nodes, cycles, tier ordering. The first failing check is reported with
    /// every offender it found.
    pub fn build(
        classes: &[ClassDefinition],
        trees: &[SkillTreeDefinition],
    ) -> Result<Self, DefinitionError> {
        check_duplicates(classes, trees)?;

        let mut nodes = Vec::new();
        let mut by_id = HashMap::new();
        for tree in trees {
            for def in &tree.nodes {
                let index = SkillIndex::from_usize(nodes.len());
                by_id.insert(def.id.clone(), index);
                nodes.push(SkillNode {
                    id: def.id.clone(),
                    name: def.name.clone().unwrap_or_else(|| def.id.to_string()),
                    tree: tree.id.clone(),
                    tier: def.tier,
                    cost: def.cost,
                    requires: Vec::new(),
                    any_of: Vec::new(),
                    modifiers: def.modifiers.iter().map(canonical_target).collect(),
                });
            }
        }

        // Dangling references: misfiled nodes, unknown class trees, and
        // prerequisites that are missing or live in another tree.
        let tree_ids: HashSet<&TreeId> = trees.iter().map(|t| &t.id).collect();
        let mut dangling: Vec<String> = classes
            .iter()
            .filter(|c| c.skill_trees.iter().any(|t| !tree_ids.contains(t)))
            .map(|c| c.id.to_string())
            .collect();

        let mut invalid = Vec::new();
        let mut position = 0;
        for tree in trees {
            for def in &tree.nodes {
                let index = position;
                position += 1;

                if def.tree.as_ref().is_some_and(|t| *t != tree.id) {
                    dangling.push(def.id.to_string());
                }
                if def.tier == 0 || def.modifiers.iter().any(|m| m.stat.is_empty()) {
                    invalid.push(def.id.to_string());
                }

                let lookup = |id: &SkillId| {
                    by_id
                        .get(id)
                        .copied()
                        .filter(|i: &SkillIndex| nodes[i.index()].tree == tree.id)
                };

                let mut requires = Vec::new();
                let mut any_of = Vec::new();
                for prerequisite in &def.prerequisites {
                    match prerequisite {
                        Prerequisite::Skill(id) => match lookup(id) {
                            Some(i) => requires.push(i),
                            None => dangling.push(def.id.to_string()),
                        },
                        Prerequisite::AnyOf(group) => {
                            if group.is_empty() {
                                invalid.push(def.id.to_string());
                            }
                            let mut members = Vec::with_capacity(group.len());
                            for id in group {
                                match lookup(id) {
                                    Some(i) => members.push(i),
                                    None => dangling.push(def.id.to_string()),
                                }
                            }
                            members.sort_by(|a, b| nodes[a.index()].id.cmp(&nodes[b.index()].id));
                            members.dedup();
                            any_of.push(members);
                        }
                    }
                }
                requires.sort();
                requires.dedup();
                nodes[index].requires = requires;
                nodes[index].any_of = any_of;
            }
        }

        if !dangling.is_empty() {
            return Err(DefinitionError::new(
                DefinitionErrorKind::DanglingReference,
                dangling,
            ));
        }
        if !invalid.is_empty() {
            return Err(DefinitionError::new(
                DefinitionErrorKind::InvalidNode,
                invalid,
            ));
        }

        let mut edges: Vec<(SkillIndex, SkillIndex)> = Vec::new();
        for (dependent, node) in nodes.iter().enumerate() {
            let prerequisites = node
                .requires
                .iter()
                .chain(node.any_of.iter().flatten());
            for &prerequisite in prerequisites {
                edges.push((prerequisite, SkillIndex::from_usize(dependent)));
            }
        }
        edges.sort_unstable();
        edges.dedup();

        let order = PrerequisiteGraph::new(nodes.len(), &edges)
            .topological_order()
            .map_err(|cyclic| {
                DefinitionError::new(
                    DefinitionErrorKind::CycleDetected,
                    cyclic.into_iter().map(|i| nodes[i.index()].id.to_string()),
                )
            })?;

        let tier_violations: Vec<String> = edges
            .iter()
            .filter(|(prereq, dependent)| {
                nodes[prereq.index()].tier >= nodes[dependent.index()].tier
            })
            .map(|(_, dependent)| nodes[dependent.index()].id.to_string())
            .collect();
        if !tier_violations.is_empty() {
            return Err(DefinitionError::new(
                DefinitionErrorKind::TierViolation,
                tier_violations,
            ));
        }

        let closure = graph::transitive_closure(&order, nodes.len(), |i| {
            nodes[i.index()].requires()
        })
        .into_iter()
        .map(|set| {
            let mut members: Vec<SkillIndex> = set.into_iter().collect();
            members.sort_by(|a, b| nodes[a.index()].id.cmp(&nodes[b.index()].id));
            members
        })
        .collect();

        let mut skill_trees = HashMap::with_capacity(trees.len());
        for tree in trees {
            let mut tiers: BTreeMap<u32, Vec<SkillIndex>> = BTreeMap::new();
            for def in &tree.nodes {
                if let Some(&index) = by_id.get(&def.id) {
                    tiers.entry(def.tier).or_default().push(index);
                }
            }
            skill_trees.insert(
                tree.id.clone(),
                SkillTree {
                    id: tree.id.clone(),
                    name: tree.name.clone(),
                    tiers,
                },
            );
        }
        let mut tree_order: Vec<TreeId> = trees.iter().map(|t| t.id.clone()).collect();
        tree_order.sort();

        let mut class_order: Vec<ClassId> = classes.iter().map(|c| c.id.clone()).collect();
        class_order.sort();

        Ok(Self {
            classes: classes
                .iter()
                .map(|c| (c.id.clone(), Arc::new(c.clone())))
                .collect(),
            class_order,
            trees: skill_trees,
            tree_order,
            nodes,
            by_id,
            edges,
            closure,
        })
    }

    pub fn class(&self, id: &str) -> Option<&Arc<ClassDefinition>> {
        self.classes.get(id)
    }

    /// Classes in ascending id order.
    pub fn classes(&self) -> impl Iterator<Item = &Arc<ClassDefinition>> {
        self.class_order.iter().filter_map(|id| self.classes.get(id))
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn tree(&self, id: &str) -> Option<&SkillTree> {
        self.trees.get(id)
    }

    /// Trees in ascending id order.
    pub fn trees(&self) -> impl Iterator<Item = &SkillTree> {
        self.tree_order.iter().filter_map(|id| self.trees.get(id))
    }

    pub fn skill(&self, id: &str) -> Option<&SkillNode> {
        self.skill_index(id).map(|i| self.node(i))
    }

    pub fn skill_index(&self, id: &str) -> Option<SkillIndex> {
        self.by_id.get(id).copied()
    }

    /// Node at an index produced by this catalog.
    ///
    /// # Panics
    ///
    /// Panics if `index` came from a different catalog with more nodes.
    pub fn node(&self, index: SkillIndex) -> &SkillNode {
        &self.nodes[index.index()]
    }

    /// All nodes in arena order.
    pub fn skills(&self) -> impl Iterator<Item = (SkillIndex, &SkillNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (SkillIndex::from_usize(i), n))
    }

    pub fn skill_count(&self) -> usize {
        self.nodes.len()
    }

    /// `(prerequisite, dependent)` pairs, including any-of members.
    pub fn edges(&self) -> &[(SkillIndex, SkillIndex)] {
        &self.edges
    }

    /// Every skill transitively required by `index` through all-of edges,
    /// in ascending id order.
    pub fn closure(&self, index: SkillIndex) -> &[SkillIndex] {
        &self.closure[index.index()]
    }

    /// Closure by id, for callers that do not hold indices.
    pub fn prerequisite_closure(&self, id: &str) -> Option<BTreeSet<&SkillId>> {
        let index = self.skill_index(id)?;
        Some(self.closure(index).iter().map(|i| self.node(*i).id()).collect())
    }
}

/// Attribute targets match in any ASCII case, like allocation keys; store
/// them under the canonical upper-case id so they land on the attribute.
fn canonical_target(modifier: &Modifier) -> Modifier {
    match Attribute::parse(modifier.stat.as_str()) {
        Some(attribute) => Modifier {
            stat: StatId::from(attribute),
            ..modifier.clone()
        },
        None => modifier.clone(),
    }
}

fn check_duplicates(
    classes: &[ClassDefinition],
    trees: &[SkillTreeDefinition],
) -> Result<(), DefinitionError> {
    fn repeated<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut seen = HashSet::new();
        ids.filter(|id| !seen.insert(*id)).map(str::to_owned).collect()
    }

    let mut duplicates = repeated(classes.iter().map(|c| c.id.as_str()));
    duplicates.extend(repeated(trees.iter().map(|t| t.id.as_str())));
    duplicates.extend(repeated(
        trees.iter().flat_map(|t| t.nodes.iter()).map(|n| n.id.as_str()),
    ));

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(DefinitionError::new(
            DefinitionErrorKind::DuplicateIdentifier,
            duplicates,
        ))
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use crate::definition::SkillNodeDefinition;
    use crate::test_fixtures::warrior;
    use proptest::prelude::*;
    use proptest::sample::Index;

    /// `(prerequisite, dependent, in_any_of_group)`
    type Edge = (usize, usize, bool);

    fn skill(index: usize) -> String {
        format!("S{index:02}")
    }

    /// Random tiers plus a random subset of the tier-increasing edges.
    fn tiered_dag() -> impl Strategy<Value = (Vec<u32>, Vec<Edge>)> {
        prop::collection::vec(1u32..=5, 1..12)
            .prop_flat_map(|tiers| {
                let n = tiers.len();
                let pairs: Vec<(usize, usize)> = (0..n)
                    .flat_map(|i| (0..n).map(move |j| (i, j)))
                    .filter(|&(i, j)| tiers[i] < tiers[j])
                    .collect();
                let picks = prop::collection::vec((any::<bool>(), any::<bool>()), pairs.len());
                (Just(tiers), Just(pairs), picks)
            })
            .prop_map(|(tiers, pairs, picks)| {
                let edges = pairs
                    .into_iter()
                    .zip(picks)
                    .filter(|(_, (keep, _))| *keep)
                    .map(|((i, j), (_, any_of))| (i, j, any_of))
                    .collect();
                (tiers, edges)
            })
    }

    fn tree(tiers: &[u32], edges: &[Edge]) -> SkillTreeDefinition {
        let mut tree = SkillTreeDefinition::new("combat", "Combat");
        for (j, &tier) in tiers.iter().enumerate() {
            let mut node = SkillNodeDefinition::new(skill(j), tier, 1);
            let group: Vec<String> = edges
                .iter()
                .filter(|&&(_, d, any_of)| d == j && any_of)
                .map(|&(p, _, _)| skill(p))
                .collect();
            for &(p, _, _) in edges.iter().filter(|&&(_, d, any_of)| d == j && !any_of) {
                node = node.requires(skill(p));
            }
            if !group.is_empty() {
                node = node.requires_any(group);
            }
            tree = tree.with_node(node);
        }
        tree
    }

    proptest! {
        #[test]
        fn acyclic_tiered_definitions_build((tiers, edges) in tiered_dag()) {
            let catalog = Catalog::build(&[warrior()], &[tree(&tiers, &edges)])
                .map_err(|err| TestCaseError::fail(err.to_string()))?;

            prop_assert_eq!(catalog.skill_count(), tiers.len());
            for (index, node) in catalog.skills() {
                for &prerequisite in catalog.closure(index) {
                    prop_assert!(catalog.node(prerequisite).tier() < node.tier());
                }
            }
        }

        #[test]
        fn reversed_edge_is_a_cycle((tiers, edges) in tiered_dag(), pick in any::<Index>()) {
            prop_assume!(!edges.is_empty());
            let (p, d, _) = edges[pick.index(edges.len())];
            let mut cyclic = edges.clone();
            cyclic.push((d, p, false));

            let err = Catalog::build(&[warrior()], &[tree(&tiers, &cyclic)]).unwrap_err();
            prop_assert_eq!(err.kind(), DefinitionErrorKind::CycleDetected);
            prop_assert!(err.names(&skill(p)) && err.names(&skill(d)));
        }

        #[test]
        fn non_increasing_edge_is_rejected(
            (tiers, edges) in tiered_dag(),
            a in any::<Index>(),
            b in any::<Index>(),
        ) {
            let (mut prerequisite, mut dependent) = (a.index(tiers.len()), b.index(tiers.len()));
            if tiers[prerequisite] < tiers[dependent] {
                std::mem::swap(&mut prerequisite, &mut dependent);
            }
            let mut broken = edges.clone();
            broken.push((prerequisite, dependent, false));

            // Existing edges only climb tiers, so a cycle needs a self-edge.
            let err = Catalog::build(&[warrior()], &[tree(&tiers, &broken)]).unwrap_err();
            let expected = if prerequisite == dependent {
                DefinitionErrorKind::CycleDetected
            } else {
                DefinitionErrorKind::TierViolation
            };
            prop_assert_eq!(err.kind(), expected);
            prop_assert!(err.names(&skill(dependent)));
        }
    }
}
