//! Prerequisite graph over arena indices.
//!
//! Edges point from a prerequisite to the skill that depends on it, so a
//! topological order lists prerequisites first.

use std::collections::BTreeSet;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};

use super::SkillIndex;

/// Node `i` of the graph carries `SkillIndex(i)`.
pub(crate) struct PrerequisiteGraph {
    graph: DiGraph<SkillIndex, (), usize>,
}

impl PrerequisiteGraph {
    pub(crate) fn new(node_count: usize, edges: &[(SkillIndex, SkillIndex)]) -> Self {
        let mut graph = DiGraph::with_capacity(node_count, edges.len());
        for index in 0..node_count {
            graph.add_node(SkillIndex::from_usize(index));
        }
        for &(prerequisite, dependent) in edges {
            graph.update_edge(
                NodeIndex::new(prerequisite.index()),
                NodeIndex::new(dependent.index()),
                (),
            );
        }
        Self { graph }
    }

    /// Prerequisites-first order, or every node that lies on a cycle in
    /// ascending index order.
    pub(crate) fn topological_order(&self) -> Result<Vec<SkillIndex>, Vec<SkillIndex>> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order.into_iter().map(|node| self.graph[node]).collect()),
            Err(_) => Err(self.cycle_members()),
        }
    }

    /// Members of non-trivial strongly connected components plus self-loops.
    /// Nodes merely downstream of a cycle are not included.
    fn cycle_members(&self) -> Vec<SkillIndex> {
        let mut members: Vec<SkillIndex> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|&node| self.graph.contains_edge(node, node))
            })
            .flatten()
            .map(|node| self.graph[node])
            .collect();
        members.sort_unstable();
        members
    }
}

/// Transitive closure of `requires`, computed along a topological `order`.
pub(crate) fn transitive_closure<'a>(
    order: &[SkillIndex],
    node_count: usize,
    requires: impl Fn(SkillIndex) -> &'a [SkillIndex],
) -> Vec<BTreeSet<SkillIndex>> {
    let mut closure = vec![BTreeSet::new(); node_count];
    for &node in order {
        let mut set = BTreeSet::new();
        for &prerequisite in requires(node) {
            set.insert(prerequisite);
            set.extend(closure[prerequisite.index()].iter().copied());
        }
        closure[node.index()] = set;
    }
    closure
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ix(index: usize) -> SkillIndex {
        SkillIndex::from_usize(index)
    }

    fn graph(node_count: usize, edges: &[(usize, usize)]) -> PrerequisiteGraph {
        let edges: Vec<_> = edges.iter().map(|&(p, d)| (ix(p), ix(d))).collect();
        PrerequisiteGraph::new(node_count, &edges)
    }

    #[test]
    fn orders_prerequisites_first() {
        let order = graph(3, &[(2, 1), (1, 0)]).topological_order().unwrap();
        assert_eq!(order, vec![ix(2), ix(1), ix(0)]);
    }

    #[test]
    fn order_respects_every_edge() {
        let edges = [(0, 3), (3, 1), (0, 2), (2, 1), (4, 1)];
        let order = graph(5, &edges).topological_order().unwrap();
        let position = |i: usize| order.iter().position(|n| *n == ix(i)).unwrap();
        for (prerequisite, dependent) in edges {
            assert!(position(prerequisite) < position(dependent));
        }
    }

    #[test]
    fn reports_only_cycle_members() {
        // 0 -> 1 -> 2 -> 1, 2 -> 3
        let cyclic = graph(4, &[(0, 1), (1, 2), (2, 1), (2, 3)])
            .topological_order()
            .unwrap_err();
        assert_eq!(cyclic, vec![ix(1), ix(2)]);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let cyclic = graph(2, &[(1, 1)]).topological_order().unwrap_err();
        assert_eq!(cyclic, vec![ix(1)]);
    }

    #[test]
    fn closure_is_transitive() {
        let requires = vec![vec![], vec![ix(0)], vec![ix(1)], vec![ix(0)]];
        let order = graph(4, &[(0, 1), (1, 2), (0, 3)]).topological_order().unwrap();
        let closure = transitive_closure(&order, requires.len(), |i| requires[i.index()].as_slice());
        assert_eq!(closure[2], BTreeSet::from([ix(0), ix(1)]));
        assert_eq!(closure[3], BTreeSet::from([ix(0)]));
        assert!(closure[0].is_empty());
    }
}
