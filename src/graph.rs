//! Dependency graph module.
//!
//! Provides the `StatGraph` type, which represents stat dependencies
//! as a directed acyclic graph (DAG). Used by the resolver to determine
//! the order in which stats are resolved.

use crate::error::StatError;
use crate::stat_id::StatId;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};

/// A directed graph of stat dependencies.
///
/// If stat A depends on stat B, there is an edge B → A and B is resolved
/// before A.
///
/// # Examples
///
/// ```rust
/// use dinoarena::graph::StatGraph;
/// use dinoarena::StatId;
///
/// let mut graph = StatGraph::new();
///
/// // attack reads length_score
/// graph.add_edge(StatId::attack(), StatId::length_score());
///
/// let order = graph.topological_sort().unwrap();
/// let score_pos = order.iter().position(|s| *s == StatId::length_score()).unwrap();
/// let attack_pos = order.iter().position(|s| *s == StatId::attack()).unwrap();
/// assert!(score_pos < attack_pos);
/// ```
pub struct StatGraph {
    graph: DiGraph<StatId, ()>,
    node_map: HashMap<StatId, NodeIndex>,
}

impl StatGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Add a node if it doesn't exist yet, returning its index.
    pub fn add_node(&mut self, stat_id: StatId) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&stat_id) {
            idx
        } else {
            let idx = self.graph.add_node(stat_id.clone());
            self.node_map.insert(stat_id, idx);
            idx
        }
    }

    /// Record that `from` depends on `to` (`to` must be resolved first).
    ///
    /// Both nodes are added to the graph if they don't exist.
    pub fn add_edge(&mut self, from: StatId, to: StatId) {
        let from_idx = self.add_node(from);
        let to_idx = self.add_node(to);
        self.graph.add_edge(to_idx, from_idx, ());
    }

    pub fn contains_node(&self, stat_id: &StatId) -> bool {
        self.node_map.contains_key(stat_id)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Resolution order: every stat comes after the stats it depends on.
    ///
    /// Fails with `StatError::Cycle` carrying one cycle path, closed on its
    /// first stat.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dinoarena::graph::StatGraph;
    /// use dinoarena::{StatError, StatId};
    ///
    /// let mut graph = StatGraph::new();
    /// let a = StatId::from_str("A");
    /// let b = StatId::from_str("B");
    ///
    /// graph.add_edge(b.clone(), a.clone());
    /// assert!(graph.topological_sort().is_ok());
    ///
    /// graph.add_edge(a.clone(), b.clone());
    /// assert!(matches!(graph.topological_sort(), Err(StatError::Cycle { .. })));
    /// ```
    pub fn topological_sort(&self) -> Result<Vec<StatId>, StatError> {
        match toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .into_iter()
                .map(|idx| self.graph[idx].clone())
                .collect()),
            Err(cycle) => Err(StatError::Cycle {
                path: self.cycle_through(cycle.node_id()),
            }),
        }
    }

    /// Shortest loop from `start` back to itself, kept inside the strongly
    /// connected component that `start` belongs to.
    fn cycle_through(&self, start: NodeIndex) -> Vec<StatId> {
        let component: HashSet<NodeIndex> = tarjan_scc(&self.graph)
            .into_iter()
            .find(|scc| scc.contains(&start))
            .unwrap_or_default()
            .into_iter()
            .collect();

        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for next in self.graph.neighbors(node) {
                if next == start {
                    let mut path = vec![start];
                    let mut current = node;
                    while current != start {
                        path.push(current);
                        match parent.get(&current) {
                            Some(&prev) => current = prev,
                            None => break,
                        }
                    }
                    path.push(start);
                    path.reverse();
                    return path.into_iter().map(|idx| self.graph[idx].clone()).collect();
                }
                if component.contains(&next) && !parent.contains_key(&next) {
                    parent.insert(next, node);
                    queue.push_back(next);
                }
            }
        }

        vec![self.graph[start].clone()]
    }
}

impl Default for StatGraph {
    fn default() -> Self {
        Self::new()
    }
}
