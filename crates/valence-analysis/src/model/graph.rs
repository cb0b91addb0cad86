//! The component graph: an immutable directed graph built in one ingestion.

use std::collections::VecDeque;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use valence_core::errors::ValidationError;
use valence_core::types::collections::{FxHashMap, FxHashSet};

use super::types::{Component, Edge};
use crate::bonds::types::Bond;

/// Directed interaction graph over components.
///
/// Simple by construction: no self-loops, at most one edge per ordered pair,
/// every edge endpoint is a known component. Node and edge indices follow
/// ingestion order, which is the order every accessor reports.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    graph: DiGraph<Component, Option<Bond>>,
    node_index: FxHashMap<String, NodeIndex>,
}

/// Borrowed view of one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub bond: Option<&'a Bond>,
}

impl EdgeView<'_> {
    pub fn to_edge(&self) -> Edge {
        Edge {
            source: self.source.to_string(),
            target: self.target.to_string(),
            bond: self.bond.copied(),
        }
    }
}

impl Graph {
    /// Build a graph from components and edges.
    ///
    /// Fails on the first empty or duplicate component id, invalid throughput,
    /// dangling edge endpoint, self-loop, or duplicate ordered pair. Input
    /// `fan_in`/`fan_out` values are discarded and recomputed.
    pub fn ingest(components: Vec<Component>, edges: Vec<Edge>) -> Result<Graph, ValidationError> {
        let mut graph = DiGraph::with_capacity(components.len(), edges.len());
        let mut node_index: FxHashMap<String, NodeIndex> = FxHashMap::default();
        node_index.reserve(components.len());

        for mut component in components {
            if component.id.is_empty() {
                return Err(ValidationError::EmptyComponentId);
            }
            if !component.throughput.is_finite() || component.throughput < 0.0 {
                return Err(ValidationError::InvalidThroughput {
                    id: component.id,
                    value: component.throughput,
                });
            }
            if node_index.contains_key(&component.id) {
                return Err(ValidationError::DuplicateComponent { id: component.id });
            }
            component.fan_in = 0;
            component.fan_out = 0;
            let id = component.id.clone();
            let idx = graph.add_node(component);
            node_index.insert(id, idx);
        }

        let mut seen: FxHashSet<(NodeIndex, NodeIndex)> = FxHashSet::default();
        for edge in edges {
            let lookup = |id: &str| {
                node_index
                    .get(id)
                    .copied()
                    .ok_or_else(|| ValidationError::DanglingEdge {
                        source_id: edge.source.clone(),
                        target_id: edge.target.clone(),
                        missing: id.to_string(),
                    })
            };
            let source = lookup(&edge.source)?;
            let target = lookup(&edge.target)?;
            if source == target {
                return Err(ValidationError::SelfLoop { id: edge.source });
            }
            if !seen.insert((source, target)) {
                return Err(ValidationError::DuplicateEdge {
                    source_id: edge.source,
                    target_id: edge.target,
                });
            }
            graph.add_edge(source, target, edge.bond.map(Bond::normalized));
            graph[source].fan_out += 1;
            graph[target].fan_in += 1;
        }

        tracing::debug!(
            components = graph.node_count(),
            edges = graph.edge_count(),
            "graph ingested"
        );

        Ok(Graph { graph, node_index })
    }

    pub fn component_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.node_index.get(id).map(|&idx| &self.graph[idx])
    }

    /// The edge `source -> target`, if present.
    pub fn edge(&self, source: &str, target: &str) -> Option<EdgeView<'_>> {
        let s = self.node(source)?;
        let t = self.node(target)?;
        let e = self.graph.find_edge(s, t)?;
        Some(self.edge_view(s, t, e))
    }

    /// Neighbor ids in `direction`, ordered by edge insertion.
    pub fn neighbors(&self, id: &str, direction: Direction) -> Result<Vec<&str>, ValidationError> {
        let idx = self.require(id)?;
        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), other)
            })
            .collect();
        edges.sort_unstable_by_key(|(e, _)| *e);
        Ok(edges
            .into_iter()
            .map(|(_, n)| self.graph[n].id.as_str())
            .collect())
    }

    /// Every component, in ingestion order.
    pub fn all_components(&self) -> Vec<&Component> {
        self.graph.node_weights().collect()
    }

    /// Every edge, in ingestion order.
    pub fn all_edges(&self) -> Vec<EdgeView<'_>> {
        self.graph
            .edge_references()
            .map(|e| self.edge_view(e.source(), e.target(), e.id()))
            .collect()
    }

    /// Shortest hop count from `from` to `to` following edge direction.
    /// `Some(0)` for the same component, `None` when unreachable.
    pub fn hops(&self, from: &str, to: &str) -> Result<Option<usize>, ValidationError> {
        let start = self.require(from)?;
        let goal = self.require(to)?;
        if start == goal {
            return Ok(Some(0));
        }

        let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();
        let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();
        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((node, depth)) = queue.pop_front() {
            for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
                if next == goal {
                    return Ok(Some(depth + 1));
                }
                if visited.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            }
        }
        Ok(None)
    }

    /// Copy of this graph with edge annotations replaced.
    /// `bonds` is indexed by edge insertion order.
    pub(crate) fn with_bonds(&self, bonds: Vec<Bond>) -> Graph {
        let mut annotated = self.clone();
        for (i, bond) in bonds.into_iter().enumerate() {
            if let Some(weight) = annotated.graph.edge_weight_mut(EdgeIndex::new(i)) {
                *weight = Some(bond);
            }
        }
        annotated
    }

    pub(crate) fn inner(&self) -> &DiGraph<Component, Option<Bond>> {
        &self.graph
    }

    pub(crate) fn node(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    fn require(&self, id: &str) -> Result<NodeIndex, ValidationError> {
        self.node(id)
            .ok_or_else(|| ValidationError::UnknownComponent { id: id.to_string() })
    }

    fn edge_view(&self, s: NodeIndex, t: NodeIndex, e: EdgeIndex) -> EdgeView<'_> {
        EdgeView {
            source: &self.graph[s].id,
            target: &self.graph[t].id,
            bond: self.graph[e].as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Role;

    fn chain() -> Graph {
        Graph::ingest(
            vec![
                Component::new("a", Role::Connector),
                Component::new("b", Role::Aggregate),
                Component::new("c", Role::GenesisEvent),
            ],
            vec![Edge::new("a", "b"), Edge::new("b", "c")],
        )
        .unwrap()
    }

    #[test]
    fn fan_counts_recomputed() {
        let mut stale = Component::new("a", Role::Connector);
        stale.fan_out = 99;
        let graph = Graph::ingest(
            vec![stale, Component::new("b", Role::Aggregate)],
            vec![Edge::new("a", "b")],
        )
        .unwrap();
        assert_eq!(graph.component("a").unwrap().fan_out, 1);
        assert_eq!(graph.component("b").unwrap().fan_in, 1);
    }

    #[test]
    fn hops_follow_direction() {
        let graph = chain();
        assert_eq!(graph.hops("a", "a").unwrap(), Some(0));
        assert_eq!(graph.hops("a", "c").unwrap(), Some(2));
        assert_eq!(graph.hops("c", "a").unwrap(), None);
        assert!(graph.hops("a", "zzz").is_err());
    }

    #[test]
    fn with_bonds_leaves_source_untouched() {
        let graph = chain();
        let bond = Bond {
            bond_type: crate::bonds::types::BondType::Ionic,
            raw_strength: 10.0,
            strength: 0.5,
            stability: 1.0,
        };
        let annotated = graph.with_bonds(vec![bond, bond]);
        assert!(graph.all_edges().iter().all(|e| e.bond.is_none()));
        assert!(annotated.all_edges().iter().all(|e| e.bond.is_some()));
    }
}
