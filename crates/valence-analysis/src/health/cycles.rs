//! Circular dependency detection via Tarjan's SCC.
//!
//! Large graphs are split into weakly connected components first; each one
//! runs Tarjan independently on rayon.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rayon::prelude::*;
use valence_core::constants::{CYCLE_BASE_TOXICITY, CYCLE_TOXICITY_PER_MEMBER};
use valence_core::types::collections::FxHashMap;

use super::types::{Finding, FindingKind, SeverityBands};
use crate::model::graph::Graph;

/// Every SCC with two or more members, each sorted by ingestion order.
pub fn find_cycles(graph: &Graph, parallel_node_threshold: usize) -> Vec<Vec<NodeIndex>> {
    let g = graph.inner();
    let mut cycles: Vec<Vec<NodeIndex>> = if g.node_count() >= parallel_node_threshold {
        per_weak_component(g)
    } else {
        tarjan_scc(g).into_iter().filter(|scc| scc.len() > 1).collect()
    };
    for cycle in &mut cycles {
        cycle.sort_unstable();
    }
    cycles.sort_unstable();
    cycles
}

/// One CircularDependency finding per SCC.
pub fn detect_cycles(
    graph: &Graph,
    parallel_node_threshold: usize,
    bands: &SeverityBands,
) -> Vec<Finding> {
    let g = graph.inner();
    find_cycles(graph, parallel_node_threshold)
        .into_iter()
        .map(|members| {
            let k = members.len();
            let ids: Vec<String> = members.iter().map(|&n| g[n].id.clone()).collect();
            let toxicity = (CYCLE_BASE_TOXICITY + CYCLE_TOXICITY_PER_MEMBER * k as f64).min(1.0);
            let rationale = format!(
                "{k} components are mutually reachable ({}); none can change or deploy independently",
                ids.join(", ")
            );
            Finding::new(FindingKind::CircularDependency, ids, toxicity, bands, rationale)
        })
        .collect()
}

fn per_weak_component<N: Sync, E: Sync>(g: &DiGraph<N, E>) -> Vec<Vec<NodeIndex>> {
    let mut uf: UnionFind<usize> = UnionFind::new(g.node_count());
    for e in g.edge_references() {
        uf.union(e.source().index(), e.target().index());
    }
    let labels = uf.into_labeling();

    let mut groups: FxHashMap<usize, Vec<NodeIndex>> = FxHashMap::default();
    for n in g.node_indices() {
        groups.entry(labels[n.index()]).or_default().push(n);
    }
    let groups: Vec<Vec<NodeIndex>> = groups.into_values().filter(|m| m.len() > 1).collect();

    tracing::debug!(weak_components = groups.len(), "cycle detection split");

    groups
        .par_iter()
        .flat_map_iter(|members| cycles_within(g, members))
        .collect()
}

/// Tarjan over the subgraph induced by `members`.
fn cycles_within<N, E>(g: &DiGraph<N, E>, members: &[NodeIndex]) -> Vec<Vec<NodeIndex>> {
    let mut local: DiGraph<NodeIndex, ()> = DiGraph::with_capacity(members.len(), members.len());
    let mut to_local: FxHashMap<NodeIndex, NodeIndex> = FxHashMap::default();
    for &n in members {
        to_local.insert(n, local.add_node(n));
    }
    for (i, &n) in members.iter().enumerate() {
        for m in g.neighbors_directed(n, Direction::Outgoing) {
            if let Some(&t) = to_local.get(&m) {
                local.add_edge(NodeIndex::new(i), t, ());
            }
        }
    }
    tarjan_scc(&local)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| scc.into_iter().map(|i| local[i]).collect())
        .collect()
}
