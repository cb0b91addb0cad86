//! Inappropriate intimacy: bidirectional tight coupling between two
//! components that do not own each other.

use petgraph::visit::EdgeRef;

use super::types::{Finding, FindingKind, SeverityBands};
use crate::model::graph::Graph;

/// Flag each unordered pair with edges both ways, at least one of them
/// Covalent, where neither side lists the other as a responsibility.
/// Toxicity is the stronger direction's strength. Unclassified edges never fire.
pub fn detect_intimacy(graph: &Graph, bands: &SeverityBands) -> Vec<Finding> {
    let g = graph.inner();
    let mut findings = Vec::new();

    for forward in g.edge_references() {
        let (a, b) = (forward.source(), forward.target());
        // visit each unordered pair once, from its lower-indexed end
        if a > b {
            continue;
        }
        let Some(back) = g.find_edge(b, a) else {
            continue;
        };
        let (Some(ab), Some(ba)) = (forward.weight().as_ref(), g[back].as_ref()) else {
            continue;
        };
        if !(ab.is_covalent() || ba.is_covalent()) {
            continue;
        }
        let (ca, cb) = (&g[a], &g[b]);
        if ca.is_responsible_for(&cb.id) || cb.is_responsible_for(&ca.id) {
            continue;
        }

        let toxicity = ab.strength.max(ba.strength);
        let rationale = format!(
            "{} and {} are coupled both ways ({} {:.2} / {} {:.2}) without either owning the other",
            ca.id, cb.id, ab.bond_type, ab.strength, ba.bond_type, ba.strength,
        );
        findings.push(Finding::new(
            FindingKind::InappropriateIntimacy,
            vec![ca.id.clone(), cb.id.clone()],
            toxicity,
            bands,
            rationale,
        ));
    }
    findings
}
