//! Stability/toxicity scorer.
//!
//! overall_toxicity = min(1, Σ toxᵢ·wᵢ / N), wᵢ = distinct components in
//! finding i, N = components in the graph. Every finding adds a non-negative
//! term, so adding a finding never lowers the score.
//!
//! The result is the share of the whole system that is affected. A single
//! critical 2-cycle among 10,000 components scores about 0.0002, so large
//! graphs read as healthy overall. Use `per_component` and the finding
//! severities for the local picture.
//!
//! overall_stability = (1 − overall_toxicity) · (1 − f), f = share of edges
//! that are Covalent yet unstable.
//!
//! per_component[id] = 1 − Π(1 − toxᵢ) over findings naming id.

use valence_core::config::ScoringConfig;
use valence_core::errors::ConfigError;
use valence_core::types::collections::{BTreeMap, FxHashSet};

use super::types::SystemScore;
use crate::bonds::types::{unit, BondDistribution};
use crate::health::types::Finding;
use crate::model::graph::Graph;

/// Aggregates findings and bond annotations into a [`SystemScore`].
#[derive(Debug, Clone)]
pub struct Scorer {
    unstable_bond_threshold: f64,
}

impl Scorer {
    pub fn new(config: &ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            unstable_bond_threshold: config.effective_unstable_bond_threshold(),
        })
    }

    pub fn score(&self, graph: &Graph, findings: &[Finding]) -> SystemScore {
        let overall_toxicity = overall_toxicity(graph.component_count(), findings);

        let mut bond_distribution = BondDistribution::default();
        let mut unstable_covalent_edges = 0;
        for edge in graph.all_edges() {
            bond_distribution.record(edge.bond);
            if let Some(bond) = edge.bond {
                if bond.is_covalent() && bond.stability < self.unstable_bond_threshold {
                    unstable_covalent_edges += 1;
                }
            }
        }
        let unstable_fraction = if graph.edge_count() == 0 {
            0.0
        } else {
            unstable_covalent_edges as f64 / graph.edge_count() as f64
        };
        let overall_stability = unit((1.0 - overall_toxicity) * (1.0 - unstable_fraction));

        let per_component = per_component(graph, findings);

        tracing::debug!(
            overall_toxicity,
            overall_stability,
            unstable_covalent_edges,
            "system scored"
        );

        SystemScore {
            overall_stability,
            overall_toxicity,
            per_component,
            bond_distribution,
            unstable_covalent_edges,
        }
    }
}

/// Component-weighted toxicity, normalized by graph size.
pub fn overall_toxicity(component_count: usize, findings: &[Finding]) -> f64 {
    if component_count == 0 {
        return 0.0;
    }
    let weighted: f64 = findings
        .iter()
        .map(|f| {
            let distinct: FxHashSet<&str> = f.components.iter().map(String::as_str).collect();
            f.toxicity * distinct.len() as f64
        })
        .sum();
    unit(weighted / component_count as f64)
}

fn per_component(graph: &Graph, findings: &[Finding]) -> BTreeMap<String, f64> {
    let mut clean: BTreeMap<String, f64> = graph
        .all_components()
        .into_iter()
        .map(|c| (c.id.clone(), 1.0))
        .collect();
    for finding in findings {
        let distinct: FxHashSet<&str> = finding.components.iter().map(String::as_str).collect();
        for id in distinct {
            // findings may name components outside this graph
            let survival = clean.entry(id.to_string()).or_insert(1.0);
            *survival *= 1.0 - finding.toxicity;
        }
    }
    clean
        .into_iter()
        .map(|(id, survival)| (id, unit(1.0 - survival)))
        .collect()
}
