//! Report assembly. Pure aggregation over already-computed results.

use valence_core::constants::VERSION;

use super::types::{AnalysisReport, ComponentReport, ReportSummary, SeverityCounts};
use crate::health::types::Finding;
use crate::model::graph::Graph;
use crate::patterns::types::ValidationOutcome;
use crate::scoring::types::SystemScore;

/// Combine the outputs of one run into an [`AnalysisReport`].
///
/// Components and edges are listed in ingestion order; findings and
/// validations keep the order they were given in.
pub fn assemble(
    graph: &Graph,
    findings: Vec<Finding>,
    score: SystemScore,
    validations: Vec<ValidationOutcome>,
) -> AnalysisReport {
    let components: Vec<ComponentReport> = graph
        .all_components()
        .into_iter()
        .map(|c| ComponentReport {
            id: c.id.clone(),
            kind: c.kind.clone(),
            responsibilities: c.responsibilities.clone(),
            throughput: c.throughput,
            fan_in: c.fan_in,
            fan_out: c.fan_out,
            connectivity: c.connectivity(),
            toxicity: score.per_component.get(&c.id).copied().unwrap_or(0.0),
            finding_count: findings.iter().filter(|f| f.involves(&c.id)).count(),
        })
        .collect();

    let edges = graph.all_edges().iter().map(|e| e.to_edge()).collect();

    let mut severity_counts = SeverityCounts::default();
    for finding in &findings {
        severity_counts.record(finding.severity);
    }
    let traces_matched = validations.iter().filter(|v| v.is_match()).count();

    let summary = ReportSummary {
        version: VERSION.to_string(),
        component_count: graph.component_count(),
        edge_count: graph.edge_count(),
        finding_count: findings.len(),
        severity_counts,
        traces_matched,
        traces_rejected: validations.len() - traces_matched,
        valency_unbalanced: 0,
    };

    AnalysisReport {
        summary,
        components,
        edges,
        findings,
        score,
        validations,
        valency: Vec::new(),
    }
}
