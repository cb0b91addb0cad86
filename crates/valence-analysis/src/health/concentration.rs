//! Over-concentration ("god node") detection.

use statrs::statistics::{Data, OrderStatistics};
use valence_core::constants::{
    CONCENTRATION_BASE_TOXICITY, CONCENTRATION_CONNECTIVITY_WEIGHT,
    CONCENTRATION_OUTLIER_BONUS, CONCENTRATION_RESPONSIBILITY_WEIGHT,
};

use super::types::{Finding, FindingKind, SeverityBands};
use crate::model::graph::Graph;

/// Limits a component must exceed on both axes to be flagged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcentrationLimits {
    pub max_connectivity: u32,
    pub max_responsibilities: u32,
    /// Connectivity percentile (1-100) marking graph-wide outliers.
    pub percentile: usize,
}

/// The `percentile`-th connectivity over all components. 0.0 for an empty graph.
pub fn connectivity_percentile(graph: &Graph, percentile: usize) -> f64 {
    let values: Vec<f64> = graph
        .all_components()
        .iter()
        .map(|c| c.connectivity() as f64)
        .collect();
    if values.is_empty() {
        return 0.0;
    }
    Data::new(values).percentile(percentile)
}

/// Flag components whose connectivity and responsibility count both exceed
/// their limits. Toxicity grows with the relative excess on each axis.
pub fn detect_over_concentration(
    graph: &Graph,
    limits: &ConcentrationLimits,
    bands: &SeverityBands,
) -> Vec<Finding> {
    let p = connectivity_percentile(graph, limits.percentile);
    let max_conn = limits.max_connectivity as f64;
    let max_resp = limits.max_responsibilities as f64;

    graph
        .all_components()
        .into_iter()
        .filter(|c| {
            c.connectivity() > limits.max_connectivity
                && c.responsibilities.len() > limits.max_responsibilities as usize
        })
        .map(|c| {
            let connectivity = c.connectivity() as f64;
            let responsibilities = c.responsibilities.len() as f64;
            let conn_excess = ((connectivity - max_conn) / max_conn).min(1.0);
            let resp_excess = ((responsibilities - max_resp) / max_resp).min(1.0);
            let normalized = connectivity / p.max(1.0);
            let outlier = normalized >= 1.0;

            let mut toxicity = CONCENTRATION_BASE_TOXICITY
                + CONCENTRATION_CONNECTIVITY_WEIGHT * conn_excess
                + CONCENTRATION_RESPONSIBILITY_WEIGHT * resp_excess;
            if outlier {
                toxicity += CONCENTRATION_OUTLIER_BONUS;
            }

            let rationale = format!(
                "{} has connectivity {} (limit {}, {:.2}x the p{} of {:.1}) and {} responsibilities (limit {})",
                c.id,
                c.connectivity(),
                limits.max_connectivity,
                normalized,
                limits.percentile,
                p,
                c.responsibilities.len(),
                limits.max_responsibilities,
            );
            Finding::new(
                FindingKind::OverConcentration,
                vec![c.id.clone()],
                toxicity,
                bands,
                rationale,
            )
        })
        .collect()
}
