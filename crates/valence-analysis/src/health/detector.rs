//! Structural health detector: runs every detector over an annotated graph.

use valence_core::config::HealthConfig;
use valence_core::errors::ConfigError;

use super::concentration::{detect_over_concentration, ConcentrationLimits};
use super::cycles::detect_cycles;
use super::intimacy::detect_intimacy;
use super::types::{Finding, SeverityBands};
use crate::model::graph::Graph;

/// Read-only detector over a classified graph.
#[derive(Debug, Clone)]
pub struct HealthDetector {
    limits: ConcentrationLimits,
    bands: SeverityBands,
    parallel_node_threshold: usize,
}

impl HealthDetector {
    /// Build a detector, rejecting invalid thresholds.
    pub fn new(config: &HealthConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            limits: ConcentrationLimits {
                max_connectivity: config.effective_max_connectivity(),
                max_responsibilities: config.effective_max_responsibilities(),
                percentile: config.effective_connectivity_percentile(),
            },
            bands: SeverityBands::from_config(config),
            parallel_node_threshold: config.effective_parallel_node_threshold(),
        })
    }

    pub fn bands(&self) -> &SeverityBands {
        &self.bands
    }

    /// All findings, sorted by kind then components.
    pub fn detect(&self, graph: &Graph) -> Vec<Finding> {
        let mut findings = detect_cycles(graph, self.parallel_node_threshold, &self.bands);
        let cycles = findings.len();
        findings.extend(detect_over_concentration(graph, &self.limits, &self.bands));
        let concentrated = findings.len() - cycles;
        findings.extend(detect_intimacy(graph, &self.bands));
        let intimate = findings.len() - cycles - concentrated;

        findings.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.components.cmp(&b.components))
        });

        tracing::info!(
            cycles,
            concentrated,
            intimate,
            "structural health detection complete"
        );
        findings
    }
}
