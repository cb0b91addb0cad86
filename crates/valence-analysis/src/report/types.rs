//! Analysis report structures.

use serde::{Deserialize, Serialize};
use valence_core::errors::ReportError;

use crate::health::types::{Finding, Severity};
use crate::model::types::{ComponentKind, Edge};
use crate::patterns::types::ValidationOutcome;
use crate::patterns::valency::TraceValency;
use crate::scoring::types::SystemScore;

/// Everything one analysis run produced, in serializable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: ReportSummary,
    pub components: Vec<ComponentReport>,
    pub edges: Vec<Edge>,
    pub findings: Vec<Finding>,
    pub score: SystemScore,
    pub validations: Vec<ValidationOutcome>,
    /// Valency balance of each trace that records valency.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub valency: Vec<TraceValency>,
}

/// A component with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentReport {
    pub id: String,
    pub kind: ComponentKind,
    pub responsibilities: Vec<String>,
    pub throughput: f64,
    pub fan_in: u32,
    pub fan_out: u32,
    pub connectivity: u32,
    pub toxicity: f64,
    pub finding_count: usize,
}

/// Headline counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub version: String,
    pub component_count: usize,
    pub edge_count: usize,
    pub finding_count: usize,
    pub severity_counts: SeverityCounts,
    pub traces_matched: usize,
    pub traces_rejected: usize,
    #[serde(default)]
    pub valency_unbalanced: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
            Severity::Critical => self.critical += 1,
        }
    }
}

impl AnalysisReport {
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Attach valency balances and count the unbalanced ones.
    pub fn with_valency(mut self, valency: Vec<TraceValency>) -> Self {
        self.summary.valency_unbalanced = valency.iter().filter(|v| !v.balance.conserved).count();
        self.valency = valency;
        self
    }

    pub fn rejected(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.validations.iter().filter(|v| !v.is_match())
    }
}
