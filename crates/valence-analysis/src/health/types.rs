//! Finding types and severity banding.

use serde::{Deserialize, Serialize};
use valence_core::config::HealthConfig;

use crate::bonds::types::unit;

/// What kind of structural problem a finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    CircularDependency,
    OverConcentration,
    InappropriateIntimacy,
}

impl FindingKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CircularDependency => "circular_dependency",
            Self::OverConcentration => "over_concentration",
            Self::InappropriateIntimacy => "inappropriate_intimacy",
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Severity band derived from toxicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower bounds of the Medium, High and Critical bands. Below Medium is Low.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityBands {
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl SeverityBands {
    pub fn from_config(config: &HealthConfig) -> Self {
        Self {
            medium: config.effective_severity_medium(),
            high: config.effective_severity_high(),
            critical: config.effective_severity_critical(),
        }
    }

    pub fn classify(&self, toxicity: f64) -> Severity {
        if toxicity >= self.critical {
            Severity::Critical
        } else if toxicity >= self.high {
            Severity::High
        } else if toxicity >= self.medium {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self::from_config(&HealthConfig::default())
    }
}

/// One structural-health problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    /// Involved component ids, never empty.
    pub components: Vec<String>,
    /// In [0, 1].
    pub toxicity: f64,
    pub severity: Severity,
    pub rationale: String,
}

impl Finding {
    /// Build a finding; toxicity is clamped and banded.
    pub fn new(
        kind: FindingKind,
        components: Vec<String>,
        toxicity: f64,
        bands: &SeverityBands,
        rationale: String,
    ) -> Self {
        let toxicity = unit(toxicity);
        Self {
            kind,
            components,
            toxicity,
            severity: bands.classify(toxicity),
            rationale,
        }
    }

    /// Whether this finding names `id`.
    pub fn involves(&self, id: &str) -> bool {
        self.components.iter().any(|c| c == id)
    }
}
