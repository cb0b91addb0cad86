//! Scoring configuration.

use serde::{Deserialize, Serialize};

use super::{check_unit, merge_opt};
use crate::constants;
use crate::errors::ConfigError;

/// Configuration for the stability/toxicity scorer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Covalent bonds below this stability drag overall stability down. Default: 0.5.
    pub unstable_bond_threshold: Option<f64>,
}

impl ScoringConfig {
    /// Returns the effective unstable-bond threshold, defaulting to 0.5.
    pub fn effective_unstable_bond_threshold(&self) -> f64 {
        self.unstable_bond_threshold
            .unwrap_or(constants::DEFAULT_UNSTABLE_BOND_THRESHOLD)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit(
            "scoring.unstable_bond_threshold",
            self.effective_unstable_bond_threshold(),
        )
    }

    pub(crate) fn merge(&mut self, other: &ScoringConfig) {
        merge_opt(
            &mut self.unstable_bond_threshold,
            &other.unstable_bond_threshold,
        );
    }
}
