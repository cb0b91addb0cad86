//! Structural health configuration.

use serde::{Deserialize, Serialize};

use super::{check_unit, merge_opt};
use crate::constants;
use crate::errors::ConfigError;

/// Thresholds for god-node detection and finding severity bands.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct HealthConfig {
    /// Connectivity above which a component may be a god node. Default: 20.
    pub max_connectivity: Option<u32>,
    /// Responsibility count above which a component may be a god node. Default: 10.
    pub max_responsibilities: Option<u32>,
    /// Connectivity percentile marking outliers (1-100). Default: 95.
    pub connectivity_percentile: Option<usize>,
    /// Lower bound of the Medium severity band. Default: 0.3.
    pub severity_medium: Option<f64>,
    /// Lower bound of the High severity band. Default: 0.6.
    pub severity_high: Option<f64>,
    /// Lower bound of the Critical severity band. Default: 0.85.
    pub severity_critical: Option<f64>,
    /// Node count at which cycle detection runs per weak component on rayon. Default: 2048.
    pub parallel_node_threshold: Option<usize>,
}

impl HealthConfig {
    pub fn effective_max_connectivity(&self) -> u32 {
        self.max_connectivity
            .unwrap_or(constants::DEFAULT_MAX_CONNECTIVITY)
    }

    pub fn effective_max_responsibilities(&self) -> u32 {
        self.max_responsibilities
            .unwrap_or(constants::DEFAULT_MAX_RESPONSIBILITIES)
    }

    pub fn effective_connectivity_percentile(&self) -> usize {
        self.connectivity_percentile
            .unwrap_or(constants::DEFAULT_CONNECTIVITY_PERCENTILE)
    }

    pub fn effective_severity_medium(&self) -> f64 {
        self.severity_medium
            .unwrap_or(constants::DEFAULT_SEVERITY_MEDIUM)
    }

    pub fn effective_severity_high(&self) -> f64 {
        self.severity_high
            .unwrap_or(constants::DEFAULT_SEVERITY_HIGH)
    }

    pub fn effective_severity_critical(&self) -> f64 {
        self.severity_critical
            .unwrap_or(constants::DEFAULT_SEVERITY_CRITICAL)
    }

    pub fn effective_parallel_node_threshold(&self) -> usize {
        self.parallel_node_threshold
            .unwrap_or(constants::DEFAULT_PARALLEL_NODE_THRESHOLD)
    }

    /// Validate the effective values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.effective_max_connectivity() == 0 {
            return Err(ConfigError::invalid("health.max_connectivity", "must be > 0"));
        }
        if self.effective_max_responsibilities() == 0 {
            return Err(ConfigError::invalid(
                "health.max_responsibilities",
                "must be > 0",
            ));
        }
        let percentile = self.effective_connectivity_percentile();
        if !(1..=100).contains(&percentile) {
            return Err(ConfigError::invalid(
                "health.connectivity_percentile",
                "must be between 1 and 100",
            ));
        }

        let medium = self.effective_severity_medium();
        let high = self.effective_severity_high();
        let critical = self.effective_severity_critical();
        check_unit("health.severity_medium", medium)?;
        check_unit("health.severity_high", high)?;
        check_unit("health.severity_critical", critical)?;
        if !(0.0 < medium && medium < high && high < critical) {
            return Err(ConfigError::invalid(
                "health.severity",
                "bands must be strictly ascending: 0 < medium < high < critical",
            ));
        }
        Ok(())
    }

    pub(crate) fn merge(&mut self, other: &HealthConfig) {
        merge_opt(&mut self.max_connectivity, &other.max_connectivity);
        merge_opt(&mut self.max_responsibilities, &other.max_responsibilities);
        merge_opt(
            &mut self.connectivity_percentile,
            &other.connectivity_percentile,
        );
        merge_opt(&mut self.severity_medium, &other.severity_medium);
        merge_opt(&mut self.severity_high, &other.severity_high);
        merge_opt(&mut self.severity_critical, &other.severity_critical);
        merge_opt(
            &mut self.parallel_node_threshold,
            &other.parallel_node_threshold,
        );
    }
}
