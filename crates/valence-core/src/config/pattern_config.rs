//! Pattern validation configuration.

use serde::{Deserialize, Serialize};

use super::merge_opt;
use crate::constants;

/// Configuration for the interaction-pattern validator.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PatternConfig {
    /// Check each step's role against its component's kind. Default: true.
    pub enforce_component_roles: Option<bool>,
    /// Trace count at which shape matching runs on rayon. Default: 256.
    pub parallel_trace_threshold: Option<usize>,
}

impl PatternConfig {
    pub fn effective_enforce_component_roles(&self) -> bool {
        self.enforce_component_roles.unwrap_or(true)
    }

    pub fn effective_parallel_trace_threshold(&self) -> usize {
        self.parallel_trace_threshold
            .unwrap_or(constants::DEFAULT_PARALLEL_TRACE_THRESHOLD)
    }

    pub(crate) fn merge(&mut self, other: &PatternConfig) {
        merge_opt(
            &mut self.enforce_component_roles,
            &other.enforce_component_roles,
        );
        merge_opt(
            &mut self.parallel_trace_threshold,
            &other.parallel_trace_threshold,
        );
    }
}
