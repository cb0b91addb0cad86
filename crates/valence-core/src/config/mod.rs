//! Configuration system for Valence.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod bond_config;
pub mod health_config;
pub mod pattern_config;
pub mod scoring_config;
pub mod valence_config;

pub use bond_config::BondConfig;
pub use health_config::HealthConfig;
pub use pattern_config::PatternConfig;
pub use scoring_config::ScoringConfig;
pub use valence_config::{ConfigOverrides, ValenceConfig};

use crate::errors::ConfigError;

/// Copy `other` into `base` when it carries a value.
pub(crate) fn merge_opt<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
    if other.is_some() {
        base.clone_from(other);
    }
}

/// Reject a value outside `[0.0, 1.0]` (NaN included).
pub(crate) fn check_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be between 0.0 and 1.0"))
    }
}

/// Reject negative, NaN, or infinite values.
pub(crate) fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be a finite number >= 0"))
    }
}
