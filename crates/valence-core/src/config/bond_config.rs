//! Bond classification configuration.

use serde::{Deserialize, Serialize};

use super::{check_non_negative, check_unit, merge_opt};
use crate::constants;
use crate::errors::ConfigError;

/// Channel weights, strength normalization, and bond-type thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BondConfig {
    /// Weight per method call. Default: 1.0.
    pub method_call_weight: Option<f64>,
    /// Weight per field access. Default: 1.5.
    pub field_access_weight: Option<f64>,
    /// Weight of inheritance. Default: 2.0.
    pub inheritance_weight: Option<f64>,
    /// Weight per composition. Default: 1.8.
    pub composition_weight: Option<f64>,
    /// Weight per aggregation. Default: 1.2.
    pub aggregation_weight: Option<f64>,
    /// Weight per event subscription. Default: 0.4.
    pub event_subscription_weight: Option<f64>,
    /// Weight per shared config key. Default: 0.3.
    pub config_coupling_weight: Option<f64>,
    /// Raw weighted sum mapped to strength 1.0. Default: 20.0.
    pub strength_scale: Option<f64>,
    /// Covalent lower bound. Default: 0.8.
    pub covalent_threshold: Option<f64>,
    /// Ionic lower bound. Default: 0.4.
    pub ionic_threshold: Option<f64>,
    /// Hydrogen lower bound. Default: 0.1.
    pub hydrogen_threshold: Option<f64>,
    /// Gravitational constant for attraction prediction. Default: 0.01.
    pub attraction_constant: Option<f64>,
    /// Edge count at which classification runs on rayon. Default: 1024.
    pub parallel_edge_threshold: Option<usize>,
}

impl BondConfig {
    pub fn effective_method_call_weight(&self) -> f64 {
        self.method_call_weight
            .unwrap_or(constants::DEFAULT_METHOD_CALL_WEIGHT)
    }

    pub fn effective_field_access_weight(&self) -> f64 {
        self.field_access_weight
            .unwrap_or(constants::DEFAULT_FIELD_ACCESS_WEIGHT)
    }

    pub fn effective_inheritance_weight(&self) -> f64 {
        self.inheritance_weight
            .unwrap_or(constants::DEFAULT_INHERITANCE_WEIGHT)
    }

    pub fn effective_composition_weight(&self) -> f64 {
        self.composition_weight
            .unwrap_or(constants::DEFAULT_COMPOSITION_WEIGHT)
    }

    pub fn effective_aggregation_weight(&self) -> f64 {
        self.aggregation_weight
            .unwrap_or(constants::DEFAULT_AGGREGATION_WEIGHT)
    }

    pub fn effective_event_subscription_weight(&self) -> f64 {
        self.event_subscription_weight
            .unwrap_or(constants::DEFAULT_EVENT_SUBSCRIPTION_WEIGHT)
    }

    pub fn effective_config_coupling_weight(&self) -> f64 {
        self.config_coupling_weight
            .unwrap_or(constants::DEFAULT_CONFIG_COUPLING_WEIGHT)
    }

    /// Returns the effective strength scale, defaulting to 20.0.
    pub fn effective_strength_scale(&self) -> f64 {
        self.strength_scale
            .unwrap_or(constants::DEFAULT_STRENGTH_SCALE)
    }

    pub fn effective_covalent_threshold(&self) -> f64 {
        self.covalent_threshold
            .unwrap_or(constants::DEFAULT_COVALENT_THRESHOLD)
    }

    pub fn effective_ionic_threshold(&self) -> f64 {
        self.ionic_threshold
            .unwrap_or(constants::DEFAULT_IONIC_THRESHOLD)
    }

    pub fn effective_hydrogen_threshold(&self) -> f64 {
        self.hydrogen_threshold
            .unwrap_or(constants::DEFAULT_HYDROGEN_THRESHOLD)
    }

    pub fn effective_attraction_constant(&self) -> f64 {
        self.attraction_constant
            .unwrap_or(constants::DEFAULT_ATTRACTION_CONSTANT)
    }

    pub fn effective_parallel_edge_threshold(&self) -> usize {
        self.parallel_edge_threshold
            .unwrap_or(constants::DEFAULT_PARALLEL_EDGE_THRESHOLD)
    }

    /// Validate the effective values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, weight) in [
            ("bonds.method_call_weight", self.effective_method_call_weight()),
            ("bonds.field_access_weight", self.effective_field_access_weight()),
            ("bonds.inheritance_weight", self.effective_inheritance_weight()),
            ("bonds.composition_weight", self.effective_composition_weight()),
            ("bonds.aggregation_weight", self.effective_aggregation_weight()),
            ("bonds.event_subscription_weight", self.effective_event_subscription_weight()),
            ("bonds.config_coupling_weight", self.effective_config_coupling_weight()),
            ("bonds.attraction_constant", self.effective_attraction_constant()),
        ] {
            check_non_negative(field, weight)?;
        }

        let scale = self.effective_strength_scale();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::invalid(
                "bonds.strength_scale",
                "must be a finite number > 0",
            ));
        }

        let covalent = self.effective_covalent_threshold();
        let ionic = self.effective_ionic_threshold();
        let hydrogen = self.effective_hydrogen_threshold();
        check_unit("bonds.covalent_threshold", covalent)?;
        check_unit("bonds.ionic_threshold", ionic)?;
        check_unit("bonds.hydrogen_threshold", hydrogen)?;
        if !(hydrogen < ionic && ionic < covalent) {
            return Err(ConfigError::invalid(
                "bonds.thresholds",
                "must be strictly ascending: hydrogen < ionic < covalent",
            ));
        }
        Ok(())
    }

    pub(crate) fn merge(&mut self, other: &BondConfig) {
        merge_opt(&mut self.method_call_weight, &other.method_call_weight);
        merge_opt(&mut self.field_access_weight, &other.field_access_weight);
        merge_opt(&mut self.inheritance_weight, &other.inheritance_weight);
        merge_opt(&mut self.composition_weight, &other.composition_weight);
        merge_opt(&mut self.aggregation_weight, &other.aggregation_weight);
        merge_opt(
            &mut self.event_subscription_weight,
            &other.event_subscription_weight,
        );
        merge_opt(&mut self.config_coupling_weight, &other.config_coupling_weight);
        merge_opt(&mut self.strength_scale, &other.strength_scale);
        merge_opt(&mut self.covalent_threshold, &other.covalent_threshold);
        merge_opt(&mut self.ionic_threshold, &other.ionic_threshold);
        merge_opt(&mut self.hydrogen_threshold, &other.hydrogen_threshold);
        merge_opt(&mut self.attraction_constant, &other.attraction_constant);
        merge_opt(
            &mut self.parallel_edge_threshold,
            &other.parallel_edge_threshold,
        );
    }
}
