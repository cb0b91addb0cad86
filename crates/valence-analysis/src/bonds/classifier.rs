//! Weighted-sum bond classifier.
//!
//! strength = clamp(Σ countᵢ·weightᵢ / scale)
//! stability = 1 − Var(shares) / Var_max, where shareᵢ is channel i's part of
//! the weighted sum and Var_max = (n−1)/n² is the variance of a bond carried
//! by a single channel.

use rayon::prelude::*;
use statrs::statistics::Statistics;
use valence_core::config::BondConfig;
use valence_core::errors::ConfigError;

use super::types::{unit, Bond, BondType};
use crate::model::graph::Graph;
use crate::model::types::{CouplingSignals, SignalTable};

/// Strength lower bounds for each bond type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondThresholds {
    pub covalent: f64,
    pub ionic: f64,
    pub hydrogen: f64,
}

impl BondThresholds {
    pub fn bond_type(&self, strength: f64) -> BondType {
        if strength >= self.covalent {
            BondType::Covalent
        } else if strength >= self.ionic {
            BondType::Ionic
        } else if strength >= self.hydrogen {
            BondType::Hydrogen
        } else {
            BondType::WeakAssociation
        }
    }
}

/// Classifies edges from their coupling signals. Pure and deterministic.
#[derive(Debug, Clone)]
pub struct BondClassifier {
    weights: [f64; CouplingSignals::CHANNELS],
    scale: f64,
    thresholds: BondThresholds,
    attraction_constant: f64,
    parallel_edge_threshold: usize,
}

impl BondClassifier {
    /// Build a classifier, rejecting invalid weights or thresholds.
    pub fn new(config: &BondConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            weights: [
                config.effective_method_call_weight(),
                config.effective_field_access_weight(),
                config.effective_inheritance_weight(),
                config.effective_composition_weight(),
                config.effective_aggregation_weight(),
                config.effective_event_subscription_weight(),
                config.effective_config_coupling_weight(),
            ],
            scale: config.effective_strength_scale(),
            thresholds: BondThresholds {
                covalent: config.effective_covalent_threshold(),
                ionic: config.effective_ionic_threshold(),
                hydrogen: config.effective_hydrogen_threshold(),
            },
            attraction_constant: config.effective_attraction_constant(),
            parallel_edge_threshold: config.effective_parallel_edge_threshold(),
        })
    }

    pub fn thresholds(&self) -> BondThresholds {
        self.thresholds
    }

    pub fn attraction_constant(&self) -> f64 {
        self.attraction_constant
    }

    /// Classify one set of signals.
    pub fn classify_signals(&self, signals: &CouplingSignals) -> Bond {
        let counts = signals.channel_counts();
        let mut contributions = [0.0; CouplingSignals::CHANNELS];
        for (c, (count, weight)) in contributions
            .iter_mut()
            .zip(counts.iter().zip(self.weights.iter()))
        {
            *c = count * weight;
        }

        let raw_strength: f64 = contributions.iter().sum();
        let strength = unit(raw_strength / self.scale);

        Bond {
            bond_type: self.thresholds.bond_type(strength),
            raw_strength,
            strength,
            stability: self.stability(&contributions, raw_strength),
        }
    }

    /// Return a copy of `graph` with every edge classified.
    ///
    /// Edges without signals are classified as if all counts were zero.
    /// Signals for pairs that are not edges are ignored.
    pub fn classify(&self, graph: &Graph, signals: &SignalTable) -> Graph {
        let edges = graph.all_edges();

        let unmatched = signals
            .pairs()
            .filter(|(s, t)| graph.edge(s, t).is_none())
            .count();
        if unmatched > 0 {
            tracing::warn!(unmatched, "coupling signals for unknown edges ignored");
        }

        let zero = CouplingSignals::default();
        let classify_edge = |edge: &crate::model::graph::EdgeView<'_>| {
            let s = signals.get(edge.source, edge.target).unwrap_or(&zero);
            self.classify_signals(s)
        };

        let bonds: Vec<Bond> = if edges.len() >= self.parallel_edge_threshold {
            edges.par_iter().map(classify_edge).collect()
        } else {
            edges.iter().map(classify_edge).collect()
        };

        tracing::debug!(
            edges = bonds.len(),
            parallel = edges.len() >= self.parallel_edge_threshold,
            "bonds classified"
        );

        graph.with_bonds(bonds)
    }

    fn stability(&self, contributions: &[f64], total: f64) -> f64 {
        if total <= 0.0 {
            return 1.0;
        }
        // Channels that can never contribute do not count toward balance.
        let shares: Vec<f64> = contributions
            .iter()
            .zip(self.weights.iter())
            .filter(|(_, w)| **w > 0.0)
            .map(|(c, _)| c / total)
            .collect();
        let n = shares.len() as f64;
        if shares.len() < 2 {
            return 1.0;
        }
        let max_variance = (n - 1.0) / (n * n);
        unit(1.0 - shares.iter().population_variance() / max_variance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> BondClassifier {
        BondClassifier::new(&BondConfig::default()).unwrap()
    }

    #[test]
    fn weighted_sum_and_scale() {
        let bond = classifier().classify_signals(&CouplingSignals {
            method_calls: 4,
            field_access: 2,
            ..Default::default()
        });
        // 4×1.0 + 2×1.5 = 7.0, 7/20 = 0.35
        assert!((bond.raw_strength - 7.0).abs() < 1e-9);
        assert!((bond.strength - 0.35).abs() < 1e-9);
        assert_eq!(bond.bond_type, BondType::Hydrogen);
    }

    #[test]
    fn threshold_boundaries_are_inclusive() {
        let t = classifier().thresholds();
        assert_eq!(t.bond_type(0.8), BondType::Covalent);
        assert_eq!(t.bond_type(0.79), BondType::Ionic);
        assert_eq!(t.bond_type(0.4), BondType::Ionic);
        assert_eq!(t.bond_type(0.1), BondType::Hydrogen);
        assert_eq!(t.bond_type(0.099), BondType::WeakAssociation);
    }

    #[test]
    fn strength_saturates_at_one() {
        let bond = classifier().classify_signals(&CouplingSignals {
            method_calls: 500,
            ..Default::default()
        });
        assert_eq!(bond.strength, 1.0);
        assert_eq!(bond.raw_strength, 500.0);
    }

    #[test]
    fn single_channel_is_least_stable() {
        let bond = classifier().classify_signals(&CouplingSignals {
            method_calls: 30,
            ..Default::default()
        });
        assert!(bond.stability.abs() < 1e-9);
    }

    #[test]
    fn balanced_channels_are_most_stable() {
        let config = BondConfig {
            field_access_weight: Some(1.0),
            inheritance_weight: Some(1.0),
            composition_weight: Some(1.0),
            aggregation_weight: Some(1.0),
            event_subscription_weight: Some(1.0),
            config_coupling_weight: Some(1.0),
            ..Default::default()
        };
        let bond = BondClassifier::new(&config)
            .unwrap()
            .classify_signals(&CouplingSignals {
                method_calls: 1,
                field_access: 1,
                inheritance: true,
                composition: 1,
                aggregation: 1,
                event_subscriptions: 1,
                config_coupling: 1,
            });
        assert!((bond.stability - 1.0).abs() < 1e-9);
    }

    #[test]
    fn two_even_channels_sit_between() {
        // 3×1.0 and 2×1.5 contribute 3.0 each.
        let bond = classifier().classify_signals(&CouplingSignals {
            method_calls: 3,
            field_access: 2,
            ..Default::default()
        });
        assert!((bond.stability - 7.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn no_signals_is_weak_and_stable() {
        let bond = classifier().classify_signals(&CouplingSignals::default());
        assert_eq!(bond.bond_type, BondType::WeakAssociation);
        assert_eq!(bond.strength, 0.0);
        assert_eq!(bond.stability, 1.0);
    }

    #[test]
    fn invalid_config_fails_fast() {
        let config = BondConfig {
            strength_scale: Some(-1.0),
            ..Default::default()
        };
        assert!(BondClassifier::new(&config).is_err());
    }
}
