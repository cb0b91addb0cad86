//! System score types.

use serde::{Deserialize, Serialize};
use valence_core::types::collections::BTreeMap;

use crate::bonds::types::BondDistribution;

/// Whole-system health summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemScore {
    /// In [0, 1]. Higher is healthier.
    pub overall_stability: f64,
    /// In [0, 1]. Higher is worse.
    pub overall_toxicity: f64,
    /// Toxicity per component id, from the findings naming it.
    pub per_component: BTreeMap<String, f64>,
    pub bond_distribution: BondDistribution,
    /// Covalent edges whose stability is below the configured threshold.
    pub unstable_covalent_edges: usize,
}
