//! Bond types.

use serde::{Deserialize, Serialize};

/// Category of a classified edge, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondType {
    /// Very strong, direct structural coupling.
    Covalent,
    /// Clear directional control or data transfer.
    Ionic,
    /// Weak, transient coupling.
    Hydrogen,
    WeakAssociation,
}

impl BondType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Covalent => "covalent",
            Self::Ionic => "ionic",
            Self::Hydrogen => "hydrogen",
            Self::WeakAssociation => "weak_association",
        }
    }

    pub fn all() -> &'static [BondType] {
        &[
            Self::Covalent,
            Self::Ionic,
            Self::Hydrogen,
            Self::WeakAssociation,
        ]
    }
}

impl std::fmt::Display for BondType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of one directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub bond_type: BondType,
    /// Weighted signal sum before normalization. Unbounded.
    pub raw_strength: f64,
    /// `raw_strength / scale`, clamped to [0, 1].
    pub strength: f64,
    /// 1.0 for balanced multi-channel coupling, 0.0 for a single channel.
    pub stability: f64,
}

impl Bond {
    /// Clamp externally supplied scores back into range.
    pub fn normalized(self) -> Self {
        Self {
            raw_strength: if self.raw_strength.is_finite() {
                self.raw_strength.max(0.0)
            } else {
                0.0
            },
            strength: unit(self.strength),
            stability: unit(self.stability),
            ..self
        }
    }

    pub fn is_covalent(&self) -> bool {
        self.bond_type == BondType::Covalent
    }
}

/// Clamp to [0, 1], mapping NaN to 0.
pub(crate) fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Edge counts per bond type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondDistribution {
    pub covalent: usize,
    pub ionic: usize,
    pub hydrogen: usize,
    pub weak_association: usize,
    /// Edges that were never classified.
    pub unclassified: usize,
}

impl BondDistribution {
    pub fn record(&mut self, bond: Option<&Bond>) {
        match bond.map(|b| b.bond_type) {
            Some(BondType::Covalent) => self.covalent += 1,
            Some(BondType::Ionic) => self.ionic += 1,
            Some(BondType::Hydrogen) => self.hydrogen += 1,
            Some(BondType::WeakAssociation) => self.weak_association += 1,
            None => self.unclassified += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.covalent + self.ionic + self.hydrogen + self.weak_association + self.unclassified
    }
}
