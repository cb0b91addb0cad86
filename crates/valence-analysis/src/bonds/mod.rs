//! Bond classifier: turns raw coupling signals into typed, scored edges.

pub mod attraction;
pub mod classifier;
pub mod types;

pub use attraction::attraction;
pub use classifier::{BondClassifier, BondThresholds};
pub use types::{Bond, BondDistribution, BondType};
