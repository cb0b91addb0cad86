//! Stability/toxicity scorer.

pub mod scorer;
pub mod types;

pub use scorer::Scorer;
pub use types::SystemScore;
