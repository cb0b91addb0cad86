//! Shared data structures for Valence.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet};
