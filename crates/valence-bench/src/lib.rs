//! # valence-bench
//!
//! Benchmarks for the Valence analyzer.
//! - **Micro**: single-stage criterion benchmarks (classify, detect, validate)
//! - **System**: end-to-end `Analyzer` runs over generated architectures
//! - **Regression**: system runs checked against a stored [`Baseline`]
//!
//! Architectures are generated deterministically from a seed, so the same
//! size and seed always produce the same components, edges, signals and traces.

pub mod baseline;
pub mod fixtures;

pub use baseline::{Baseline, BenchLevel, BenchResult, Regression};
