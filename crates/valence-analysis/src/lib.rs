//! Valence analysis engine.
//!
//! Builds a directed interaction graph over software components, classifies
//! each edge into a bond, detects structurally unhealthy subgraphs, scores the
//! system, validates recorded interaction traces against the permitted
//! interaction patterns, and assembles everything into one report.

pub mod bonds;
pub mod health;
pub mod model;
pub mod patterns;
pub mod pipeline;
pub mod report;
pub mod scoring;

pub use pipeline::Analyzer;
