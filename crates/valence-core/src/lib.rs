//! Valence core: errors, configuration, events, tracing, shared types and constants.
//!
//! Nothing in this crate analyzes a graph. It carries the ambient plumbing every
//! analysis stage shares.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;

pub use config::ValenceConfig;
pub use errors::{ConfigError, PipelineError, ReportError, ValenceErrorCode, ValidationError};
