//! Observability for Valence.
//! `tracing` crate with `EnvFilter`, per-stage log levels.

pub mod setup;

pub use setup::init_tracing;
