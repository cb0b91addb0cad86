//! Structural health detector: cycles, god nodes, inappropriate intimacy.

pub mod concentration;
pub mod cycles;
pub mod detector;
pub mod intimacy;
pub mod types;

pub use detector::HealthDetector;
pub use types::{Finding, FindingKind, Severity, SeverityBands};
