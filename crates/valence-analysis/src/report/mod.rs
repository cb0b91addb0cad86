//! Report assembler: one serializable structure per analysis run.

pub mod assembler;
pub mod types;

pub use assembler::assemble;
pub use types::{AnalysisReport, ComponentReport, ReportSummary, SeverityCounts};
