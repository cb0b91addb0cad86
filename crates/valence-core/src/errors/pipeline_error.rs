//! Pipeline errors.

use super::error_code::ValenceErrorCode;
use super::{ConfigError, ReportError, ValidationError};

/// Errors that abort an analysis run.
/// Aggregates subsystem errors via `From` conversions.
///
/// Pattern violations are not here: they are reported as data.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl ValenceErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
        }
    }
}
