//! Report serialization errors.

use super::error_code::{self, ValenceErrorCode};

/// Errors that can occur while serializing or reading back a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ValenceErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
