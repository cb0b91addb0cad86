//! ValenceErrorCode trait for the external reporting layer.

/// Every error enum implements this to expose a stable, machine-readable
/// code alongside its human-readable message.
pub trait ValenceErrorCode {
    /// Returns the error code string (e.g., "VALIDATION_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged error string: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const MALFORMED_SNAPSHOT: &str = "MALFORMED_SNAPSHOT";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
