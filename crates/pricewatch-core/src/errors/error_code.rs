//! PricewatchErrorCode trait for the CLI boundary.

/// Every error enum implements this to provide a stable, machine-readable
/// code alongside its human-readable message.
pub trait PricewatchErrorCode {
    /// Returns the error code string (e.g., "VALIDATION_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const DEGENERATE_GROUP: &str = "DEGENERATE_GROUP";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INGEST_ERROR: &str = "INGEST_ERROR";
pub const MISSING_COLUMN: &str = "MISSING_COLUMN";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
pub const CHART_ERROR: &str = "CHART_ERROR";
