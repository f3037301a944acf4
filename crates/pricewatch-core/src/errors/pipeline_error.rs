//! Pipeline errors and non-fatal error collection.

use super::error_code::PricewatchErrorCode;
use super::{ConfigError, DegenerateGroupError, IngestError, ReportError, ValidationError};

/// Errors that can occur during a pricing run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Degenerate group: {0}")]
    Degenerate(#[from] DegenerateGroupError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl PricewatchErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Degenerate(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Ingest(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
        }
    }
}

/// Result of a pipeline run that accumulates non-fatal errors.
/// Skipped rows and degenerate groups land in `errors`; the data is complete
/// for every record that entered the run.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the run.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    /// Create a new pipeline result with no errors.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, error: impl Into<PipelineError>) {
        self.errors.push(error.into());
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
