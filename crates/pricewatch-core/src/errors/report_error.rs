//! Report export errors.

use std::path::PathBuf;

use super::error_code::{self, PricewatchErrorCode};

/// Errors raised while writing the report bundle.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Cannot write {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to write sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("Manifest serialization failed: {0}")]
    Manifest(String),
}

impl PricewatchErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Chart(_) => error_code::CHART_ERROR,
            _ => error_code::REPORT_ERROR,
        }
    }
}
