//! Source dataset ingestion errors.

use std::path::PathBuf;

use super::error_code::{self, PricewatchErrorCode};

/// Errors raised while reading the source CSV.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Cannot read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("CSV error at line {line}: {message}")]
    Csv { line: u64, message: String },

    #[error("Required column '{column}' not found in header")]
    MissingColumn { column: String },
}

impl PricewatchErrorCode for IngestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumn { .. } => error_code::MISSING_COLUMN,
            _ => error_code::INGEST_ERROR,
        }
    }
}
