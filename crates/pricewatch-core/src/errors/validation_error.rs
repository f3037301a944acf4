//! Input validation errors.

use super::error_code::{self, PricewatchErrorCode};

/// A required input field is missing or malformed.
///
/// `row` is the 1-based data row of the source dataset (header excluded).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("row {row}: missing required field '{field}'")]
    MissingField { row: usize, field: String },

    #[error("row {row}: field '{field}' is not numeric: '{value}'")]
    NotNumeric {
        row: usize,
        field: String,
        value: String,
    },

    #[error("row {row}: month {month} is outside 1-12")]
    MonthOutOfRange { row: usize, month: i64 },

    #[error("row {row}: year {year} is outside the supported calendar")]
    YearOutOfRange { row: usize, year: i64 },

    #[error("{found} distinct dealers found, size tiers need at least {required}")]
    TooFewDealers { found: usize, required: usize },
}

impl ValidationError {
    /// Row the error points at, if it concerns a single record.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::MissingField { row, .. }
            | Self::NotNumeric { row, .. }
            | Self::MonthOutOfRange { row, .. }
            | Self::YearOutOfRange { row, .. } => Some(*row),
            Self::TooFewDealers { .. } => None,
        }
    }
}

impl PricewatchErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
