//! Degenerate group errors. Non-fatal: the affected derived field is null.

use chrono::NaiveDate;

use super::error_code::{self, PricewatchErrorCode};

/// A group is too small or too flat to yield a statistic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DegenerateGroupError {
    #[error("only {found} distinct dealers (need {required}); dealer tiers left empty")]
    TooFewDealers { found: usize, required: usize },

    #[error("part '{part_id}' in {month}: network median price is zero; deviation left empty for {rows} rows")]
    ZeroMedian {
        part_id: String,
        month: NaiveDate,
        rows: usize,
    },
}

impl PricewatchErrorCode for DegenerateGroupError {
    fn error_code(&self) -> &'static str {
        error_code::DEGENERATE_GROUP
    }
}
