//! Temporal normalizer: year + month fields to a canonical month start.

use chrono::{Datelike, Months, NaiveDate};
use pricewatch_core::errors::ValidationError;
use pricewatch_core::SalesRecord;

/// A sales record paired with the first day of its month.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedRecord {
    pub record: SalesRecord,
    pub month_start: NaiveDate,
}

impl DatedRecord {
    /// Normalize one record. Fails on a month outside 1-12 or an
    /// unrepresentable year.
    pub fn new(record: SalesRecord) -> Result<Self, ValidationError> {
        let month_start = month_start(record.row, record.year as i64, record.month as i64)?;
        Ok(Self {
            record,
            month_start,
        })
    }
}

/// First day of `year`-`month`. `row` is only used for error context.
pub fn month_start(row: usize, year: i64, month: i64) -> Result<NaiveDate, ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::MonthOutOfRange { row, month });
    }
    let y = i32::try_from(year).map_err(|_| ValidationError::YearOutOfRange { row, year })?;
    NaiveDate::from_ymd_opt(y, month as u32, 1)
        .ok_or(ValidationError::YearOutOfRange { row, year })
}

/// Parse raw year and month cells into validated integers.
///
/// Accepts integral text such as `2024` or `3.0`; anything else, or a
/// missing cell, is a validation error naming `year_field` / `month_field`.
pub fn parse_period(
    row: usize,
    year: Option<&str>,
    month: Option<&str>,
    year_field: &str,
    month_field: &str,
) -> Result<(i32, u32), ValidationError> {
    let y = parse_integral(row, year, year_field)?;
    let m = parse_integral(row, month, month_field)?;
    let start = month_start(row, y, m)?;
    Ok((start.year(), start.month()))
}

fn parse_integral(row: usize, raw: Option<&str>, field: &str) -> Result<i64, ValidationError> {
    let text = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ValidationError::MissingField {
            row,
            field: field.to_string(),
        })?;
    if let Ok(v) = text.parse::<i64>() {
        return Ok(v);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        _ => Err(ValidationError::NotNumeric {
            row,
            field: field.to_string(),
            value: text.to_string(),
        }),
    }
}

/// `month_start` moved back `months` calendar months. `None` when the result
/// leaves the supported calendar.
pub fn months_back(month_start: NaiveDate, months: u32) -> Option<NaiveDate> {
    month_start.checked_sub_months(Months::new(months))
}

/// True when `later` is exactly one calendar month after `earlier`.
pub fn is_next_month(earlier: NaiveDate, later: NaiveDate) -> bool {
    earlier.checked_add_months(Months::new(1)) == Some(later)
}
