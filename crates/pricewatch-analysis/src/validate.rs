//! Raw row validation: [`RawSalesRow`] to [`SalesRecord`].

use pricewatch_core::config::ColumnMapping;
use pricewatch_core::errors::ValidationError;
use pricewatch_core::{RawSalesRow, SalesRecord};

use crate::temporal;

/// Validates raw rows against the required-field contract.
///
/// Error messages name fields by their configured source column so the
/// offending cell can be found in the input file.
#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    columns: ColumnMapping,
}

impl RecordValidator {
    pub fn new(columns: &ColumnMapping) -> Self {
        Self {
            columns: columns.clone(),
        }
    }

    /// Validate one row. The first failing field wins.
    pub fn validate(&self, raw: RawSalesRow) -> Result<SalesRecord, ValidationError> {
        let row = raw.row;
        let dealer_id = required_text(row, raw.dealer_id, self.columns.effective_dealer_id())?;
        let part_id = required_text(row, raw.part_id, self.columns.effective_part_id())?;
        let (year, month) = temporal::parse_period(
            row,
            raw.year.as_deref(),
            raw.month.as_deref(),
            self.columns.effective_year(),
            self.columns.effective_month(),
        )?;
        let unit_price = required_number(
            row,
            raw.unit_price.as_deref(),
            self.columns.effective_unit_price(),
        )?;
        let quantity = required_number(
            row,
            raw.quantity.as_deref(),
            self.columns.effective_quantity(),
        )?;

        Ok(SalesRecord {
            row,
            dealer_id,
            part_id,
            year,
            month,
            unit_price,
            quantity,
            passthrough: raw.passthrough,
        })
    }

    /// Check an already-typed record: identifiers non-blank, price and
    /// quantity finite. Calendar bounds are checked by normalization.
    pub fn check(&self, record: SalesRecord) -> Result<SalesRecord, ValidationError> {
        let row = record.row;
        if record.dealer_id.trim().is_empty() {
            return Err(missing(row, self.columns.effective_dealer_id()));
        }
        if record.part_id.trim().is_empty() {
            return Err(missing(row, self.columns.effective_part_id()));
        }
        finite(row, record.unit_price, self.columns.effective_unit_price())?;
        finite(row, record.quantity, self.columns.effective_quantity())?;
        Ok(record)
    }
}

fn missing(row: usize, field: &str) -> ValidationError {
    ValidationError::MissingField {
        row,
        field: field.to_string(),
    }
}

fn finite(row: usize, value: f64, field: &str) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotNumeric {
            row,
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

fn required_text(row: usize, value: Option<String>, field: &str) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::MissingField {
            row,
            field: field.to_string(),
        })
}

fn required_number(row: usize, value: Option<&str>, field: &str) -> Result<f64, ValidationError> {
    let text = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::MissingField {
            row,
            field: field.to_string(),
        })?;
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::NotNumeric {
            row,
            field: field.to_string(),
            value: text.to_string(),
        }),
    }
}
