//! Source sales records.

use serde::{Deserialize, Serialize};

/// One source row as read from the dataset, before validation.
///
/// Required fields are kept as raw trimmed text; `None` means the cell was
/// absent or empty. Validation turns this into a [`SalesRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSalesRow {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub dealer_id: Option<String>,
    pub part_id: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub unit_price: Option<String>,
    pub quantity: Option<String>,
    /// Non-required columns in source order.
    pub passthrough: Vec<(String, String)>,
}

/// A validated sales record: one dealer selling one part in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// 1-based data row number (header excluded). Row identity for errors.
    pub row: usize,
    pub dealer_id: String,
    pub part_id: String,
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    pub unit_price: f64,
    /// Signed quantity; negative values are returns.
    pub quantity: f64,
    /// Non-required columns in source order.
    pub passthrough: Vec<(String, String)>,
}

impl SalesRecord {
    /// Absolute volume moved by this record, regardless of direction.
    pub fn abs_volume(&self) -> f64 {
        self.quantity.abs()
    }
}
