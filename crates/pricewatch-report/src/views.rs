//! Tabular views over the enriched records.
//!
//! Source fields keep their configured source column names; derived fields
//! use fixed names. Nulls render as empty cells and numbers use Rust's
//! shortest round-trip formatting, so identical tables serialize to
//! identical bytes.

use pricewatch_core::config::ColumnMapping;
use pricewatch_core::EnrichedRecord;

pub const ANALYSIS_SHEET: &str = "Analysis";
pub const ORIGINAL_SHEET: &str = "Original";
pub const VISUALIZATION_SHEET: &str = "Visualization";

/// A named table of string cells, ready to serialize.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetView {
    pub name: &'static str,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// The report table: identity, price, and sales columns plus the outcome.
pub fn analysis_view(records: &[EnrichedRecord], columns: &ColumnMapping) -> SheetView {
    let headers = [
        columns.effective_dealer_id(),
        "dealer_size",
        columns.effective_part_id(),
        "month_date",
        columns.effective_month(),
        columns.effective_year(),
        columns.effective_unit_price(),
        "network_median_price",
        "price_deviation_pct",
        columns.effective_quantity(),
        "abs_volume",
        "sales_percentile",
        "mom_growth_pct",
        "yoy_growth_pct",
        "rule_outcome",
    ]
    .map(str::to_string)
    .to_vec();

    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.record.dealer_id.clone(),
                tier_cell(r),
                r.record.part_id.clone(),
                r.month_start.to_string(),
                r.record.month.to_string(),
                r.record.year.to_string(),
                r.record.unit_price.to_string(),
                r.network_median_price.to_string(),
                opt(r.price_deviation_pct),
                r.record.quantity.to_string(),
                r.abs_volume.to_string(),
                r.sales_percentile.to_string(),
                opt(r.mom_growth_pct),
                opt(r.yoy_growth_pct),
                r.outcome.label().to_string(),
            ]
        })
        .collect();

    SheetView {
        name: ANALYSIS_SHEET,
        headers,
        rows,
    }
}

/// The audit table: every source column, pass-through included, followed
/// by every intermediate and derived column.
pub fn original_view(
    records: &[EnrichedRecord],
    columns: &ColumnMapping,
    passthrough_headers: &[String],
) -> SheetView {
    let mut headers: Vec<String> = [
        columns.effective_dealer_id(),
        columns.effective_part_id(),
        columns.effective_year(),
        columns.effective_month(),
        columns.effective_unit_price(),
        columns.effective_quantity(),
    ]
    .map(str::to_string)
    .to_vec();
    headers.extend(passthrough_headers.iter().cloned());
    headers.extend(
        [
            "dealer_size",
            "month_date",
            "month_last_year",
            "network_median_price",
            "price_deviation_pct",
            "abs_volume",
            "prev_volume",
            "mom_growth_pct",
            "last_year_volume",
            "yoy_growth_pct",
            "sales_percentile",
            "rule_outcome",
        ]
        .map(str::to_string),
    );

    let rows = records
        .iter()
        .map(|r| {
            let mut row = vec![
                r.record.dealer_id.clone(),
                r.record.part_id.clone(),
                r.record.year.to_string(),
                r.record.month.to_string(),
                r.record.unit_price.to_string(),
                r.record.quantity.to_string(),
            ];
            row.extend(passthrough_cells(r, passthrough_headers.len()));
            row.extend([
                tier_cell(r),
                r.month_start.to_string(),
                r.month_last_year.map(|d| d.to_string()).unwrap_or_default(),
                r.network_median_price.to_string(),
                opt(r.price_deviation_pct),
                r.abs_volume.to_string(),
                opt(r.prev_volume),
                opt(r.mom_growth_pct),
                opt(r.last_year_volume),
                opt(r.yoy_growth_pct),
                r.sales_percentile.to_string(),
                r.outcome.label().to_string(),
            ]);
            row
        })
        .collect();

    SheetView {
        name: ORIGINAL_SHEET,
        headers,
        rows,
    }
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn tier_cell(r: &EnrichedRecord) -> String {
    r.dealer_tier.map(|t| t.to_string()).unwrap_or_default()
}

/// Pass-through values by position, padded or cut to `width` cells.
/// Ingestion emits them in header order, so duplicate header names keep
/// their own values.
fn passthrough_cells(r: &EnrichedRecord, width: usize) -> impl Iterator<Item = String> + '_ {
    r.record
        .passthrough
        .iter()
        .map(|(_, v)| v.clone())
        .chain(std::iter::repeat(String::new()))
        .take(width)
}
