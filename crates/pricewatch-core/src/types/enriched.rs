//! Enriched records: a sales record plus every derived metric.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DealerTier, RuleOutcome, SalesRecord};

/// A [`SalesRecord`] with all pipeline outputs attached.
///
/// Every `Option` is null exactly when the metric is undefined for this row:
/// no qualifying prior record, a zero denominator, or a degenerate group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub record: SalesRecord,
    /// First day of the record's month.
    pub month_start: NaiveDate,
    /// Same month, one YoY offset earlier. Null only at the calendar's edge.
    pub month_last_year: Option<NaiveDate>,
    /// Null when too few dealers exist to form tiers.
    pub dealer_tier: Option<DealerTier>,
    /// Median unit price of the part in this month across all dealers.
    pub network_median_price: f64,
    /// `(price - median) / median * 100`; null when the median is zero.
    pub price_deviation_pct: Option<f64>,
    pub abs_volume: f64,
    /// Volume of the preceding record in the dealer-part series.
    pub prev_volume: Option<f64>,
    pub mom_growth_pct: Option<f64>,
    /// Volume of the dealer-part record exactly one YoY offset earlier.
    pub last_year_volume: Option<f64>,
    pub yoy_growth_pct: Option<f64>,
    /// Average-rank percentile of volume within the part-month group, (0, 100].
    pub sales_percentile: f64,
    pub outcome: RuleOutcome,
}

impl EnrichedRecord {
    pub fn dealer_id(&self) -> &str {
        &self.record.dealer_id
    }

    pub fn part_id(&self) -> &str {
        &self.record.part_id
    }
}
