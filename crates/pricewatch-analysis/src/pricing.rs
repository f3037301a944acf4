//! Price deviation calculator.
//!
//! Groups records by (part, month), takes the median unit price of each
//! group as the network median, and expresses every record's price as a
//! percentage deviation from it.

use chrono::NaiveDate;
use pricewatch_core::errors::DegenerateGroupError;
use pricewatch_core::types::collections::FxHashMap;

use crate::stats::median;
use crate::temporal::DatedRecord;

/// Price metrics for one record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceMetrics {
    pub network_median_price: f64,
    /// Null when the network median is zero.
    pub price_deviation_pct: Option<f64>,
}

/// Output of the calculator, aligned with the input records.
#[derive(Debug, Clone, Default)]
pub struct PriceDeviations {
    pub metrics: Vec<PriceMetrics>,
    /// Number of distinct (part, month) groups.
    pub group_count: usize,
    /// One entry per (part, month) group whose median price is zero.
    pub zero_median_groups: Vec<DegenerateGroupError>,
}

impl PriceDeviations {
    /// Rows whose deviation is null because of a zero median.
    pub fn zero_median_rows(&self) -> usize {
        self.metrics
            .iter()
            .filter(|m| m.price_deviation_pct.is_none())
            .count()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PriceDeviationCalculator;

impl PriceDeviationCalculator {
    pub fn compute(&self, records: &[DatedRecord]) -> PriceDeviations {
        let mut groups: FxHashMap<(&str, NaiveDate), Vec<usize>> = FxHashMap::default();
        for (i, r) in records.iter().enumerate() {
            groups
                .entry((r.record.part_id.as_str(), r.month_start))
                .or_default()
                .push(i);
        }

        let mut metrics = vec![PriceMetrics::default(); records.len()];
        let mut zero_groups: Vec<(&str, NaiveDate, usize)> = Vec::new();

        for ((part_id, month), members) in &groups {
            let prices: Vec<f64> = members
                .iter()
                .map(|&i| records[i].record.unit_price)
                .collect();
            // Groups are non-empty and prices are finite after validation.
            let Some(network_median) = median(&prices) else {
                continue;
            };
            if network_median == 0.0 {
                zero_groups.push((*part_id, *month, members.len()));
            }
            for &i in members {
                let price = records[i].record.unit_price;
                metrics[i] = PriceMetrics {
                    network_median_price: network_median,
                    price_deviation_pct: deviation_pct(price, network_median),
                };
            }
        }

        // Hash iteration order is arbitrary; keep the error list stable.
        zero_groups.sort();
        let zero_median_groups = zero_groups
            .into_iter()
            .map(|(part_id, month, rows)| DegenerateGroupError::ZeroMedian {
                part_id: part_id.to_string(),
                month,
                rows,
            })
            .collect();

        PriceDeviations {
            metrics,
            group_count: groups.len(),
            zero_median_groups,
        }
    }
}

/// `(price - median) / median * 100`; null for a zero median.
pub fn deviation_pct(price: f64, network_median: f64) -> Option<f64> {
    if network_median == 0.0 {
        return None;
    }
    let pct = (price - network_median) / network_median * 100.0;
    pct.is_finite().then_some(pct)
}
