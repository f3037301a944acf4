//! Scatter series: price deviation against sales percentile.

use pricewatch_core::{EnrichedRecord, RuleThresholds};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub deviation_pct: f64,
    pub sales_percentile: f64,
    /// Matched Rule 1 or Rule 2.
    pub flagged: bool,
}

/// Points plus the two reference lines drawn over them.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ScatterSeries {
    pub points: Vec<ScatterPoint>,
    /// Vertical line: the Rule 2 deviation floor.
    pub deviation_threshold: f64,
    /// Horizontal line: the Rule 1 percentile ceiling.
    pub percentile_threshold: f64,
    /// Records left out because their deviation is null.
    pub omitted: usize,
}

impl ScatterSeries {
    pub fn from_records(records: &[EnrichedRecord], thresholds: &RuleThresholds) -> Self {
        let points: Vec<ScatterPoint> = records
            .iter()
            .filter_map(|r| {
                r.price_deviation_pct.map(|deviation_pct| ScatterPoint {
                    deviation_pct,
                    sales_percentile: r.sales_percentile,
                    flagged: r.outcome.is_flagged(),
                })
            })
            .collect();
        Self {
            omitted: records.len() - points.len(),
            points,
            deviation_threshold: thresholds.rule2_min_deviation,
            percentile_threshold: thresholds.rule1_max_percentile,
        }
    }

    pub fn flagged_count(&self) -> usize {
        self.points.iter().filter(|p| p.flagged).count()
    }

    /// `(min, max)` of deviation and percentile, widened to include the
    /// reference lines. `None` without points.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        if self.points.is_empty() {
            return None;
        }
        let mut x = (self.deviation_threshold, self.deviation_threshold);
        let mut y = (self.percentile_threshold, self.percentile_threshold);
        for p in &self.points {
            x = (x.0.min(p.deviation_pct), x.1.max(p.deviation_pct));
            y = (y.0.min(p.sales_percentile), y.1.max(p.sales_percentile));
        }
        Some((x, y))
    }
}
