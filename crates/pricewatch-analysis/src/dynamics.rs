//! Sales dynamics calculator.
//!
//! Four independent sub-steps over the same record set:
//! 1. absolute volume, `|quantity|`
//! 2. month-over-month growth within each (dealer, part) series
//! 3. year-over-year growth via an exact (dealer, part, month - 12) lookup
//! 4. percentile rank of volume within each (part, month) group
//!
//! Every output is aligned with the input slice, whatever its order. Series
//! are ordered internally by (month, input row).

use chrono::NaiveDate;
use pricewatch_core::config::{DynamicsConfig, GapPolicy};
use pricewatch_core::types::collections::FxHashMap;

use crate::stats::{average_rank_percentiles, percent_change};
use crate::temporal::{self, DatedRecord};

/// Sales metrics for one record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SalesMetrics {
    pub abs_volume: f64,
    pub prev_volume: Option<f64>,
    pub mom_growth_pct: Option<f64>,
    pub month_last_year: Option<NaiveDate>,
    pub last_year_volume: Option<f64>,
    pub yoy_growth_pct: Option<f64>,
    pub sales_percentile: f64,
}

/// A comparison base and the growth against it, per record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthColumn {
    pub base: Vec<Option<f64>>,
    pub growth_pct: Vec<Option<f64>>,
    /// Records with a base of zero, whose growth is therefore null.
    pub zero_base: usize,
}

impl GrowthColumn {
    fn with_len(n: usize) -> Self {
        Self {
            base: vec![None; n],
            growth_pct: vec![None; n],
            zero_base: 0,
        }
    }

    fn set(&mut self, i: usize, current: f64, base: f64) {
        self.base[i] = Some(base);
        self.growth_pct[i] = percent_change(current, base);
        if base == 0.0 {
            self.zero_base += 1;
        }
    }
}

/// Output of the calculator.
#[derive(Debug, Clone, Default)]
pub struct SalesDynamics {
    pub metrics: Vec<SalesMetrics>,
    /// Number of (dealer, part) series.
    pub series_count: usize,
    /// Number of (part, month) groups.
    pub part_month_groups: usize,
    /// Growth values nulled by a zero base (MoM + YoY).
    pub zero_base_count: usize,
}

/// Computes volume, growth, and percentile metrics.
#[derive(Debug, Clone)]
pub struct SalesDynamicsCalculator {
    gap_policy: GapPolicy,
    yoy_offset_months: u32,
}

impl Default for SalesDynamicsCalculator {
    fn default() -> Self {
        Self::new(&DynamicsConfig::default())
    }
}

impl SalesDynamicsCalculator {
    pub fn new(config: &DynamicsConfig) -> Self {
        Self {
            gap_policy: config.effective_gap_policy(),
            yoy_offset_months: config.effective_yoy_offset_months(),
        }
    }

    pub fn compute(&self, records: &[DatedRecord]) -> SalesDynamics {
        let volumes = absolute_volumes(records);
        let series = dealer_part_series(records);
        let mom = mom_growth(records, &series, &volumes, self.gap_policy);
        let (month_last_year, yoy) =
            yoy_growth(records, &series, &volumes, self.yoy_offset_months);
        let (percentiles, part_month_groups) = sales_percentiles(records, &volumes);

        let metrics = (0..records.len())
            .map(|i| SalesMetrics {
                abs_volume: volumes[i],
                prev_volume: mom.base[i],
                mom_growth_pct: mom.growth_pct[i],
                month_last_year: month_last_year[i],
                last_year_volume: yoy.base[i],
                yoy_growth_pct: yoy.growth_pct[i],
                sales_percentile: percentiles[i],
            })
            .collect();

        SalesDynamics {
            metrics,
            series_count: series.len(),
            part_month_groups,
            zero_base_count: mom.zero_base + yoy.zero_base,
        }
    }
}

/// Step 1: `|quantity|` per record.
pub fn absolute_volumes(records: &[DatedRecord]) -> Vec<f64> {
    records.iter().map(|r| r.record.abs_volume()).collect()
}

/// Record indices grouped by (dealer, part), each group ordered by
/// (month, input row). Groups are returned in (dealer, part) order.
pub fn dealer_part_series(records: &[DatedRecord]) -> Vec<Vec<usize>> {
    let mut groups: FxHashMap<(&str, &str), Vec<usize>> = FxHashMap::default();
    for (i, r) in records.iter().enumerate() {
        groups
            .entry((r.record.dealer_id.as_str(), r.record.part_id.as_str()))
            .or_default()
            .push(i);
    }
    let mut keyed: Vec<_> = groups.into_iter().collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed
        .into_iter()
        .map(|(_, mut members)| {
            members.sort_by_key(|&i| (records[i].month_start, records[i].record.row));
            members
        })
        .collect()
}

/// Step 2: growth against the preceding record of the same series.
///
/// Under [`GapPolicy::StrictCalendar`] the preceding record only counts when
/// it is exactly one calendar month earlier.
pub fn mom_growth(
    records: &[DatedRecord],
    series: &[Vec<usize>],
    volumes: &[f64],
    gap_policy: GapPolicy,
) -> GrowthColumn {
    let mut column = GrowthColumn::with_len(records.len());
    for members in series {
        for pair in members.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            if gap_policy == GapPolicy::StrictCalendar
                && !temporal::is_next_month(records[prev].month_start, records[cur].month_start)
            {
                continue;
            }
            column.set(cur, volumes[cur], volumes[prev]);
        }
    }
    column
}

/// Step 3: growth against the same series exactly `offset_months` earlier.
///
/// Left-join semantics through a keyed lookup: every record gets exactly one
/// result, null when nothing sits at the offset month. When several records
/// share a (dealer, part, month) key the first in series order is used.
pub fn yoy_growth(
    records: &[DatedRecord],
    series: &[Vec<usize>],
    volumes: &[f64],
    offset_months: u32,
) -> (Vec<Option<NaiveDate>>, GrowthColumn) {
    let mut lookup: FxHashMap<(&str, &str, NaiveDate), f64> = FxHashMap::default();
    for &i in series.iter().flatten() {
        let r = &records[i];
        lookup
            .entry((
                r.record.dealer_id.as_str(),
                r.record.part_id.as_str(),
                r.month_start,
            ))
            .or_insert(volumes[i]);
    }

    let mut column = GrowthColumn::with_len(records.len());
    let mut target_months = Vec::with_capacity(records.len());
    for (i, r) in records.iter().enumerate() {
        let target = temporal::months_back(r.month_start, offset_months);
        target_months.push(target);
        let Some(target) = target else { continue };
        let key = (r.record.dealer_id.as_str(), r.record.part_id.as_str(), target);
        if let Some(&base) = lookup.get(&key) {
            column.set(i, volumes[i], base);
        }
    }
    (target_months, column)
}

/// Step 4: average-rank percentile of volume within each (part, month)
/// group. Returns the percentiles and the number of groups.
pub fn sales_percentiles(records: &[DatedRecord], volumes: &[f64]) -> (Vec<f64>, usize) {
    let mut groups: FxHashMap<(&str, NaiveDate), Vec<usize>> = FxHashMap::default();
    for (i, r) in records.iter().enumerate() {
        groups
            .entry((r.record.part_id.as_str(), r.month_start))
            .or_default()
            .push(i);
    }

    let mut percentiles = vec![0.0; records.len()];
    for members in groups.values() {
        let group_volumes: Vec<f64> = members.iter().map(|&i| volumes[i]).collect();
        for (&i, pct) in members.iter().zip(average_rank_percentiles(&group_volumes)) {
            percentiles[i] = pct;
        }
    }
    (percentiles, groups.len())
}
