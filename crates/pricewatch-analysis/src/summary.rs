//! Run summary.

use std::collections::BTreeMap;

use pricewatch_core::tracing::StageMetrics;
use pricewatch_core::types::FxHashSet;
use pricewatch_core::{DealerTier, EnrichedRecord, RuleOutcome};
use serde::{Deserialize, Serialize};

use crate::rules::RuleMatch;

/// Counts describing one pipeline run. Serialized into the report manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Records that made it through the run.
    pub total_rows: usize,
    /// Rows dropped under the `skip` invalid-row policy.
    pub skipped_rows: usize,
    pub dealers: usize,
    pub parts: usize,
    pub months: usize,
    /// Dealers per tier label. Empty when tiering was degenerate.
    pub tier_counts: BTreeMap<String, usize>,
    /// Records per outcome label, every label present.
    pub outcome_counts: BTreeMap<String, usize>,
    /// Records satisfying both rule predicates (classified as Rule 1).
    pub both_rules_matched: usize,
    /// MoM and YoY values nulled by a zero base.
    pub zero_base_growth: usize,
    /// Deviations nulled by a zero network median.
    pub zero_median_rows: usize,
    pub non_fatal_errors: usize,
    pub stages: Vec<StageMetrics>,
}

impl PipelineSummary {
    /// Record-derived counts. Stage metrics and error counts are filled in
    /// by the pipeline.
    pub fn from_records(
        records: &[EnrichedRecord],
        matches: &[RuleMatch],
        tier_counts: &BTreeMap<DealerTier, usize>,
    ) -> Self {
        let dealers: FxHashSet<&str> = records.iter().map(|r| r.dealer_id()).collect();
        let parts: FxHashSet<&str> = records.iter().map(|r| r.part_id()).collect();
        let months: FxHashSet<_> = records.iter().map(|r| r.month_start).collect();

        let mut outcome_counts: BTreeMap<String, usize> = RuleOutcome::all()
            .iter()
            .map(|o| (o.label().to_string(), 0))
            .collect();
        for r in records {
            *outcome_counts.entry(r.outcome.label().to_string()).or_default() += 1;
        }

        let tier_total: usize = tier_counts.values().sum();
        let tier_counts = if tier_total == 0 {
            BTreeMap::new()
        } else {
            tier_counts
                .iter()
                .map(|(t, n)| (t.as_str().to_string(), *n))
                .collect()
        };

        Self {
            total_rows: records.len(),
            dealers: dealers.len(),
            parts: parts.len(),
            months: months.len(),
            tier_counts,
            outcome_counts,
            both_rules_matched: matches.iter().filter(|m| m.both()).count(),
            zero_median_rows: records
                .iter()
                .filter(|r| r.price_deviation_pct.is_none())
                .count(),
            ..Default::default()
        }
    }

    pub fn flagged(&self) -> usize {
        self.outcome_counts
            .iter()
            .filter(|(label, _)| label.as_str() != RuleOutcome::NoOpportunity.label())
            .map(|(_, n)| n)
            .sum()
    }

    pub fn log(&self) {
        tracing::info!(
            total_rows = self.total_rows,
            skipped_rows = self.skipped_rows,
            dealers = self.dealers,
            parts = self.parts,
            months = self.months,
            flagged = self.flagged(),
            both_rules_matched = self.both_rules_matched,
            zero_base_growth = self.zero_base_growth,
            zero_median_rows = self.zero_median_rows,
            non_fatal_errors = self.non_fatal_errors,
            "pipeline summary"
        );
    }
}
