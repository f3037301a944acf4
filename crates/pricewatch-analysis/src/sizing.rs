//! Dealer sizer: buckets dealers into Small / Medium / Large by total volume.
//!
//! Each dealer's total is the sum of `|quantity|` over all of its records.
//! Two cut-points are taken from the distribution of dealer totals by
//! linear-interpolation quantiles (default 33rd and 66th percentile). A total
//! at or below the lower cut is Small, at or below the upper cut is Medium,
//! anything above is Large: ties at a boundary always land in the lower tier.

use std::collections::BTreeMap;

use pricewatch_core::config::TieringConfig;
use pricewatch_core::constants::MIN_DEALERS_FOR_TIERING;
use pricewatch_core::errors::{DegenerateGroupError, ValidationError};
use pricewatch_core::DealerTier;
use serde::Serialize;

use crate::stats::linear_quantile;
use crate::temporal::DatedRecord;

/// The two quantile cut-points of the dealer volume distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierCuts {
    pub lower: f64,
    pub upper: f64,
}

impl TierCuts {
    /// Compute cut-points from dealer totals (any order).
    /// Returns `None` when `totals` is empty.
    pub fn from_totals(totals: &[f64], lower_q: f64, upper_q: f64) -> Option<Self> {
        let mut sorted = totals.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            lower: linear_quantile(&sorted, lower_q)?,
            upper: linear_quantile(&sorted, upper_q)?,
        })
    }

    /// Tier for a dealer total. Boundary ties resolve to the lower tier.
    pub fn tier_for(&self, total: f64) -> DealerTier {
        if total <= self.lower {
            DealerTier::Small
        } else if total <= self.upper {
            DealerTier::Medium
        } else {
            DealerTier::Large
        }
    }
}

/// Outcome of sizing one record set.
#[derive(Debug, Clone, Default)]
pub struct DealerSizing {
    /// Total absolute volume per dealer.
    pub totals: BTreeMap<String, f64>,
    /// Tier per dealer. Empty when sizing was degenerate.
    pub tiers: BTreeMap<String, DealerTier>,
    pub cuts: Option<TierCuts>,
    /// Set when too few dealers existed to form tiers.
    pub degenerate: Option<DegenerateGroupError>,
}

impl DealerSizing {
    pub fn tier_of(&self, dealer_id: &str) -> Option<DealerTier> {
        self.tiers.get(dealer_id).copied()
    }

    pub fn dealer_count(&self) -> usize {
        self.totals.len()
    }

    /// Dealers per tier, every tier present (possibly zero).
    pub fn tier_counts(&self) -> BTreeMap<DealerTier, usize> {
        let mut counts: BTreeMap<DealerTier, usize> =
            DealerTier::all().iter().map(|t| (*t, 0)).collect();
        for tier in self.tiers.values() {
            *counts.entry(*tier).or_default() += 1;
        }
        counts
    }
}

/// Assigns dealer size tiers.
#[derive(Debug, Clone)]
pub struct DealerSizer {
    lower_q: f64,
    upper_q: f64,
    strict: bool,
}

impl Default for DealerSizer {
    fn default() -> Self {
        Self::new(&TieringConfig::default())
    }
}

impl DealerSizer {
    pub fn new(config: &TieringConfig) -> Self {
        Self {
            lower_q: config.effective_lower_quantile(),
            upper_q: config.effective_upper_quantile(),
            strict: config.effective_strict(),
        }
    }

    /// Size every dealer in `records`.
    ///
    /// With fewer than three distinct dealers the tiers stay empty and
    /// `degenerate` is set, or in strict mode the call fails.
    pub fn size(&self, records: &[DatedRecord]) -> Result<DealerSizing, ValidationError> {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for r in records {
            *totals.entry(r.record.dealer_id.clone()).or_default() += r.record.abs_volume();
        }

        if totals.is_empty() {
            return Ok(DealerSizing::default());
        }
        if totals.len() < MIN_DEALERS_FOR_TIERING {
            if self.strict {
                return Err(ValidationError::TooFewDealers {
                    found: totals.len(),
                    required: MIN_DEALERS_FOR_TIERING,
                });
            }
            let degenerate = DegenerateGroupError::TooFewDealers {
                found: totals.len(),
                required: MIN_DEALERS_FOR_TIERING,
            };
            return Ok(DealerSizing {
                totals,
                degenerate: Some(degenerate),
                ..Default::default()
            });
        }

        let values: Vec<f64> = totals.values().copied().collect();
        let cuts = TierCuts::from_totals(&values, self.lower_q, self.upper_q);
        let tiers = match cuts {
            Some(c) => totals
                .iter()
                .map(|(dealer, total)| (dealer.clone(), c.tier_for(*total)))
                .collect(),
            None => BTreeMap::new(),
        };

        Ok(DealerSizing {
            totals,
            tiers,
            cuts,
            degenerate: None,
        })
    }
}
