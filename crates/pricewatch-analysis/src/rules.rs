//! Prioritized rule engine.
//!
//! Rule 1 (high price, low sales) is checked before Rule 2 (high price,
//! sales decline); the first match wins. Any comparison against a null
//! metric is false.

use pricewatch_core::{RuleOutcome, RuleThresholds};
use rayon::prelude::*;

/// The metrics a rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RuleInput {
    pub deviation_pct: Option<f64>,
    pub sales_percentile: Option<f64>,
    pub mom_growth_pct: Option<f64>,
    pub yoy_growth_pct: Option<f64>,
}

/// Which rule predicates hold, independent of priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleMatch {
    pub rule1: bool,
    pub rule2: bool,
}

impl RuleMatch {
    pub fn outcome(&self) -> RuleOutcome {
        if self.rule1 {
            RuleOutcome::HighPriceLowSales
        } else if self.rule2 {
            RuleOutcome::HighPriceSalesDecline
        } else {
            RuleOutcome::NoOpportunity
        }
    }

    pub fn both(&self) -> bool {
        self.rule1 && self.rule2
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine {
    thresholds: RuleThresholds,
}

impl RuleEngine {
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    pub fn matches(&self, input: &RuleInput) -> RuleMatch {
        let t = &self.thresholds;
        let rule1 = gt(input.deviation_pct, t.rule1_min_deviation)
            && lt(input.sales_percentile, t.rule1_max_percentile);
        let rule2 = gt(input.deviation_pct, t.rule2_min_deviation)
            && (lt(input.mom_growth_pct, t.rule2_max_mom_growth)
                || lt(input.yoy_growth_pct, t.rule2_max_yoy_growth));
        RuleMatch { rule1, rule2 }
    }

    pub fn classify(&self, input: &RuleInput) -> RuleOutcome {
        self.matches(input).outcome()
    }

    /// Evaluate every input, preserving order. Row-parallel when `parallel`.
    pub fn classify_all(&self, inputs: &[RuleInput], parallel: bool) -> Vec<RuleMatch> {
        if parallel {
            inputs.par_iter().map(|i| self.matches(i)).collect()
        } else {
            inputs.iter().map(|i| self.matches(i)).collect()
        }
    }
}

fn gt(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v > threshold)
}

fn lt(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v < threshold)
}
