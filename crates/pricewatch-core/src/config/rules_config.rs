//! Rule engine thresholds.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_RULE1_MAX_PERCENTILE, DEFAULT_RULE1_MIN_DEVIATION, DEFAULT_RULE2_MAX_MOM_GROWTH,
    DEFAULT_RULE2_MAX_YOY_GROWTH, DEFAULT_RULE2_MIN_DEVIATION,
};

/// Rule threshold overrides as read from TOML / env / CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    /// Rule 1 price deviation floor (%). Default: 20.
    pub rule1_min_deviation: Option<f64>,
    /// Rule 1 sales percentile ceiling. Default: 25.
    pub rule1_max_percentile: Option<f64>,
    /// Rule 2 price deviation floor (%). Default: 15.
    pub rule2_min_deviation: Option<f64>,
    /// Rule 2 month-over-month growth ceiling (%). Default: -10.
    pub rule2_max_mom_growth: Option<f64>,
    /// Rule 2 year-over-year growth ceiling (%). Default: -20.
    pub rule2_max_yoy_growth: Option<f64>,
}

impl RulesConfig {
    /// Resolve into the concrete thresholds handed to the rule engine.
    pub fn thresholds(&self) -> RuleThresholds {
        let defaults = RuleThresholds::default();
        RuleThresholds {
            rule1_min_deviation: self
                .rule1_min_deviation
                .unwrap_or(defaults.rule1_min_deviation),
            rule1_max_percentile: self
                .rule1_max_percentile
                .unwrap_or(defaults.rule1_max_percentile),
            rule2_min_deviation: self
                .rule2_min_deviation
                .unwrap_or(defaults.rule2_min_deviation),
            rule2_max_mom_growth: self
                .rule2_max_mom_growth
                .unwrap_or(defaults.rule2_max_mom_growth),
            rule2_max_yoy_growth: self
                .rule2_max_yoy_growth
                .unwrap_or(defaults.rule2_max_yoy_growth),
        }
    }
}

/// Resolved rule thresholds. All comparisons are strict.
///
/// - Rule 1 fires when `deviation > rule1_min_deviation` and
///   `percentile < rule1_max_percentile`.
/// - Rule 2 fires when `deviation > rule2_min_deviation` and either
///   `mom < rule2_max_mom_growth` or `yoy < rule2_max_yoy_growth`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleThresholds {
    pub rule1_min_deviation: f64,
    pub rule1_max_percentile: f64,
    pub rule2_min_deviation: f64,
    pub rule2_max_mom_growth: f64,
    pub rule2_max_yoy_growth: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            rule1_min_deviation: DEFAULT_RULE1_MIN_DEVIATION,
            rule1_max_percentile: DEFAULT_RULE1_MAX_PERCENTILE,
            rule2_min_deviation: DEFAULT_RULE2_MIN_DEVIATION,
            rule2_max_mom_growth: DEFAULT_RULE2_MAX_MOM_GROWTH,
            rule2_max_yoy_growth: DEFAULT_RULE2_MAX_YOY_GROWTH,
        }
    }
}
