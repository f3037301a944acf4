//! Dealer size tiering configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOWER_QUANTILE, DEFAULT_UPPER_QUANTILE};

/// Configuration for the dealer sizer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TieringConfig {
    /// Small/Medium cut-point as a quantile in (0, 1). Default: 0.33.
    pub lower_quantile: Option<f64>,
    /// Medium/Large cut-point as a quantile in (0, 1). Default: 0.66.
    pub upper_quantile: Option<f64>,
    /// Fail the run when fewer than 3 dealers exist. Default: false
    /// (tiers are left empty and a non-fatal error is recorded).
    pub strict: Option<bool>,
}

impl TieringConfig {
    pub fn effective_lower_quantile(&self) -> f64 {
        self.lower_quantile.unwrap_or(DEFAULT_LOWER_QUANTILE)
    }

    pub fn effective_upper_quantile(&self) -> f64 {
        self.upper_quantile.unwrap_or(DEFAULT_UPPER_QUANTILE)
    }

    pub fn effective_strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }
}
