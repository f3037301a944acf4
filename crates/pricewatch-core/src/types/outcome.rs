//! Rule outcome labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The classification assigned to every enriched record. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleOutcome {
    /// Rule 1: price well above the network median with low relative volume.
    HighPriceLowSales,
    /// Rule 2: price above the network median with falling volume.
    HighPriceSalesDecline,
    /// Neither rule matched.
    NoOpportunity,
}

impl RuleOutcome {
    /// Report label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HighPriceLowSales => "Rule 1: High Price + Low Sales",
            Self::HighPriceSalesDecline => "Rule 2: High Price + Sales Decline",
            Self::NoOpportunity => "No Opportunity",
        }
    }

    /// True for either rule.
    pub fn is_flagged(&self) -> bool {
        !matches!(self, Self::NoOpportunity)
    }

    pub fn all() -> &'static [RuleOutcome] {
        &[
            Self::HighPriceLowSales,
            Self::HighPriceSalesDecline,
            Self::NoOpportunity,
        ]
    }
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
