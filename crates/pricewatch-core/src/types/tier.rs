//! Dealer size tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dealer size tier from the dealer's total absolute volume.
/// Ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DealerTier {
    Small,
    Medium,
    Large,
}

impl DealerTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    pub fn all() -> &'static [DealerTier] {
        &[Self::Small, Self::Medium, Self::Large]
    }
}

impl fmt::Display for DealerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
