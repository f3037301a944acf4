//! Source dataset ingestion configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DEALER_COLUMN, DEFAULT_DELIMITER, DEFAULT_MONTH_COLUMN, DEFAULT_PART_COLUMN,
    DEFAULT_PRICE_COLUMN, DEFAULT_QUANTITY_COLUMN, DEFAULT_YEAR_COLUMN,
};

/// What to do with a row that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRowPolicy {
    /// Abort the whole run on the first invalid row.
    #[default]
    Reject,
    /// Drop the row and record a non-fatal error.
    Skip,
}

impl InvalidRowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for InvalidRowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvalidRowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown invalid-row policy '{other}'")),
        }
    }
}

/// Source column names for the required fields.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ColumnMapping {
    pub dealer_id: Option<String>,
    pub part_id: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub unit_price: Option<String>,
    pub quantity: Option<String>,
}

impl ColumnMapping {
    pub fn effective_dealer_id(&self) -> &str {
        self.dealer_id.as_deref().unwrap_or(DEFAULT_DEALER_COLUMN)
    }

    pub fn effective_part_id(&self) -> &str {
        self.part_id.as_deref().unwrap_or(DEFAULT_PART_COLUMN)
    }

    pub fn effective_year(&self) -> &str {
        self.year.as_deref().unwrap_or(DEFAULT_YEAR_COLUMN)
    }

    pub fn effective_month(&self) -> &str {
        self.month.as_deref().unwrap_or(DEFAULT_MONTH_COLUMN)
    }

    pub fn effective_unit_price(&self) -> &str {
        self.unit_price.as_deref().unwrap_or(DEFAULT_PRICE_COLUMN)
    }

    pub fn effective_quantity(&self) -> &str {
        self.quantity.as_deref().unwrap_or(DEFAULT_QUANTITY_COLUMN)
    }
}

/// Configuration for CSV ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct IngestConfig {
    /// Invalid row handling. Default: reject.
    pub invalid_rows: Option<InvalidRowPolicy>,
    /// Single-byte field delimiter. Default: ",".
    pub delimiter: Option<String>,
    /// Source column names.
    pub columns: ColumnMapping,
}

impl IngestConfig {
    pub fn effective_invalid_rows(&self) -> InvalidRowPolicy {
        self.invalid_rows.unwrap_or_default()
    }

    /// Returns the delimiter byte. Validation guarantees a single ASCII char.
    pub fn effective_delimiter(&self) -> u8 {
        self.delimiter
            .as_deref()
            .and_then(|d| d.as_bytes().first().copied())
            .unwrap_or(DEFAULT_DELIMITER)
    }
}
