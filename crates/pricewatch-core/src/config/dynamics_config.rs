//! Sales dynamics configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_YOY_OFFSET_MONTHS;

/// How month-over-month growth treats calendar gaps in a dealer-part series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapPolicy {
    /// Compare against whichever record precedes in month order,
    /// even if months are missing in between.
    #[default]
    PreviousRecord,
    /// Growth is null unless the preceding record is exactly one month earlier.
    StrictCalendar,
}

impl GapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreviousRecord => "previous-record",
            Self::StrictCalendar => "strict-calendar",
        }
    }
}

impl fmt::Display for GapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "previous-record" | "previous_record" => Ok(Self::PreviousRecord),
            "strict-calendar" | "strict_calendar" => Ok(Self::StrictCalendar),
            other => Err(format!("unknown gap policy '{other}'")),
        }
    }
}

/// Configuration for the sales dynamics calculator.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DynamicsConfig {
    /// Missing-month handling for MoM growth. Default: previous-record.
    pub gap_policy: Option<GapPolicy>,
    /// Year-over-year offset in months. Default: 12.
    pub yoy_offset_months: Option<u32>,
}

impl DynamicsConfig {
    pub fn effective_gap_policy(&self) -> GapPolicy {
        self.gap_policy.unwrap_or_default()
    }

    pub fn effective_yoy_offset_months(&self) -> u32 {
        self.yoy_offset_months.unwrap_or(DEFAULT_YOY_OFFSET_MONTHS)
    }
}
