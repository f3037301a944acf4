//! Shared constants for the Pricewatch engine.

/// Pricewatch version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rule 1: minimum price deviation (%) that counts as a high price.
pub const DEFAULT_RULE1_MIN_DEVIATION: f64 = 20.0;

/// Rule 1: sales percentile below which volume counts as low.
pub const DEFAULT_RULE1_MAX_PERCENTILE: f64 = 25.0;

/// Rule 2: minimum price deviation (%) that counts as a high price.
pub const DEFAULT_RULE2_MIN_DEVIATION: f64 = 15.0;

/// Rule 2: month-over-month growth (%) below which sales count as declining.
pub const DEFAULT_RULE2_MAX_MOM_GROWTH: f64 = -10.0;

/// Rule 2: year-over-year growth (%) below which sales count as declining.
pub const DEFAULT_RULE2_MAX_YOY_GROWTH: f64 = -20.0;

/// Lower cut-point of the dealer volume distribution (Small | Medium).
pub const DEFAULT_LOWER_QUANTILE: f64 = 0.33;

/// Upper cut-point of the dealer volume distribution (Medium | Large).
pub const DEFAULT_UPPER_QUANTILE: f64 = 0.66;

/// Minimum number of distinct dealers needed to form size tiers.
pub const MIN_DEALERS_FOR_TIERING: usize = 3;

/// Calendar offset of the year-over-year comparison, in months.
pub const DEFAULT_YOY_OFFSET_MONTHS: u32 = 12;

/// Default CSV field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Default report output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "pricewatch-report";

/// Default scatter chart size in pixels.
pub const DEFAULT_CHART_WIDTH: u32 = 1500;
pub const DEFAULT_CHART_HEIGHT: u32 = 900;

/// Default source column names.
pub const DEFAULT_DEALER_COLUMN: &str = "biz_assoc_id";
pub const DEFAULT_PART_COLUMN: &str = "part_nbr1";
pub const DEFAULT_YEAR_COLUMN: &str = "YEAR";
pub const DEFAULT_MONTH_COLUMN: &str = "MONTH";
pub const DEFAULT_PRICE_COLUMN: &str = "unit_price_amt";
pub const DEFAULT_QUANTITY_COLUMN: &str = "cantidad";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "pricewatch.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "PRICEWATCH_LOG";
