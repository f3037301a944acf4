//! # pricewatch-core
//!
//! Foundation crate for the Pricewatch pricing-anomaly engine.
//! Defines record types, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{PricewatchConfig, RuleThresholds};
pub use errors::{PipelineError, PipelineResult, PricewatchErrorCode};
pub use types::{DealerTier, EnrichedRecord, RawSalesRow, RuleOutcome, SalesRecord};
