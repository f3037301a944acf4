//! # pricewatch-analysis
//!
//! The pricing-anomaly pipeline.
//! Temporal normalization, dealer sizing, price deviation, sales dynamics,
//! and the prioritized rule engine, orchestrated by [`PricingPipeline`].
//! Pure and in-memory: one complete snapshot per run.

pub mod dynamics;
pub mod pipeline;
pub mod pricing;
pub mod rules;
pub mod series;
pub mod sizing;
pub mod stats;
pub mod summary;
pub mod temporal;
pub mod validate;

pub use dynamics::{SalesDynamics, SalesDynamicsCalculator, SalesMetrics};
pub use pipeline::{PipelineOutput, PricingPipeline};
pub use pricing::{PriceDeviationCalculator, PriceDeviations, PriceMetrics};
pub use rules::{RuleEngine, RuleInput, RuleMatch};
pub use series::{ScatterPoint, ScatterSeries};
pub use sizing::{DealerSizer, DealerSizing, TierCuts};
pub use summary::PipelineSummary;
pub use temporal::DatedRecord;
pub use validate::RecordValidator;
