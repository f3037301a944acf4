//! Observability system for Pricewatch.
//! `tracing` crate with `EnvFilter`, per-stage timing metrics.

pub mod metrics;
pub mod setup;

pub use metrics::{StageMetrics, StageTimer};
pub use setup::init_tracing;
