//! Configuration system for Pricewatch.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod dynamics_config;
pub mod ingest_config;
pub mod pipeline_config;
pub mod pricewatch_config;
pub mod report_config;
pub mod rules_config;
pub mod tiering_config;

pub use dynamics_config::{DynamicsConfig, GapPolicy};
pub use ingest_config::{ColumnMapping, IngestConfig, InvalidRowPolicy};
pub use pipeline_config::PipelineConfig;
pub use pricewatch_config::{CliOverrides, PricewatchConfig};
pub use report_config::ReportConfig;
pub use rules_config::{RuleThresholds, RulesConfig};
pub use tiering_config::TieringConfig;
