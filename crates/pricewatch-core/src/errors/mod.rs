//! Error handling for Pricewatch.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod degenerate_error;
pub mod error_code;
pub mod ingest_error;
pub mod pipeline_error;
pub mod report_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use degenerate_error::DegenerateGroupError;
pub use error_code::PricewatchErrorCode;
pub use ingest_error::IngestError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use report_error::ReportError;
pub use validation_error::ValidationError;
