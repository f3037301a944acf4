//! Pipeline execution configuration.

use serde::{Deserialize, Serialize};

/// Configuration for pipeline execution.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Classify rows in parallel with rayon. Default: true.
    pub parallel: Option<bool>,
}

impl PipelineConfig {
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}
