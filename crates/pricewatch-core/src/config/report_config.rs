//! Report bundle configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_OUTPUT_DIR};

/// Configuration for the reporting adapter.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory the report bundle is written to. Default: `pricewatch-report`.
    pub output_dir: Option<PathBuf>,
    /// Scatter chart width in pixels. Default: 1500.
    pub chart_width: Option<u32>,
    /// Scatter chart height in pixels. Default: 900.
    pub chart_height: Option<u32>,
}

impl ReportConfig {
    pub fn effective_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn effective_chart_size(&self) -> (u32, u32) {
        (
            self.chart_width.unwrap_or(DEFAULT_CHART_WIDTH),
            self.chart_height.unwrap_or(DEFAULT_CHART_HEIGHT),
        )
    }
}
