//! Per-stage pipeline metrics.
//!
//! Every stage wraps its work in a [`StageTimer`]; finishing the timer logs a
//! structured `stage complete` event and yields a [`StageMetrics`] row that
//! ends up in the run summary.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Counters recorded for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageMetrics {
    /// Stage name (`normalize`, `size_dealers`, ...).
    pub stage: String,
    /// Rows entering the stage.
    pub rows_in: usize,
    /// Rows leaving the stage.
    pub rows_out: usize,
    /// Distinct groups aggregated over (0 for row-wise stages).
    pub group_count: usize,
    /// Wall time in milliseconds.
    pub duration_ms: u64,
}

/// Measures one stage from construction to [`StageTimer::finish`].
#[derive(Debug)]
pub struct StageTimer {
    stage: &'static str,
    started: Instant,
}

impl StageTimer {
    pub fn start(stage: &'static str) -> Self {
        tracing::debug!(stage, "stage started");
        Self {
            stage,
            started: Instant::now(),
        }
    }

    pub fn finish(self, rows_in: usize, rows_out: usize, group_count: usize) -> StageMetrics {
        let duration_ms = self.started.elapsed().as_millis() as u64;
        tracing::info!(
            stage = self.stage,
            rows_in,
            rows_out,
            group_count,
            duration_ms,
            "stage complete"
        );
        StageMetrics {
            stage: self.stage.to_string(),
            rows_in,
            rows_out,
            group_count,
            duration_ms,
        }
    }
}
