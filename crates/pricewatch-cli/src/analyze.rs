//! `pricewatch analyze`: ingest → pipeline → report bundle.

use std::path::{Path, PathBuf};

use pricewatch_analysis::{PipelineSummary, PricingPipeline};
use pricewatch_core::errors::PipelineError;
use pricewatch_core::PricewatchConfig;
use pricewatch_report::{CsvIngestor, ReportBundle};

use crate::args::AnalyzeArgs;

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct AnalyzeOutcome {
    pub output_dir: PathBuf,
    pub summary: PipelineSummary,
}

/// Run the analyze command. `root` is where `pricewatch.toml` is looked up.
pub fn run_analyze(args: &AnalyzeArgs, root: &Path) -> Result<AnalyzeOutcome, PipelineError> {
    let config = PricewatchConfig::load(root, args.config.as_deref(), Some(&args.overrides()))?;
    tracing::debug!(?config, "configuration resolved");

    let table = CsvIngestor::new(&config.ingest).read_path(&args.input)?;
    let passthrough_headers = table.passthrough_headers;

    let result = PricingPipeline::new(&config).run_raw(table.rows)?;
    for error in &result.errors {
        tracing::debug!(error = %error, "non-fatal");
    }

    let bundle = ReportBundle::new(&config.report);
    bundle.write(
        &result.data,
        &config.ingest.columns,
        &passthrough_headers,
        Some(&args.input),
    )?;

    Ok(AnalyzeOutcome {
        output_dir: bundle.output_dir().to_path_buf(),
        summary: result.data.summary,
    })
}
