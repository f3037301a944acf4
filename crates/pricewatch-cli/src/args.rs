//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pricewatch_core::config::{CliOverrides, GapPolicy, InvalidRowPolicy};

#[derive(Debug, Parser)]
#[command(name = "pricewatch")]
#[command(version, about = "Dealer pricing-anomaly detection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the pricing pipeline over a sales CSV and write a report bundle
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Source sales CSV
    #[arg(short, long)]
    pub input: PathBuf,

    /// Report bundle directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (default: ./pricewatch.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rule 1 price deviation floor (%)
    #[arg(long, allow_negative_numbers = true)]
    pub rule1_deviation: Option<f64>,

    /// Rule 1 sales percentile ceiling
    #[arg(long)]
    pub rule1_percentile: Option<f64>,

    /// Rule 2 price deviation floor (%)
    #[arg(long, allow_negative_numbers = true)]
    pub rule2_deviation: Option<f64>,

    /// Rule 2 month-over-month growth ceiling (%)
    #[arg(long, allow_negative_numbers = true)]
    pub rule2_mom: Option<f64>,

    /// Rule 2 year-over-year growth ceiling (%)
    #[arg(long, allow_negative_numbers = true)]
    pub rule2_yoy: Option<f64>,

    /// Fail when fewer than three dealers exist instead of leaving tiers null
    #[arg(long)]
    pub strict_tiering: bool,

    /// MoM base: previous-record or strict-calendar
    #[arg(long)]
    pub gap_policy: Option<GapPolicy>,

    /// Invalid rows: reject (abort) or skip
    #[arg(long)]
    pub invalid_rows: Option<InvalidRowPolicy>,

    /// Classify rows sequentially
    #[arg(long)]
    pub no_parallel: bool,
}

impl AnalyzeArgs {
    /// Flags that override the layered configuration.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            rule1_min_deviation: self.rule1_deviation,
            rule1_max_percentile: self.rule1_percentile,
            rule2_min_deviation: self.rule2_deviation,
            rule2_max_mom_growth: self.rule2_mom,
            rule2_max_yoy_growth: self.rule2_yoy,
            strict_tiering: self.strict_tiering.then_some(true),
            gap_policy: self.gap_policy,
            invalid_rows: self.invalid_rows,
            output_dir: self.output.clone(),
            parallel: self.no_parallel.then_some(false),
        }
    }
}
