use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use pricewatch_cli::{run_analyze, Cli, Command};
use pricewatch_core::tracing::init_tracing;
use pricewatch_core::PricewatchErrorCode;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => match run_analyze(&args, Path::new(".")) {
            Ok(outcome) => {
                println!(
                    "Analysis complete: {} rows, {} flagged. Report written to {}",
                    outcome.summary.total_rows,
                    outcome.summary.flagged(),
                    outcome.output_dir.display()
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e.coded_message());
                ExitCode::FAILURE
            }
        },
    }
}
