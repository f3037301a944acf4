//! # pricewatch-cli
//!
//! Argument definitions and command implementations behind the
//! `pricewatch` binary.

pub mod analyze;
pub mod args;

pub use analyze::{run_analyze, AnalyzeOutcome};
pub use args::{AnalyzeArgs, Cli, Command};
