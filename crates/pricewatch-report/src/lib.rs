//! # pricewatch-report
//!
//! The reporting adapter around the pricing pipeline: reads the source CSV,
//! shapes the enriched table into the Analysis and Original views, renders
//! the deviation/percentile scatter, and writes everything as a report
//! bundle directory.

pub mod bundle;
pub mod chart;
pub mod ingest;
pub mod views;

pub use bundle::{ReportBundle, ReportManifest, SheetEntry};
pub use chart::render_scatter_svg;
pub use ingest::{CsvIngestor, IngestedTable};
pub use views::{analysis_view, original_view, SheetView};
