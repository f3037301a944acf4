//! Report bundle: one output directory standing in for a workbook.
//!
//! | file           | sheet         |
//! |----------------|---------------|
//! | `analysis.csv` | Analysis      |
//! | `original.csv` | Original      |
//! | `scatter.svg`  | Visualization |
//! | `report.json`  | manifest      |

use std::fs;
use std::path::{Path, PathBuf};

use pricewatch_analysis::{PipelineOutput, PipelineSummary};
use pricewatch_core::config::{ColumnMapping, ReportConfig};
use pricewatch_core::constants::VERSION;
use pricewatch_core::errors::ReportError;
use serde::{Deserialize, Serialize};

use crate::chart::render_scatter_svg;
use crate::views::{analysis_view, original_view, SheetView, VISUALIZATION_SHEET};

pub const ANALYSIS_FILE: &str = "analysis.csv";
pub const ORIGINAL_FILE: &str = "original.csv";
pub const CHART_FILE: &str = "scatter.svg";
pub const MANIFEST_FILE: &str = "report.json";

/// One entry of the manifest's sheet list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetEntry {
    pub name: String,
    pub file: String,
    /// Data rows (CSV sheets) or plotted points (chart).
    pub rows: usize,
}

/// Contents of `report.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportManifest {
    pub version: String,
    /// Source dataset, when known.
    pub source: Option<String>,
    pub sheets: Vec<SheetEntry>,
    pub summary: PipelineSummary,
}

/// Writes a pipeline output as a report bundle.
#[derive(Debug, Clone)]
pub struct ReportBundle {
    output_dir: PathBuf,
    chart_size: (u32, u32),
}

impl ReportBundle {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            output_dir: config.effective_output_dir(),
            chart_size: config.effective_chart_size(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every file of the bundle, creating the directory if needed.
    /// Existing files are overwritten.
    pub fn write(
        &self,
        output: &PipelineOutput,
        columns: &ColumnMapping,
        passthrough_headers: &[String],
        source: Option<&Path>,
    ) -> Result<ReportManifest, ReportError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ReportError::Io {
            path: self.output_dir.clone(),
            message: e.to_string(),
        })?;

        let analysis = analysis_view(&output.records, columns);
        let original = original_view(&output.records, columns, passthrough_headers);
        self.write_sheet(&analysis, ANALYSIS_FILE)?;
        self.write_sheet(&original, ORIGINAL_FILE)?;

        let svg = render_scatter_svg(&output.scatter, self.chart_size)?;
        self.write_file(CHART_FILE, svg.as_bytes())?;

        let manifest = ReportManifest {
            version: VERSION.to_string(),
            source: source.map(|p| p.display().to_string()),
            sheets: vec![
                SheetEntry {
                    name: analysis.name.to_string(),
                    file: ANALYSIS_FILE.to_string(),
                    rows: analysis.row_count(),
                },
                SheetEntry {
                    name: original.name.to_string(),
                    file: ORIGINAL_FILE.to_string(),
                    rows: original.row_count(),
                },
                SheetEntry {
                    name: VISUALIZATION_SHEET.to_string(),
                    file: CHART_FILE.to_string(),
                    rows: output.scatter.points.len(),
                },
            ],
            summary: output.summary.clone(),
        };
        let json = serde_json::to_string_pretty(&manifest)
            .map_err(|e| ReportError::Manifest(e.to_string()))?;
        self.write_file(MANIFEST_FILE, json.as_bytes())?;

        tracing::info!(
            output_dir = %self.output_dir.display(),
            rows = analysis.row_count(),
            points = output.scatter.points.len(),
            "report bundle written"
        );
        Ok(manifest)
    }

    fn write_sheet(&self, view: &SheetView, file: &str) -> Result<(), ReportError> {
        let path = self.output_dir.join(file);
        let sheet_error = |e: csv::Error| ReportError::Sheet {
            sheet: view.name.to_string(),
            message: e.to_string(),
        };
        let mut writer = csv::Writer::from_path(&path).map_err(sheet_error)?;
        writer.write_record(&view.headers).map_err(sheet_error)?;
        for row in &view.rows {
            writer.write_record(row).map_err(sheet_error)?;
        }
        writer.flush().map_err(|e| ReportError::Io {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn write_file(&self, file: &str, contents: &[u8]) -> Result<(), ReportError> {
        let path = self.output_dir.join(file);
        fs::write(&path, contents).map_err(|e| ReportError::Io {
            path,
            message: e.to_string(),
        })
    }
}
