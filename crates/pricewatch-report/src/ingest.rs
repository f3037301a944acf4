//! CSV ingestion into [`RawSalesRow`]s.
//!
//! Required columns are located by header name (see `ingest.columns`);
//! every other column is carried along as pass-through, in source order.
//! Cells are trimmed and empty cells read as missing. Type checking is left
//! to the pipeline's validator so the invalid-row policy applies uniformly.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use pricewatch_core::config::{ColumnMapping, IngestConfig};
use pricewatch_core::errors::IngestError;
use pricewatch_core::RawSalesRow;

/// Rows read from one source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestedTable {
    /// Full header row as read.
    pub headers: Vec<String>,
    /// Non-required headers, in source order.
    pub passthrough_headers: Vec<String>,
    pub rows: Vec<RawSalesRow>,
}

/// Header positions of the required columns.
#[derive(Debug, Clone, Copy)]
struct RequiredColumns {
    dealer_id: usize,
    part_id: usize,
    year: usize,
    month: usize,
    unit_price: usize,
    quantity: usize,
}

impl RequiredColumns {
    fn locate(headers: &[String], mapping: &ColumnMapping) -> Result<Self, IngestError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| IngestError::MissingColumn {
                    column: name.to_string(),
                })
        };
        Ok(Self {
            dealer_id: find(mapping.effective_dealer_id())?,
            part_id: find(mapping.effective_part_id())?,
            year: find(mapping.effective_year())?,
            month: find(mapping.effective_month())?,
            unit_price: find(mapping.effective_unit_price())?,
            quantity: find(mapping.effective_quantity())?,
        })
    }

    fn contains(&self, idx: usize) -> bool {
        [
            self.dealer_id,
            self.part_id,
            self.year,
            self.month,
            self.unit_price,
            self.quantity,
        ]
        .contains(&idx)
    }
}

/// Reads the source dataset.
#[derive(Debug, Clone)]
pub struct CsvIngestor {
    columns: ColumnMapping,
    delimiter: u8,
}

impl Default for CsvIngestor {
    fn default() -> Self {
        Self::new(&IngestConfig::default())
    }
}

impl CsvIngestor {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            columns: config.columns.clone(),
            delimiter: config.effective_delimiter(),
        }
    }

    pub fn read_path(&self, path: &Path) -> Result<IngestedTable, IngestError> {
        let file = File::open(path).map_err(|e| IngestError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let table = self.read(file)?;
        tracing::info!(
            path = %path.display(),
            rows = table.rows.len(),
            passthrough = table.passthrough_headers.len(),
            "source dataset loaded"
        );
        Ok(table)
    }

    pub fn read<R: Read>(&self, reader: R) -> Result<IngestedTable, IngestError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();
        let required = RequiredColumns::locate(&headers, &self.columns)?;
        let passthrough_idx: Vec<usize> =
            (0..headers.len()).filter(|i| !required.contains(*i)).collect();

        let mut rows = Vec::new();
        for (i, result) in csv_reader.records().enumerate() {
            let record = result.map_err(csv_error)?;
            let cell = |idx: usize| {
                record
                    .get(idx)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            };
            rows.push(RawSalesRow {
                row: i + 1,
                dealer_id: cell(required.dealer_id),
                part_id: cell(required.part_id),
                year: cell(required.year),
                month: cell(required.month),
                unit_price: cell(required.unit_price),
                quantity: cell(required.quantity),
                passthrough: passthrough_idx
                    .iter()
                    .map(|&idx| {
                        (
                            headers[idx].clone(),
                            record.get(idx).unwrap_or_default().to_string(),
                        )
                    })
                    .collect(),
            });
        }

        Ok(IngestedTable {
            passthrough_headers: passthrough_idx.iter().map(|&i| headers[i].clone()).collect(),
            headers,
            rows,
        })
    }
}

fn csv_error(e: csv::Error) -> IngestError {
    IngestError::Csv {
        line: e.position().map(|p| p.line()).unwrap_or(0),
        message: e.to_string(),
    }
}
