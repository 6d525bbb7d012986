//! CSV import
//!
//! Reads delimited text with a header row, normalizes it through the schema
//! normalizer and reports every cell that had to be left empty. Individual
//! records that cannot be read are skipped and reported; only a failing
//! reader aborts the import.

use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};
use tracing::warn;

use super::schema::{normalize, CellIssue, RawTable};
use crate::error::{TrackerError, TrackerResult};
use crate::models::Transaction;

/// Options for reading delimited text
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Field delimiter
    pub delimiter: u8,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ImportOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Summary of an import
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Number of transactions produced
    pub imported: usize,
    /// Cells that were unreadable and left empty
    pub issues: Vec<CellIssue>,
    /// Records that could not be read at all, with the reason
    pub skipped_records: Vec<String>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.skipped_records.is_empty()
    }
}

/// Parse CSV into normalized transactions
pub fn import_csv<R: Read>(
    reader: R,
    options: &ImportOptions,
) -> TrackerResult<(Vec<Transaction>, ImportReport)> {
    let (table, skipped_records) = read_table(reader, options)?;

    let normalized = normalize(&table);
    let report = ImportReport {
        imported: normalized.rows.len(),
        issues: normalized.issues,
        skipped_records,
    };

    if !report.is_clean() {
        warn!(
            issues = report.issues.len(),
            skipped = report.skipped_records.len(),
            "import completed with unreadable values"
        );
    }

    Ok((normalized.rows, report))
}

/// Read delimited text into a raw table, collecting unreadable records
fn read_table<R: Read>(
    reader: R,
    options: &ImportOptions,
) -> TrackerResult<(RawTable, Vec<String>)> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .byte_headers()
        .map_err(|e| TrackerError::Import(format!("Could not read header row: {}", e)))?;
    let mut table = RawTable::new(lossy_fields(headers));
    let mut skipped = Vec::new();

    let mut record = ByteRecord::new();
    loop {
        match csv_reader.read_byte_record(&mut record) {
            Ok(true) => table.push_row(lossy_fields(&record)),
            Ok(false) => break,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line().to_string())
                    .unwrap_or_else(|| "?".to_string());
                skipped.push(format!("line {}: {}", line, e));
            }
        }
    }

    Ok((table, skipped))
}

fn lossy_fields(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}
