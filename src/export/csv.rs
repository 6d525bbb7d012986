//! CSV Export functionality
//!
//! Writes the ledger in the canonical five-column shape. Missing values are
//! written as empty cells, amounts as plain two-decimal numbers.

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::services::schema::{canonical_cells, check_date_format, CANONICAL_COLUMNS};
use crate::state::Ledger;

/// Export all transactions to CSV
pub fn export_ledger_csv<W: Write>(
    ledger: &Ledger,
    writer: W,
    date_format: &str,
) -> TrackerResult<()> {
    check_date_format(date_format).map_err(TrackerError::Export)?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(CANONICAL_COLUMNS)
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    for txn in ledger {
        csv_writer
            .write_record(canonical_cells(txn, date_format))
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    tracing::debug!(rows = ledger.len(), "exported ledger");
    Ok(())
}
