//! CLI command for exporting the ledger
//!
//! Writes canonical CSV either to a file or, with `-`, to the given writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{TrackerError, TrackerResult};
use crate::state::Session;

/// Target meaning "write to standard output"
pub const STDOUT_TARGET: &str = "-";

/// Export the ledger to `target`. Status messages go to `out` only when
/// the CSV itself does not.
pub fn handle_export<W: Write>(
    session: &Session,
    target: &str,
    date_format: &str,
    out: &mut W,
) -> TrackerResult<()> {
    if target == STDOUT_TARGET {
        return session.export_csv(out, date_format);
    }

    let path = Path::new(target);
    let file = File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    session.export_csv(BufWriter::new(file), date_format)?;

    writeln!(
        out,
        "Exported {} transactions to {}",
        session.ledger().len(),
        path.display()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, NewTransaction, TransactionKind};
    use tempfile::TempDir;

    fn session() -> Session {
        let mut session = Session::default();
        session.add_transaction(NewTransaction::new(
            TransactionKind::Income,
            Category::Other,
            Money::from_cents(100000),
        ));
        session
    }

    #[test]
    fn test_export_to_writer() {
        let mut out = Vec::new();
        handle_export(&session(), "-", "%Y-%m-%d", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Date,Type,Category,Description,Amount\n"));
        assert!(text.contains(",Income,Other,,1000.00"));
    }

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.csv");
        let mut out = Vec::new();

        handle_export(&session(), path.to_str().unwrap(), "%Y-%m-%d", &mut out).unwrap();

        let status = String::from_utf8(out).unwrap();
        assert!(status.starts_with("Exported 1 transactions to"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope").join("ledger.csv");
        let err = handle_export(&session(), path.to_str().unwrap(), "%Y-%m-%d", &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, TrackerError::Export(_)));
    }
}
