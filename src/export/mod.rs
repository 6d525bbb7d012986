//! Export module for the budget tracker
//!
//! Serializes the ledger back to the canonical five-column CSV shape.

pub mod csv;

pub use self::csv::export_ledger_csv;
