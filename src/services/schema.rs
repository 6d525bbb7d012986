//! Schema normalization
//!
//! Coerces an arbitrary table of strings into the canonical five-column
//! ledger shape: Date, Type, Category, Description, Amount. Normalization
//! never fails. Cells that cannot be interpreted degrade to missing values
//! and are reported as [`CellIssue`]s.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::{self, Write as _};
use tracing::debug;

use crate::models::{Category, Money, Transaction, TransactionKind};

/// Canonical column headers, in output order
pub const CANONICAL_COLUMNS: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];

/// Date format written by exports; lossless for timestamps
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y"];

/// One of the five canonical columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    Kind,
    Category,
    Description,
    Amount,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Self::Date,
        Self::Kind,
        Self::Category,
        Self::Description,
        Self::Amount,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Kind => "Type",
            Self::Category => "Category",
            Self::Description => "Description",
            Self::Amount => "Amount",
        }
    }

    /// Match a source header, case-insensitively
    fn from_header(header: &str) -> Option<Self> {
        let h = header.trim().trim_start_matches('\u{feff}').to_lowercase();
        match h.as_str() {
            "date" => Some(Self::Date),
            "type" | "kind" => Some(Self::Kind),
            "category" => Some(Self::Category),
            "description" => Some(Self::Description),
            "amount" => Some(Self::Amount),
            _ => None,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// A table of untyped cells with a header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Render transactions as a canonical table; missing values become empty cells
    pub fn from_transactions<'a, I>(transactions: I, date_format: &str) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut table = Self::new(CANONICAL_COLUMNS);
        for txn in transactions {
            table.push_row(canonical_cells(txn, date_format));
        }
        table
    }
}

/// Check that chrono can render dates with `format`.
///
/// Unknown specifiers and ones a naive timestamp cannot satisfy (such as
/// `%z`) are rejected.
pub fn check_date_format(format: &str) -> Result<(), String> {
    let renders = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|sample| write!(String::new(), "{}", sample.format(format)).is_ok())
        .unwrap_or(false);

    if renders {
        Ok(())
    } else {
        Err(format!("Invalid date format '{}'", format))
    }
}

/// The five cells of a transaction in canonical order.
///
/// `date_format` must have passed [`check_date_format`].
pub fn canonical_cells(txn: &Transaction, date_format: &str) -> [String; 5] {
    [
        txn.date
            .map(|d| d.format(date_format).to_string())
            .unwrap_or_default(),
        txn.kind.map(|k| k.to_string()).unwrap_or_default(),
        txn.category.map(|c| c.to_string()).unwrap_or_default(),
        txn.description.clone().unwrap_or_default(),
        txn.amount
            .map(|a| a.to_decimal_string())
            .unwrap_or_default(),
    ]
}

/// A cell that could not be interpreted and was replaced by a missing value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellIssue {
    /// Zero-based data row (header excluded)
    pub row: usize,
    pub column: Column,
    pub value: String,
}

impl fmt::Display for CellIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}: could not read {} '{}', left empty",
            self.row + 1,
            self.column,
            self.value
        )
    }
}

/// Result of normalization
#[derive(Debug, Clone, Default)]
pub struct NormalizedTable {
    pub rows: Vec<Transaction>,
    pub issues: Vec<CellIssue>,
}

/// Normalize a raw table into canonical transactions
pub fn normalize(table: &RawTable) -> NormalizedTable {
    let mut positions: [Option<usize>; 5] = [None; 5];
    for (idx, header) in table.headers.iter().enumerate() {
        if let Some(column) = Column::from_header(header) {
            let slot = &mut positions[column as usize];
            if slot.is_none() {
                *slot = Some(idx);
            }
        }
    }

    let mut result = NormalizedTable::default();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let cell = |column: Column| -> Option<&str> {
            positions[column as usize]
                .and_then(|idx| row.get(idx))
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
        };

        let mut txn = Transaction::empty();
        let mut report = |column: Column, value: &str| {
            debug!(row = row_idx, column = %column, value, "degraded malformed cell");
            result.issues.push(CellIssue {
                row: row_idx,
                column,
                value: value.to_string(),
            });
        };

        if let Some(value) = cell(Column::Date) {
            txn.date = parse_date(value);
            if txn.date.is_none() {
                report(Column::Date, value);
            }
        }
        if let Some(value) = cell(Column::Kind) {
            txn.kind = value.parse::<TransactionKind>().ok();
            if txn.kind.is_none() {
                report(Column::Kind, value);
            }
        }
        if let Some(value) = cell(Column::Category) {
            txn.category = value.parse::<Category>().ok();
            if txn.category.is_none() {
                report(Column::Category, value);
            }
        }
        txn.description = cell(Column::Description).map(str::to_string);
        if let Some(value) = cell(Column::Amount) {
            txn.amount = parse_amount(value);
            if txn.amount.is_none() {
                report(Column::Amount, value);
            }
        }

        result.rows.push(txn);
    }

    result
}

/// Parse a timestamp or a plain date (taken as midnight)
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a non-negative amount; negative or malformed values are rejected
pub fn parse_amount(s: &str) -> Option<Money> {
    Money::parse(s).ok().filter(|m| !m.is_negative())
}
