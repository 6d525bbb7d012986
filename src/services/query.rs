//! Transaction filtering
//!
//! Derives filtered views of the ledger. All predicates are combined with
//! AND, and the result keeps ledger order together with each entry's
//! position so that callers can edit or delete from a filtered view.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

use crate::models::{Category, Transaction, MONTH_LABEL_FORMAT};
use crate::state::Ledger;

/// Label that disables month filtering
pub const ALL_MONTHS: &str = "All";

/// Month restriction for a filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MonthFilter {
    #[default]
    All,
    /// Exact month-year label, e.g. "January 2024"
    Label(String),
}

impl MonthFilter {
    /// Build from a user label; empty or "All" disables the filter
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case(ALL_MONTHS) {
            Self::All
        } else {
            Self::Label(label.to_string())
        }
    }

    fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Label(label) => txn.month_label().as_deref() == Some(label.as_str()),
        }
    }
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description
    pub text: Option<String>,
    /// Allowed categories; empty means any
    pub categories: BTreeSet<Category>,
    pub month: MonthFilter,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by description text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Allow a category (may be called repeatedly)
    pub fn category(mut self, category: Category) -> Self {
        self.categories.insert(category);
        self
    }

    /// Filter by month-year label
    pub fn month(mut self, label: &str) -> Self {
        self.month = MonthFilter::from_label(label);
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_text(txn) && self.matches_category(txn) && self.month.matches(txn)
    }

    fn matches_text(&self, txn: &Transaction) -> bool {
        let needle = match self.text.as_deref() {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return true,
        };
        txn.description
            .as_deref()
            .map(|d| d.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }

    fn matches_category(&self, txn: &Transaction) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        txn.category
            .map(|c| self.categories.contains(&c))
            .unwrap_or(false)
    }
}

/// A transaction together with its ledger position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerEntry<'a> {
    pub position: usize,
    pub transaction: &'a Transaction,
}

/// Stable subsequence of the ledger matching the filter
pub fn filter<'a>(ledger: &'a Ledger, filter: &TransactionFilter) -> Vec<LedgerEntry<'a>> {
    ledger
        .iter()
        .enumerate()
        .filter(|(_, txn)| filter.matches(txn))
        .map(|(position, transaction)| LedgerEntry {
            position,
            transaction,
        })
        .collect()
}

/// Distinct month-year labels present in the ledger, oldest first
pub fn month_options(ledger: &Ledger) -> Vec<String> {
    let months: BTreeSet<NaiveDate> = ledger
        .iter()
        .filter_map(|t| t.date)
        .filter_map(|d| NaiveDate::from_ymd_opt(d.year(), d.month(), 1))
        .collect();

    months
        .into_iter()
        .map(|m| m.format(MONTH_LABEL_FORMAT).to_string())
        .collect()
}

/// Distinct categories present in the ledger, in category order
pub fn category_options(ledger: &Ledger) -> Vec<Category> {
    ledger
        .iter()
        .filter_map(|t| t.category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
