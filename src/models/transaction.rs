//! Transaction model
//!
//! A transaction is one financial event. The amount is a magnitude; its sign
//! comes from the kind. Rows read from external tables may have missing
//! fields, so every column except the id is optional.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;

/// Label format used by month filters and the monthly summary ("January 2024")
pub const MONTH_LABEL_FORMAT: &str = "%B %Y";

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}'. Use Income or Expense",
                other
            )),
        }
    }
}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable identifier, independent of the ledger position
    pub id: TransactionId,

    /// When the transaction happened
    pub date: Option<NaiveDateTime>,

    pub kind: Option<TransactionKind>,

    pub category: Option<Category>,

    /// Free-text label
    pub description: Option<String>,

    /// Non-negative magnitude
    pub amount: Option<Money>,
}

impl Transaction {
    /// Create a fully populated transaction
    pub fn new(
        date: NaiveDateTime,
        kind: TransactionKind,
        category: Category,
        description: Option<String>,
        amount: Money,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date: Some(date),
            kind: Some(kind),
            category: Some(category),
            description: clean_description(description),
            amount: Some(amount.abs()),
        }
    }

    /// A row with every column missing
    pub fn empty() -> Self {
        Self {
            id: TransactionId::new(),
            date: None,
            kind: None,
            category: None,
            description: None,
            amount: None,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == Some(TransactionKind::Income)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == Some(TransactionKind::Expense)
    }

    /// Month-year label of the date, e.g. "January 2024"
    pub fn month_label(&self) -> Option<String> {
        self.date
            .map(|d| d.format(MONTH_LABEL_FORMAT).to_string())
    }

    /// Signed contribution to a balance: +amount for income, -amount
    /// otherwise. A missing amount contributes nothing.
    pub fn signed_amount(&self) -> Money {
        let amount = self.amount.unwrap_or_default();
        if self.is_income() {
            amount
        } else {
            -amount
        }
    }

    /// Compare the data columns, ignoring the generated id
    pub fn same_fields(&self, other: &Transaction) -> bool {
        self.date == other.date
            && self.kind == other.kind
            && self.category == other.category
            && self.description == other.description
            && self.amount == other.amount
    }

    /// Overwrite the fields named in the patch, leaving the others untouched
    pub fn apply(&mut self, patch: &TransactionPatch) {
        if let Some(date) = patch.date {
            self.date = Some(date);
        }
        if let Some(kind) = patch.kind {
            self.kind = Some(kind);
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(description) = &patch.description {
            self.description = clean_description(Some(description.clone()));
        }
        if let Some(amount) = patch.amount {
            self.amount = Some(amount.abs());
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        write!(
            f,
            "{} {} {} {}",
            date,
            self.kind.map(|k| k.as_str()).unwrap_or("?"),
            self.category.map(|c| c.as_str()).unwrap_or("?"),
            self.amount
                .map(|a| a.to_decimal_string())
                .unwrap_or_else(|| "-".to_string())
        )
    }
}

/// Blank descriptions are stored as missing
pub(crate) fn clean_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}

/// Field overrides for an update; `None` means "leave unchanged"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub date: Option<NaiveDateTime>,
    pub kind: Option<TransactionKind>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub amount: Option<Money>,
}

impl TransactionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }
}

/// User input for a new transaction or recurring template
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub category: Category,
    pub amount: Money,
    pub description: Option<String>,
    /// Defaults to the time of insertion
    pub date: Option<NaiveDateTime>,
}

impl NewTransaction {
    pub fn new(kind: TransactionKind, category: Category, amount: Money) -> Self {
        Self {
            kind,
            category,
            amount,
            description: None,
            date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn on(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }
}
