//! Transaction display formatting
//!
//! Provides utilities for formatting transactions for terminal display,
//! including the history table and single-row labels.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Currency, Money, Transaction};
use crate::services::query::LedgerEntry;

const MISSING_DATE: &str = "----------";
const MISSING_FIELD: &str = "-";

/// One-line label for a transaction, e.g. `2024-01-05 | Expense | Food | $12.50`
pub fn format_transaction_row(txn: &Transaction, currency: Currency) -> String {
    format!(
        "{} | {} | {} | {}",
        date_cell(txn),
        txn.kind.map(|k| k.as_str()).unwrap_or(MISSING_FIELD),
        txn.category.map(|c| c.as_str()).unwrap_or(MISSING_FIELD),
        amount_cell(txn.amount, currency),
    )
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl HistoryRow {
    fn from_entry(entry: &LedgerEntry<'_>, currency: Currency) -> Self {
        let txn = entry.transaction;
        Self {
            position: entry.position,
            date: date_cell(txn),
            kind: txn
                .kind
                .map(|k| k.to_string())
                .unwrap_or_else(|| MISSING_FIELD.to_string()),
            category: txn
                .category
                .map(|c| c.to_string())
                .unwrap_or_else(|| MISSING_FIELD.to_string()),
            description: truncate(txn.description.as_deref().unwrap_or(""), 32),
            amount: amount_cell(txn.amount, currency),
        }
    }
}

/// Format filtered ledger entries as a history table.
///
/// The `#` column is the ledger position accepted by `edit` and `delete`.
pub fn format_transaction_history(entries: &[LedgerEntry<'_>], currency: Currency) -> String {
    if entries.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<HistoryRow> = entries
        .iter()
        .map(|e| HistoryRow::from_entry(e, currency))
        .collect();

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

/// Format transaction details for display
pub fn format_transaction_details(position: usize, txn: &Transaction, currency: Currency) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {} (#{})\n", txn.id, position));
    output.push_str(&format!("Date:        {}\n", date_cell(txn)));
    output.push_str(&format!(
        "Type:        {}\n",
        txn.kind.map(|k| k.as_str()).unwrap_or(MISSING_FIELD)
    ));
    output.push_str(&format!(
        "Category:    {}\n",
        txn.category.map(|c| c.as_str()).unwrap_or(MISSING_FIELD)
    ));
    output.push_str(&format!("Amount:      {}\n", amount_cell(txn.amount, currency)));

    if let Some(description) = &txn.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    output
}

fn date_cell(txn: &Transaction) -> String {
    txn.date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| MISSING_DATE.to_string())
}

fn amount_cell(amount: Option<Money>, currency: Currency) -> String {
    amount
        .map(|a| a.format_with_symbol(currency.symbol()))
        .unwrap_or_else(|| MISSING_FIELD.to_string())
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
