//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger data for terminal display,
//! including tables, summary lines and simple bar charts.

pub mod report;
pub mod transaction;

pub use report::{
    format_budgets, format_category_breakdown, format_import_report, format_monthly_summary,
    format_recurring, format_running_balance,
};
pub use transaction::{
    format_transaction_details, format_transaction_history, format_transaction_row,
};
