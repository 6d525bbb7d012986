//! Service layer for the budget tracker
//!
//! The service layer provides the ledger's derived behaviour: schema
//! normalization, CSV import, filtered views and aggregate summaries.

pub mod import;
pub mod query;
pub mod schema;
pub mod summary;

pub use import::{import_csv, ImportOptions, ImportReport};
pub use query::{filter, LedgerEntry, MonthFilter, TransactionFilter};
pub use schema::{normalize, CellIssue, Column, NormalizedTable, RawTable};
pub use summary::{
    category_breakdown, category_expense_totals, current_monthly_summary, monthly_summary,
    running_balance, BalancePoint, CategoryTotal, MonthlySummary,
};
