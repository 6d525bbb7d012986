//! Budget Tracker - terminal personal finance ledger
//!
//! This library provides the core functionality for the budget tracker: an
//! in-memory ledger of income and expense transactions with CSV import and
//! export, filtered history views and summary aggregations.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data types (transactions, money, categories, budgets)
//! - `services`: Schema normalization, CSV import, filtering and aggregation
//! - `state`: The ledger store and the per-run session
//! - `export`: CSV export
//! - `config`: Settings and path management
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive shell
//! - `logging`: Tracing subscriber setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use budget_tracker::models::{Category, Currency, Money, NewTransaction, TransactionKind};
//! use budget_tracker::services::summary::category_expense_totals;
//! use budget_tracker::state::Session;
//!
//! let mut session = Session::new(Currency::Usd);
//! session.add_transaction(NewTransaction::new(
//!     TransactionKind::Expense,
//!     Category::Food,
//!     Money::from_cents(1250),
//! ));
//!
//! let totals = category_expense_totals(session.ledger());
//! assert_eq!(totals[&Category::Food], Money::from_cents(1250));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

pub use error::{TrackerError, TrackerResult};
