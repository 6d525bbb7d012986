//! Core data models for the budget tracker
//!
//! This module contains the data structures of the ledger domain:
//! transactions, categories, money, budgets and recurring templates.

pub mod budget;
pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod recurring;
pub mod transaction;

pub use budget::Budgets;
pub use category::Category;
pub use currency::Currency;
pub use ids::{TemplateId, TransactionId};
pub use money::Money;
pub use recurring::RecurringTemplate;
pub use transaction::{
    NewTransaction, Transaction, TransactionKind, TransactionPatch, MONTH_LABEL_FORMAT,
};
