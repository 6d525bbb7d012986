//! Recurring transaction templates
//!
//! A template records what a repeating entry looks like. It has no schedule
//! and adding one never creates ledger entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::TemplateId;
use super::money::Money;
use super::transaction::{clean_description, NewTransaction, TransactionKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTemplate {
    pub id: TemplateId,
    pub kind: TransactionKind,
    pub category: Category,
    pub amount: Money,
    pub description: Option<String>,
}

impl RecurringTemplate {
    pub fn new(
        kind: TransactionKind,
        category: Category,
        amount: Money,
        description: Option<String>,
    ) -> Self {
        Self {
            id: TemplateId::new(),
            kind,
            category,
            amount: amount.abs(),
            description: clean_description(description),
        }
    }
}

impl From<NewTransaction> for RecurringTemplate {
    fn from(input: NewTransaction) -> Self {
        Self::new(input.kind, input.category, input.amount, input.description)
    }
}

impl fmt::Display for RecurringTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.category, self.amount)?;
        if let Some(description) = &self.description {
            write!(f, " ({})", description)?;
        }
        Ok(())
    }
}
