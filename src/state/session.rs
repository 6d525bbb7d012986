//! Session state
//!
//! The session owns everything a user builds up while the program runs: the
//! ledger, category budgets, recurring templates, the edit cursor and the
//! display currency. It is passed explicitly to every handler and dropped
//! when the process exits.

use chrono::{Local, NaiveDateTime};
use std::io::{Read, Write};
use tracing::{debug, info};

use super::ledger::Ledger;
use crate::error::{TrackerError, TrackerResult};
use crate::export::csv::export_ledger_csv;
use crate::models::{
    Budgets, Category, Currency, Money, NewTransaction, RecurringTemplate, Transaction,
    TransactionPatch,
};
use crate::services::import::{import_csv, ImportOptions, ImportReport};

/// How imported rows are combined with the current ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Add imported rows after the existing entries
    #[default]
    Append,
    /// Discard the current ledger first
    Replace,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    ledger: Ledger,
    budgets: Budgets,
    recurring: Vec<RecurringTemplate>,
    editing: Option<usize>,
    currency: Currency,
}

impl Session {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            ..Self::default()
        }
    }

    /// Start a session from an existing ledger
    pub fn with_ledger(ledger: Ledger, currency: Currency) -> Self {
        Self {
            ledger,
            currency,
            ..Self::default()
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn budgets(&self) -> &Budgets {
        &self.budgets
    }

    pub fn recurring(&self) -> &[RecurringTemplate] {
        &self.recurring
    }

    /// Position currently being edited, if any
    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// Record a new transaction dated now (or at `input.date`).
    ///
    /// A zero amount is ignored and `None` is returned.
    pub fn add_transaction(&mut self, input: NewTransaction) -> Option<&Transaction> {
        if !input.amount.is_positive() {
            debug!(amount = %input.amount, "ignoring transaction with empty amount");
            return None;
        }

        let date = input.date.unwrap_or_else(now);
        let txn = Transaction::new(
            date,
            input.kind,
            input.category,
            input.description,
            input.amount,
        );
        let position = self.ledger.append(txn);
        self.ledger.get(position)
    }

    /// Record a recurring template. A zero amount is ignored.
    pub fn add_recurring(&mut self, input: NewTransaction) -> Option<&RecurringTemplate> {
        if !input.amount.is_positive() {
            debug!(amount = %input.amount, "ignoring recurring template with empty amount");
            return None;
        }

        let template = RecurringTemplate::from(input);
        debug!(id = %template.id, "added recurring template");
        self.recurring.push(template);
        self.recurring.last()
    }

    pub fn set_budget(&mut self, category: Category, target: Option<Money>) {
        debug!(%category, target = ?target, "setting budget target");
        self.budgets.set_target(category, target);
    }

    pub fn budget(&self, category: Category) -> Option<Money> {
        self.budgets.target(category)
    }

    /// Overwrite fields of the entry at `position`
    pub fn update(
        &mut self,
        position: usize,
        patch: &TransactionPatch,
    ) -> TrackerResult<&Transaction> {
        self.ledger.update(position, patch)
    }

    /// Delete the entry at `position`. Any edit in progress is abandoned.
    pub fn delete(&mut self, position: usize) -> TrackerResult<Transaction> {
        let removed = self.ledger.delete(position)?;
        self.editing = None;
        Ok(removed)
    }

    /// Put the entry at `position` into edit mode
    pub fn begin_edit(&mut self, position: usize) -> TrackerResult<&Transaction> {
        let txn = self
            .ledger
            .get(position)
            .ok_or_else(|| TrackerError::out_of_range(position as i64, self.ledger.len()))?;
        self.editing = Some(position);
        Ok(txn)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Apply the patch to the entry being edited and leave edit mode
    pub fn save_edit(&mut self, patch: &TransactionPatch) -> TrackerResult<&Transaction> {
        let position = self.editing.take().ok_or_else(|| {
            TrackerError::Validation("No transaction is being edited".to_string())
        })?;
        self.ledger.update(position, patch)
    }

    /// Read CSV rows into the ledger
    pub fn import_csv<R: Read>(
        &mut self,
        reader: R,
        options: &ImportOptions,
        mode: ImportMode,
    ) -> TrackerResult<ImportReport> {
        let (rows, report) = import_csv(reader, options)?;
        if mode == ImportMode::Replace {
            self.ledger.clear();
            self.editing = None;
        }
        self.ledger.extend(rows);
        info!(
            imported = report.imported,
            skipped = report.skipped_records.len(),
            issues = report.issues.len(),
            total = self.ledger.len(),
            "imported transactions"
        );
        Ok(report)
    }

    /// Write the ledger as canonical CSV
    pub fn export_csv<W: Write>(&self, writer: W, date_format: &str) -> TrackerResult<()> {
        export_ledger_csv(&self.ledger, writer, date_format)
    }

    /// Discard the ledger, budgets, recurring templates and edit cursor
    pub fn reset(&mut self) {
        info!(entries = self.ledger.len(), "resetting session");
        self.ledger.clear();
        self.budgets.clear();
        self.recurring.clear();
        self.editing = None;
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
