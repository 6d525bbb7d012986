//! In-memory ledger
//!
//! An ordered list of transactions addressed by zero-based position.
//! Deleting an entry shifts every later entry down by one. Operations on an
//! invalid position are rejected and leave the ledger untouched.

use tracing::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Transaction, TransactionPatch};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(entries: Vec<Transaction>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Transaction> {
        self.entries.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.entries
    }

    /// Add to the end. Returns the new entry's position.
    pub fn append(&mut self, transaction: Transaction) -> usize {
        debug!(id = %transaction.id, position = self.entries.len(), "appending transaction");
        self.entries.push(transaction);
        self.entries.len() - 1
    }

    /// Add several entries to the end, preserving their order
    pub fn extend(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        self.entries.extend(transactions);
    }

    /// Overwrite the fields named in the patch at `position`
    pub fn update(
        &mut self,
        position: usize,
        patch: &TransactionPatch,
    ) -> TrackerResult<&Transaction> {
        let len = self.entries.len();
        let txn = self
            .entries
            .get_mut(position)
            .ok_or_else(|| TrackerError::out_of_range(position_i64(position), len))?;

        txn.apply(patch);
        debug!(id = %txn.id, position, "updated transaction");
        Ok(txn)
    }

    /// Remove the entry at `position`, compacting later positions
    pub fn delete(&mut self, position: usize) -> TrackerResult<Transaction> {
        if position >= self.entries.len() {
            return Err(TrackerError::out_of_range(
                position_i64(position),
                self.entries.len(),
            ));
        }
        let removed = self.entries.remove(position);
        debug!(id = %removed.id, position, "deleted transaction");
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn position_i64(position: usize) -> i64 {
    i64::try_from(position).unwrap_or(i64::MAX)
}

/// Convert a user-supplied signed position into an index
pub fn resolve_position(position: i64, len: usize) -> TrackerResult<usize> {
    usize::try_from(position)
        .ok()
        .filter(|p| *p < len)
        .ok_or_else(|| TrackerError::out_of_range(position, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, TransactionKind};
    use chrono::NaiveDate;

    fn txn(day: u32, description: &str, cents: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            TransactionKind::Expense,
            Category::Food,
            Some(description.to_string()),
            Money::from_cents(cents),
        )
    }

    fn sample() -> Ledger {
        Ledger::from_transactions(vec![
            txn(1, "a", 100),
            txn(2, "b", 200),
            txn(3, "c", 300),
        ])
    }

    fn descriptions(ledger: &Ledger) -> Vec<&str> {
        ledger
            .iter()
            .map(|t| t.description.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_append_preserves_order() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.append(txn(1, "first", 100)), 0);
        assert_eq!(ledger.append(txn(1, "second", 100)), 1);
        assert_eq!(descriptions(&ledger), vec!["first", "second"]);
    }

    #[test]
    fn test_append_allows_duplicates() {
        let mut ledger = Ledger::new();
        let t = txn(1, "same", 100);
        ledger.append(t.clone());
        ledger.append(t);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_update_overwrites_named_fields() {
        let mut ledger = sample();
        let updated = ledger
            .update(1, &TransactionPatch::new().description("bee"))
            .unwrap();
        assert_eq!(updated.description.as_deref(), Some("bee"));
        assert_eq!(updated.amount, Some(Money::from_cents(200)));
        assert_eq!(descriptions(&ledger), vec!["a", "bee", "c"]);
    }

    #[test]
    fn test_update_out_of_range_leaves_ledger_unchanged() {
        let mut ledger = sample();
        let before = ledger.clone();

        let err = ledger
            .update(3, &TransactionPatch::new().amount(Money::from_cents(1)))
            .unwrap_err();
        assert!(err.is_out_of_range());

        let err = ledger
            .update(usize::MAX, &TransactionPatch::new().description("x"))
            .unwrap_err();
        assert!(err.is_out_of_range());

        assert_eq!(ledger, before);
    }

    #[test]
    fn test_delete_compacts_positions() {
        let mut ledger = sample();
        let removed = ledger.delete(0).unwrap();
        assert_eq!(removed.description.as_deref(), Some("a"));
        assert_eq!(descriptions(&ledger), vec!["b", "c"]);
        assert_eq!(ledger.get(0).unwrap().description.as_deref(), Some("b"));
    }

    #[test]
    fn test_delete_then_append_keeps_length() {
        let mut ledger = sample();
        let original_len = ledger.len();
        let next = ledger.get(2).cloned().unwrap();

        ledger.delete(1).unwrap();
        ledger.append(txn(9, "x", 900));

        assert_eq!(ledger.len(), original_len);
        assert_eq!(ledger.get(1).unwrap(), &next);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut ledger = sample();
        let before = ledger.clone();
        assert!(ledger.delete(3).unwrap_err().is_out_of_range());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_resolve_position() {
        assert_eq!(resolve_position(0, 2).unwrap(), 0);
        assert_eq!(resolve_position(1, 2).unwrap(), 1);
        assert!(resolve_position(2, 2).unwrap_err().is_out_of_range());
        assert!(resolve_position(-1, 2).unwrap_err().is_out_of_range());
        assert!(resolve_position(0, 0).unwrap_err().is_out_of_range());
    }
}
