//! Aggregations over the ledger
//!
//! Every view here is recomputed from the full, unfiltered ledger on each
//! call. Missing amounts count as zero.

use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;

use crate::models::{Category, Money, Transaction, MONTH_LABEL_FORMAT};
use crate::state::Ledger;

/// Expense total for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
    /// Share of all categorized expenses, 0-100
    pub percentage: f64,
}

/// Sum expense amounts per category.
///
/// Categories without expense rows are omitted rather than reported as zero.
pub fn category_expense_totals(ledger: &Ledger) -> BTreeMap<Category, Money> {
    let mut totals: BTreeMap<Category, Money> = BTreeMap::new();
    for txn in ledger.iter().filter(|t| t.is_expense()) {
        if let Some(category) = txn.category {
            *totals.entry(category).or_default() += txn.amount.unwrap_or_default();
        }
    }
    totals
}

/// Category totals with their share of the whole, in category order
pub fn category_breakdown(ledger: &Ledger) -> Vec<CategoryTotal> {
    let totals = category_expense_totals(ledger);
    let grand_total: Money = totals.values().copied().sum();

    totals
        .into_iter()
        .map(|(category, total)| {
            let percentage = if grand_total.is_zero() {
                0.0
            } else {
                (total.cents() as f64 / grand_total.cents() as f64) * 100.0
            };
            CategoryTotal {
                category,
                total,
                percentage,
            }
        })
        .collect()
}

/// Income, expenses and balance for one calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    /// Month-year label, e.g. "January 2024"
    pub month: String,
    pub income: Money,
    pub expenses: Money,
    /// income - expenses; may be negative
    pub balance: Money,
}

/// Summary for the month with the given label
pub fn monthly_summary(ledger: &Ledger, month: &str) -> MonthlySummary {
    let mut income = Money::zero();
    let mut expenses = Money::zero();

    for txn in ledger
        .iter()
        .filter(|t| t.month_label().as_deref() == Some(month))
    {
        let amount = txn.amount.unwrap_or_default();
        if txn.is_income() {
            income += amount;
        } else if txn.is_expense() {
            expenses += amount;
        }
    }

    MonthlySummary {
        month: month.to_string(),
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Summary for the current local calendar month
pub fn current_monthly_summary(ledger: &Ledger) -> MonthlySummary {
    monthly_summary(ledger, &current_month_label())
}

/// Label of the current local month
pub fn current_month_label() -> String {
    Local::now().format(MONTH_LABEL_FORMAT).to_string()
}

/// One point of the running balance series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancePoint {
    pub date: Option<NaiveDateTime>,
    pub balance: Money,
}

/// Cumulative balance in date order, one point per transaction.
///
/// The sort is stable, so entries with equal dates keep ledger order.
/// Undated entries sort last. Income adds its amount, anything else
/// subtracts it.
pub fn running_balance(ledger: &Ledger) -> Vec<BalancePoint> {
    let mut ordered: Vec<&Transaction> = ledger.iter().collect();
    ordered.sort_by_key(|t| (t.date.is_none(), t.date));

    let mut balance = Money::zero();
    ordered
        .into_iter()
        .map(|txn| {
            balance += txn.signed_amount();
            BalancePoint {
                date: txn.date,
                balance,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn txn(
        date: NaiveDateTime,
        kind: TransactionKind,
        category: Category,
        description: &str,
        cents: i64,
    ) -> Transaction {
        Transaction::new(
            date,
            kind,
            category,
            Some(description.to_string()),
            Money::from_cents(cents),
        )
    }

    fn january() -> Ledger {
        Ledger::from_transactions(vec![
            txn(day(2024, 1, 5), TransactionKind::Expense, Category::Food, "lunch", 1250),
            txn(day(2024, 1, 10), TransactionKind::Income, Category::Other, "gift", 5000),
        ])
    }

    #[test]
    fn test_monthly_summary_example() {
        let summary = monthly_summary(&january(), "January 2024");
        assert_eq!(summary.month, "January 2024");
        assert_eq!(summary.income, Money::from_cents(5000));
        assert_eq!(summary.expenses, Money::from_cents(1250));
        assert_eq!(summary.balance, Money::from_cents(3750));
    }

    #[test]
    fn test_monthly_summary_empty_month_is_zero() {
        let summary = monthly_summary(&january(), "March 2024");
        assert_eq!(summary.income, Money::zero());
        assert_eq!(summary.expenses, Money::zero());
        assert_eq!(summary.balance, Money::zero());
    }

    #[test]
    fn test_monthly_summary_can_go_negative() {
        let ledger = Ledger::from_transactions(vec![txn(
            day(2024, 4, 1),
            TransactionKind::Expense,
            Category::Bills,
            "rent",
            90000,
        )]);
        let summary = monthly_summary(&ledger, "April 2024");
        assert_eq!(summary.balance, Money::from_cents(-90000));
    }

    #[test]
    fn test_current_month_summary_uses_today() {
        let now = Local::now().naive_local();
        let ledger = Ledger::from_transactions(vec![
            txn(now, TransactionKind::Income, Category::Other, "pay", 10000),
            txn(day(1999, 1, 1), TransactionKind::Income, Category::Other, "old", 777),
        ]);
        let summary = current_monthly_summary(&ledger);
        assert_eq!(summary.month, current_month_label());
        assert_eq!(summary.income, Money::from_cents(10000));
    }

    #[test]
    fn test_running_balance_example() {
        let series = running_balance(&january());
        assert_eq!(
            series,
            vec![
                BalancePoint {
                    date: Some(day(2024, 1, 5)),
                    balance: Money::from_cents(-1250),
                },
                BalancePoint {
                    date: Some(day(2024, 1, 10)),
                    balance: Money::from_cents(3750),
                },
            ]
        );
    }

    #[test]
    fn test_running_balance_sorts_by_date_stably() {
        let ledger = Ledger::from_transactions(vec![
            txn(day(2024, 2, 1), TransactionKind::Income, Category::Other, "late", 100),
            txn(day(2024, 1, 1), TransactionKind::Expense, Category::Food, "tie-a", 10),
            txn(day(2024, 1, 1), TransactionKind::Income, Category::Other, "tie-b", 1000),
        ]);
        let balances: Vec<i64> = running_balance(&ledger)
            .iter()
            .map(|p| p.balance.cents())
            .collect();
        assert_eq!(balances, vec![-10, 990, 1090]);
    }

    #[test]
    fn test_running_balance_undated_last_and_missing_amount() {
        let mut undated = txn(day(2024, 1, 1), TransactionKind::Income, Category::Other, "x", 500);
        undated.date = None;
        let mut no_amount = txn(day(2024, 1, 2), TransactionKind::Expense, Category::Food, "y", 0);
        no_amount.amount = None;

        let ledger = Ledger::from_transactions(vec![
            undated,
            no_amount,
            txn(day(2024, 1, 3), TransactionKind::Income, Category::Other, "z", 200),
        ]);
        let series = running_balance(&ledger);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].balance, Money::zero());
        assert_eq!(series[1].balance, Money::from_cents(200));
        assert_eq!(series[2].date, None);
        assert_eq!(series[2].balance, Money::from_cents(700));
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_overflowing() {
        let huge = Money::from_cents(i64::MAX - 1);
        let ledger = Ledger::from_transactions(vec![
            Transaction::new(day(2024, 1, 1), TransactionKind::Expense, Category::Food, None, huge),
            Transaction::new(day(2024, 1, 2), TransactionKind::Expense, Category::Food, None, huge),
            Transaction::new(day(2024, 1, 3), TransactionKind::Income, Category::Other, None, huge),
            Transaction::new(day(2024, 1, 4), TransactionKind::Income, Category::Other, None, huge),
        ]);

        let totals = category_expense_totals(&ledger);
        assert_eq!(totals[&Category::Food], Money::from_cents(i64::MAX));

        let summary = monthly_summary(&ledger, "January 2024");
        assert_eq!(summary.income, Money::from_cents(i64::MAX));
        assert_eq!(summary.balance, Money::zero());

        let series = running_balance(&ledger);
        assert_eq!(series[1].balance, Money::from_cents(i64::MIN));
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn test_category_totals_group_expenses() {
        let ledger = Ledger::from_transactions(vec![
            txn(day(2024, 1, 1), TransactionKind::Expense, Category::Food, "a", 1000),
            txn(day(2024, 1, 2), TransactionKind::Expense, Category::Bills, "b", 3000),
            txn(day(2024, 1, 3), TransactionKind::Expense, Category::Food, "c", 500),
            txn(day(2024, 1, 4), TransactionKind::Income, Category::Food, "d", 9999),
        ]);
        let totals = category_expense_totals(&ledger);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&Category::Food], Money::from_cents(1500));
        assert_eq!(totals[&Category::Bills], Money::from_cents(3000));
        assert!(!totals.contains_key(&Category::Transport));
    }

    #[test]
    fn test_category_totals_without_expenses_is_empty() {
        let ledger = Ledger::from_transactions(vec![txn(
            day(2024, 1, 1),
            TransactionKind::Income,
            Category::Other,
            "salary",
            100000,
        )]);
        assert!(category_expense_totals(&ledger).is_empty());
        assert!(category_breakdown(&ledger).is_empty());
    }

    #[test]
    fn test_category_breakdown_percentages() {
        let ledger = Ledger::from_transactions(vec![
            txn(day(2024, 1, 1), TransactionKind::Expense, Category::Food, "a", 2500),
            txn(day(2024, 1, 2), TransactionKind::Expense, Category::Bills, "b", 7500),
        ]);
        let breakdown = category_breakdown(&ledger);
        assert_eq!(breakdown[0].category, Category::Food);
        assert!((breakdown[0].percentage - 25.0).abs() < 1e-9);
        assert!((breakdown[1].percentage - 75.0).abs() < 1e-9);
    }
}
