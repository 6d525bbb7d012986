//! CLI commands for ledger views
//!
//! Shared by the one-shot subcommands and the interactive shell. Each
//! handler renders to a string so callers decide where it goes.

use clap::Args;

use crate::display::{
    format_category_breakdown, format_monthly_summary, format_running_balance,
    format_transaction_history,
};
use crate::models::Category;
use crate::services::query::{filter, month_options, TransactionFilter, ALL_MONTHS};
use crate::services::summary::{
    category_breakdown, current_monthly_summary, monthly_summary, running_balance,
};
use crate::state::Session;

/// Filters for the transaction history
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only descriptions containing this text (case-insensitive)
    #[arg(short, long)]
    pub text: Option<String>,

    /// Only these categories (repeatable)
    #[arg(short, long = "category", value_name = "CATEGORY")]
    pub categories: Vec<Category>,

    /// Month label such as "January 2024", or "All"
    #[arg(short, long)]
    pub month: Option<String>,
}

impl ListArgs {
    pub fn to_filter(&self) -> TransactionFilter {
        let mut filter = TransactionFilter::new();
        if let Some(text) = &self.text {
            filter = filter.text(text.as_str());
        }
        for category in &self.categories {
            filter = filter.category(*category);
        }
        if let Some(month) = &self.month {
            filter = filter.month(month);
        }
        filter
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct SummaryArgs {
    /// Month label such as "January 2024" (defaults to the current month)
    #[arg(short, long)]
    pub month: Option<String>,
}

/// Filtered transaction history
pub fn render_list(session: &Session, args: &ListArgs) -> String {
    let entries = filter(session.ledger(), &args.to_filter());
    format_transaction_history(&entries, session.currency())
}

/// Income, expenses and balance for one month
pub fn render_summary(session: &Session, args: &SummaryArgs) -> String {
    let summary = match args.month.as_deref() {
        Some(month) => monthly_summary(session.ledger(), month.trim()),
        None => current_monthly_summary(session.ledger()),
    };
    let mut output = format_monthly_summary(&summary, session.currency());
    output.push('\n');
    output
}

/// Expense totals per category
pub fn render_categories(session: &Session) -> String {
    format_category_breakdown(&category_breakdown(session.ledger()), session.currency())
}

/// Running balance over time
pub fn render_balance(session: &Session) -> String {
    format_running_balance(&running_balance(session.ledger()), session.currency())
}

/// Month filter options, "All" first
pub fn render_months(session: &Session) -> String {
    let mut output = format!("{}\n", ALL_MONTHS);
    for month in month_options(session.ledger()) {
        output.push_str(&month);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, Money, NewTransaction, TransactionKind};
    use chrono::NaiveDate;

    fn session() -> Session {
        let day = |d| {
            NaiveDate::from_ymd_opt(2024, 1, d)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        };
        let mut session = Session::new(Currency::Usd);
        session.add_transaction(
            NewTransaction::new(TransactionKind::Expense, Category::Food, Money::from_cents(1250))
                .with_description("lunch")
                .on(day(5)),
        );
        session.add_transaction(
            NewTransaction::new(TransactionKind::Income, Category::Other, Money::from_cents(5000))
                .with_description("gift")
                .on(day(10)),
        );
        session
    }

    #[test]
    fn test_list_args_build_filter() {
        let args = ListArgs {
            text: Some("lunch".into()),
            categories: vec![Category::Food, Category::Bills],
            month: Some("January 2024".into()),
        };
        let filter = args.to_filter();
        assert_eq!(filter.text.as_deref(), Some("lunch"));
        assert_eq!(filter.categories.len(), 2);
    }

    #[test]
    fn test_render_list_filters() {
        let output = render_list(
            &session(),
            &ListArgs {
                categories: vec![Category::Other],
                ..ListArgs::default()
            },
        );
        assert!(output.contains("gift"));
        assert!(!output.contains("lunch"));
    }

    #[test]
    fn test_render_summary_for_month() {
        let output = render_summary(
            &session(),
            &SummaryArgs {
                month: Some("January 2024".into()),
            },
        );
        assert_eq!(
            output,
            "January 2024 – Income: $50.00 | Expenses: $12.50 | Balance: $37.50\n"
        );
    }

    #[test]
    fn test_render_months() {
        assert_eq!(render_months(&session()), "All\nJanuary 2024\n");
        assert_eq!(render_months(&Session::default()), "All\n");
    }

    #[test]
    fn test_render_balance_and_categories() {
        let session = session();
        assert!(render_balance(&session).contains("$37.50"));
        assert!(render_categories(&session).contains("100%"));
    }
}
