//! Report formatting utilities for terminal output
//!
//! Renders the aggregation views: monthly summary line, category breakdown,
//! running balance, budgets and recurring templates.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Budgets, Currency, RecurringTemplate};
use crate::services::import::ImportReport;
use crate::services::summary::{BalancePoint, CategoryTotal, MonthlySummary};

const BAR_WIDTH: usize = 20;

/// `January 2024 – Income: $50.00 | Expenses: $12.50 | Balance: $37.50`
pub fn format_monthly_summary(summary: &MonthlySummary, currency: Currency) -> String {
    let sym = currency.symbol();
    format!(
        "{} – Income: {} | Expenses: {} | Balance: {}",
        summary.month,
        summary.income.format_with_symbol(sym),
        summary.expenses.format_with_symbol(sym),
        summary.balance.format_with_symbol(sym),
    )
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Expense totals per category with their share of all spending
pub fn format_category_breakdown(totals: &[CategoryTotal], currency: Currency) -> String {
    if totals.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let rows: Vec<CategoryRow> = totals
        .iter()
        .map(|t| CategoryRow {
            category: t.category.to_string(),
            total: t.total.format_with_symbol(currency.symbol()),
            share: format_percentage(t.percentage),
            bar: format_bar(t.percentage, 100.0, BAR_WIDTH),
        })
        .collect();

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Running balance, one row per transaction in date order
pub fn format_running_balance(series: &[BalancePoint], currency: Currency) -> String {
    if series.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<BalanceRow> = series
        .iter()
        .map(|p| BalanceRow {
            date: p
                .date
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "----------".to_string()),
            balance: p.balance.format_with_symbol(currency.symbol()),
        })
        .collect();

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

/// Budget targets for every category; unset targets show as "not set"
pub fn format_budgets(budgets: &Budgets, currency: Currency) -> String {
    let mut output = String::new();
    for (category, target) in budgets.iter() {
        let target = target
            .map(|t| t.format_with_symbol(currency.symbol()))
            .unwrap_or_else(|| "not set".to_string());
        output.push_str(&format!("{:<14} {:>12}\n", category.as_str(), target));
    }
    output
}

/// Recurring templates, numbered from zero
pub fn format_recurring(templates: &[RecurringTemplate], currency: Currency) -> String {
    if templates.is_empty() {
        return "No recurring transactions.\n".to_string();
    }

    let mut output = String::new();
    for (i, template) in templates.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {} {} {}",
            i,
            template.kind,
            template.category,
            template.amount.format_with_symbol(currency.symbol())
        ));
        if let Some(description) = &template.description {
            output.push_str(&format!(" ({})", description));
        }
        output.push('\n');
    }
    output
}

/// Import outcome with one line per degraded cell or skipped record
pub fn format_import_report(report: &ImportReport) -> String {
    let mut output = format!("Imported {} transactions", report.imported);
    if report.is_clean() {
        output.push('\n');
        return output;
    }

    output.push_str(&format!(
        " ({} cells left empty, {} records skipped)\n",
        report.issues.len(),
        report.skipped_records.len()
    ));
    for issue in &report.issues {
        output.push_str(&format!("  {}\n", issue));
    }
    for skipped in &report.skipped_records {
        output.push_str(&format!("  skipped {}\n", skipped));
    }
    output
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
