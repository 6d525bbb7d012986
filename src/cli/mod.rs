//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the session and service layers.

pub mod config;
pub mod export;
pub mod report;
pub mod shell;

use chrono::NaiveDateTime;

use crate::models::Money;
use crate::services::schema::parse_date;

pub use config::{handle_config_command, ConfigCommands};
pub use export::handle_export;
pub use report::{
    render_balance, render_categories, render_list, render_months, render_summary, ListArgs,
    SummaryArgs,
};
pub use shell::Shell;

/// clap value parser for amounts; negative values are rejected
pub fn parse_money_arg(s: &str) -> Result<Money, String> {
    let amount = Money::parse(s).map_err(|e| e.to_string())?;
    if amount.is_negative() {
        return Err(format!("amount must not be negative: {}", s.trim()));
    }
    Ok(amount)
}

/// clap value parser for dates, accepting the same formats as import
pub fn parse_date_arg(s: &str) -> Result<NaiveDateTime, String> {
    parse_date(s).ok_or_else(|| format!("unrecognized date '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_money_arg() {
        assert_eq!(parse_money_arg("12.50").unwrap(), Money::from_cents(1250));
        assert_eq!(parse_money_arg("$1,000").unwrap(), Money::from_cents(100000));
        assert!(parse_money_arg("twelve").is_err());
        assert!(parse_money_arg("-5").unwrap_err().contains("must not be negative"));
        assert_eq!(parse_money_arg("0").unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_date_arg() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_date_arg("2024-01-05").unwrap(), expected);
        assert!(parse_date_arg("yesterday").is_err());
    }
}
