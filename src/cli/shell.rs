//! Interactive session
//!
//! Reads one command per line, tokenised with shell quoting rules and parsed
//! with clap. Errors are printed and the session carries on; only I/O
//! failures on the terminal end it.

use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use super::export::{handle_export, STDOUT_TARGET};
use super::report::{
    render_balance, render_categories, render_list, render_months, render_summary, ListArgs,
    SummaryArgs,
};
use super::{parse_date_arg, parse_money_arg};
use crate::config::Settings;
use crate::display::{
    format_budgets, format_import_report, format_recurring, format_transaction_details,
    format_transaction_row,
};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    Category, Currency, Money, NewTransaction, TransactionKind, TransactionPatch,
};
use crate::services::import::ImportOptions;
use crate::state::{resolve_position, ImportMode, Session};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "budget", disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

/// Fields of a new transaction or recurring template
#[derive(Args, Debug, Clone)]
pub struct TransactionArgs {
    /// Income or Expense
    pub kind: TransactionKind,

    /// Food, Transport, Bills, Entertainment or Other
    pub category: Category,

    /// Amount, e.g. 12.50
    #[arg(value_parser = parse_money_arg, allow_negative_numbers = true)]
    pub amount: Money,

    /// Free-text note
    #[arg(short, long)]
    pub description: Option<String>,

    /// Date (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS), defaults to now
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDateTime>,
}

impl From<TransactionArgs> for NewTransaction {
    fn from(args: TransactionArgs) -> Self {
        NewTransaction {
            kind: args.kind,
            category: args.category,
            amount: args.amount,
            description: args.description,
            date: args.date,
        }
    }
}

/// Fields to overwrite when saving an edit; omitted fields keep their value
#[derive(Args, Debug, Clone, Default)]
pub struct PatchArgs {
    #[arg(long)]
    pub kind: Option<TransactionKind>,

    #[arg(long)]
    pub category: Option<Category>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long, value_parser = parse_money_arg, allow_negative_numbers = true)]
    pub amount: Option<Money>,

    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDateTime>,
}

impl PatchArgs {
    fn to_patch(&self) -> TransactionPatch {
        TransactionPatch {
            date: self.date,
            kind: self.kind,
            category: self.category,
            description: self.description.clone(),
            amount: self.amount,
        }
    }
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Record a transaction
    Add(TransactionArgs),

    /// Recurring transaction templates
    #[command(subcommand)]
    Recurring(RecurringCommands),

    /// Category budget targets
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show one transaction in full
    Show {
        #[arg(allow_negative_numbers = true)]
        position: i64,
    },

    /// Start editing the transaction at a position
    Edit {
        #[arg(allow_negative_numbers = true)]
        position: i64,
    },

    /// Save the transaction being edited
    Save(PatchArgs),

    /// Abandon the edit in progress
    Cancel,

    /// Delete the transaction at a position
    #[command(alias = "rm")]
    Delete {
        #[arg(allow_negative_numbers = true)]
        position: i64,
    },

    /// Transaction history, optionally filtered
    #[command(alias = "ls")]
    List(ListArgs),

    /// Monthly income, expenses and balance
    Summary(SummaryArgs),

    /// Expense totals per category
    Categories,

    /// Running balance over time
    Balance,

    /// Months available for filtering
    Months,

    /// Read transactions from a CSV file
    Import {
        file: PathBuf,

        /// Replace the current ledger instead of appending
        #[arg(long)]
        replace: bool,
    },

    /// Write the ledger as CSV ("-" for the terminal)
    Export {
        #[arg(default_value = STDOUT_TARGET)]
        target: String,
    },

    /// Change the display currency for this session
    Currency { currency: Currency },

    /// Discard all transactions, budgets and recurring templates
    Reset,

    /// Leave the session
    #[command(alias = "exit", alias = "q")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum RecurringCommands {
    /// Add a recurring template
    Add(TransactionArgs),
    /// List recurring templates
    List,
}

#[derive(Subcommand, Debug)]
enum BudgetCommands {
    /// Set a category target; omit the amount to clear it
    Set {
        category: Category,
        #[arg(value_parser = parse_money_arg, allow_negative_numbers = true)]
        amount: Option<Money>,
    },
    /// Show every category target
    Show,
}

enum Flow {
    Continue,
    Quit,
}

/// Interactive shell over a session
pub struct Shell<'a> {
    session: &'a mut Session,
    settings: &'a Settings,
}

impl<'a> Shell<'a> {
    pub fn new(session: &'a mut Session, settings: &'a Settings) -> Self {
        Self { session, settings }
    }

    /// Run until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> TrackerResult<()> {
        writeln!(
            out,
            "Budget tracker. Type 'help' for commands, 'quit' to leave."
        )?;
        self.prompt(out)?;

        for line in input.lines() {
            let line = line?;
            if let Flow::Quit = self.execute_line(&line, out)? {
                break;
            }
            self.prompt(out)?;
        }

        writeln!(out)?;
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> TrackerResult<()> {
        match self.session.editing() {
            Some(position) => write!(out, "budget [editing #{}]> ", position)?,
            None => write!(out, "budget> ")?,
        }
        out.flush()?;
        Ok(())
    }

    fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> TrackerResult<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };

        let command = match ShellLine::try_parse_from(tokens) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        debug!(?command, "shell command");
        match self.execute(command, out) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> TrackerResult<Flow> {
        let currency = self.session.currency();

        match command {
            ShellCommand::Add(args) => match self.session.add_transaction(args.into()) {
                Some(txn) => {
                    let row = format_transaction_row(txn, currency);
                    let position = self.session.ledger().len() - 1;
                    writeln!(out, "Added #{}: {}", position, row)?;
                }
                None => writeln!(out, "Amount must be greater than zero; nothing added.")?,
            },
            ShellCommand::Recurring(RecurringCommands::Add(args)) => {
                match self.session.add_recurring(args.into()) {
                    Some(template) => writeln!(out, "Added recurring: {}", template)?,
                    None => writeln!(out, "Amount must be greater than zero; nothing added.")?,
                }
            }
            ShellCommand::Recurring(RecurringCommands::List) => {
                write!(out, "{}", format_recurring(self.session.recurring(), currency))?;
            }
            ShellCommand::Budget(BudgetCommands::Set { category, amount }) => {
                self.session.set_budget(category, amount);
                match self.session.budget(category) {
                    Some(target) => writeln!(
                        out,
                        "Budget for {} set to {}",
                        category,
                        target.format_with_symbol(currency.symbol())
                    )?,
                    None => writeln!(out, "Budget for {} cleared", category)?,
                }
            }
            ShellCommand::Budget(BudgetCommands::Show) => {
                write!(out, "{}", format_budgets(self.session.budgets(), currency))?;
            }
            ShellCommand::Show { position } => {
                let position = resolve_position(position, self.session.ledger().len())?;
                if let Some(txn) = self.session.ledger().get(position) {
                    write!(out, "{}", format_transaction_details(position, txn, currency))?;
                }
            }
            ShellCommand::Edit { position } => {
                let position = resolve_position(position, self.session.ledger().len())?;
                let txn = self.session.begin_edit(position)?;
                write!(out, "{}", format_transaction_details(position, txn, currency))?;
                writeln!(out, "Use 'save' with the fields to change, or 'cancel'.")?;
            }
            ShellCommand::Save(args) => {
                let position = self.session.editing();
                let txn = self.session.save_edit(&args.to_patch())?;
                let row = format_transaction_row(txn, currency);
                match position {
                    Some(position) => writeln!(out, "Saved #{}: {}", position, row)?,
                    None => writeln!(out, "Saved: {}", row)?,
                }
            }
            ShellCommand::Cancel => {
                if self.session.editing().is_some() {
                    self.session.cancel_edit();
                    writeln!(out, "Edit cancelled.")?;
                } else {
                    writeln!(out, "Nothing is being edited.")?;
                }
            }
            ShellCommand::Delete { position } => {
                let position = resolve_position(position, self.session.ledger().len())?;
                let removed = self.session.delete(position)?;
                writeln!(out, "Deleted: {}", format_transaction_row(&removed, currency))?;
            }
            ShellCommand::List(args) => {
                write!(out, "{}", render_list(self.session, &args))?;
            }
            ShellCommand::Summary(args) => {
                write!(out, "{}", render_summary(self.session, &args))?;
            }
            ShellCommand::Categories => {
                write!(out, "{}", render_categories(self.session))?;
            }
            ShellCommand::Balance => {
                write!(out, "{}", render_balance(self.session))?;
            }
            ShellCommand::Months => {
                write!(out, "{}", render_months(self.session))?;
            }
            ShellCommand::Import { file, replace } => {
                let reader = File::open(&file).map_err(|e| {
                    TrackerError::Import(format!("Failed to open {}: {}", file.display(), e))
                })?;
                let options =
                    ImportOptions::default().with_delimiter(self.settings.delimiter_byte()?);
                let mode = if replace {
                    ImportMode::Replace
                } else {
                    ImportMode::Append
                };
                let report = self.session.import_csv(reader, &options, mode)?;
                write!(out, "{}", format_import_report(&report))?;
            }
            ShellCommand::Export { target } => {
                handle_export(
                    self.session,
                    &target,
                    &self.settings.export_date_format,
                    out,
                )?;
            }
            ShellCommand::Currency { currency } => {
                self.session.set_currency(currency);
                writeln!(out, "Currency set to {}", currency)?;
            }
            ShellCommand::Reset => {
                self.session.reset();
                writeln!(out, "Session cleared.")?;
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}
