use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use budget_tracker::cli::{
    handle_config_command, handle_export, render_balance, render_categories, render_list,
    render_months, render_summary, ConfigCommands, ListArgs, Shell, SummaryArgs,
};
use budget_tracker::config::{Settings, TrackerPaths};
use budget_tracker::display::format_import_report;
use budget_tracker::logging::init_tracing;
use budget_tracker::models::Currency;
use budget_tracker::services::import::ImportOptions;
use budget_tracker::state::{ImportMode, Session};

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Terminal personal finance tracker",
    long_about = "Record income and expenses, filter the history, and see monthly \
                  summaries, category breakdowns and the running balance. Data \
                  lives in memory for one run; import and export CSV to keep it."
)]
struct Cli {
    /// CSV file to load into the ledger before running the command
    #[arg(short, long, global = true, env = "BUDGET_TRACKER_INPUT")]
    input: Option<PathBuf>,

    /// Display currency for this run ($, ₦, €, £ or a code such as EUR)
    #[arg(long, global = true)]
    currency: Option<Currency>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the transaction history
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

    /// Write the ledger as CSV
    Export {
        /// Output file, or "-" for stdout
        target: String,
    },

    /// Settings commands
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Start an interactive session
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_default(&paths)?;

    let currency = cli.currency.unwrap_or(settings.currency);
    let mut session = Session::new(currency);

    if let Some(input) = &cli.input {
        let file =
            File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
        let options = ImportOptions::default().with_delimiter(settings.delimiter_byte()?);
        let report = session.import_csv(file, &options, ImportMode::Append)?;
        if !report.is_clean() {
            eprint!("{}", format_import_report(&report));
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::List(args)) => write!(out, "{}", render_list(&session, &args))?,
        Some(Commands::Summary(args)) => write!(out, "{}", render_summary(&session, &args))?,
        Some(Commands::Categories) => write!(out, "{}", render_categories(&session))?,
        Some(Commands::Balance) => write!(out, "{}", render_balance(&session))?,
        Some(Commands::Months) => write!(out, "{}", render_months(&session))?,
        Some(Commands::Export { target }) => {
            handle_export(&session, &target, &settings.export_date_format, &mut out)?;
        }
        Some(Commands::Config(cmd)) => {
            handle_config_command(&paths, &settings, cmd, &mut out)?;
        }
        Some(Commands::Shell) => {
            let stdin = io::stdin();
            Shell::new(&mut session, &settings).run(stdin.lock(), &mut out)?;
        }
        None => {
            writeln!(out, "Budget Tracker - personal income and expense ledger")?;
            writeln!(out)?;
            writeln!(out, "Run 'budget --help' for usage information.")?;
            writeln!(out, "Run 'budget shell' to start an interactive session.")?;
        }
    }

    out.flush()?;
    Ok(())
}
