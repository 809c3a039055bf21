use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{
    handle_audit_command, handle_expense_command, handle_export_command, handle_report_command,
    ExpenseCommands, ExportCommands, ReportCommands,
};
use expense_tracker::clock::SystemClock;
use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
use expense_tracker::storage::{LoadOutcome, Storage};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Record personal expenses and see where the money goes",
    long_about = "Expense Tracker records what you spend, by category and payment \
                  mode, and summarises it as a filtered history, a monthly trend \
                  and a category breakdown."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Trend, breakdown and summary reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export expenses to CSV, JSON or YAML
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Write the default configuration
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let clock = SystemClock;

    match cli.command {
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialized expense tracker at: {}", paths.base_dir().display());
            println!();
            println!("Run 'expense add --help' to record your first expense.");
            return Ok(());
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Storage key:     {}", settings.storage_key);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Log level:       {}", settings.log_level);
            println!("  Audit enabled:   {}", settings.audit_enabled);
            return Ok(());
        }
        None => {
            println!("Expense Tracker - record and analyse your spending");
            println!();
            println!("Run 'expense --help' for usage information.");
            return Ok(());
        }
        _ => {}
    }

    let storage = Storage::new(&paths, &settings)?;
    if storage.load_outcome() == LoadOutcome::Recovered {
        eprintln!(
            "Warning: saved expenses could not be read; starting with an empty list. \
             The unreadable data was kept next to the original file."
        );
    }

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, &clock, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, &clock, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, &clock, cmd)?,
        Some(Commands::Audit { count }) => handle_audit_command(&storage, count)?,
        Some(Commands::Init) | Some(Commands::Config) | None => {}
    }

    Ok(())
}
