//! CLI commands for reports
//!
//! Monthly trend, category breakdown and summary figures.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::MonthKey;
use crate::reports::{BreakdownScope, CategoryBreakdown, MonthlyTrend, SummaryStats};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending per category for each month with expenses
    Trend {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Spending per category, lifetime or for one month
    Breakdown {
        /// Month to break down (e.g., "Mar 2024" or "2024-03")
        #[arg(short, long, conflicts_with = "lifetime")]
        month: Option<String>,

        /// Single-month mode; lists the available months when --month is omitted
        #[arg(long, conflicts_with = "lifetime")]
        monthly: bool,

        /// Cover all expenses (default)
        #[arg(long)]
        lifetime: bool,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Total, this month and average per month
    Summary,
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let expenses = storage.expenses.get_all()?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Trend { output } => {
            let report = MonthlyTrend::generate(&expenses);
            if let Some(path) = output {
                let mut writer = create_output(&path)?;
                report.export_csv(&mut writer)?;
                println!("Trend report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(symbol));
            }
        }

        ReportCommands::Breakdown {
            month,
            monthly,
            lifetime: _,
            top,
            output,
        } => {
            let scope = match month {
                Some(month_str) => {
                    let key = month_str
                        .parse::<MonthKey>()
                        .map_err(|e| ExpenseError::Validation(e.to_string()))?;
                    BreakdownScope::Month(Some(key))
                }
                None if monthly => BreakdownScope::Month(None),
                None => BreakdownScope::Lifetime,
            };

            let report = CategoryBreakdown::generate(&expenses, scope);

            if let Some(path) = output {
                let mut writer = create_output(&path)?;
                report.export_csv(&mut writer)?;
                println!("Breakdown report exported to: {}", path.display());
            } else if let Some(n) = top {
                println!("Top {} Categories\n", n);
                println!("{:<20} {:>14} {:>8}", "Category", "Amount", "%");
                println!("{}", "-".repeat(44));
                for row in report.top_categories(n) {
                    println!(
                        "{:<20} {:>14} {:>7.1}%",
                        row.category.as_str(),
                        row.amount.format_with_symbol(symbol),
                        row.percentage
                    );
                }
                println!("\nTotal: {}", report.total.format_with_symbol(symbol));
            } else {
                print!("{}", report.format_terminal(symbol));
                if report.awaiting_month_selection() {
                    let months = MonthlyTrend::generate(&expenses).available_months();
                    if months.is_empty() {
                        println!("No months with expenses yet.");
                    } else {
                        let names: Vec<String> = months.iter().map(|m| m.to_string()).collect();
                        println!("Available months: {}", names.join(", "));
                    }
                }
            }
        }

        ReportCommands::Summary => {
            let stats = SummaryStats::generate(&expenses, clock.today());
            print!("{}", stats.format_terminal(symbol));
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> ExpenseResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_bad_month_is_validation_error() {
        let storage = Storage::in_memory().unwrap();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        let err = handle_report_command(
            &storage,
            &Settings::default(),
            &clock,
            ReportCommands::Breakdown {
                month: Some("Marchember".into()),
                monthly: false,
                lifetime: false,
                top: None,
                output: None,
            },
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_trend_csv_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("trend.csv");
        let storage = Storage::in_memory().unwrap();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());

        handle_report_command(
            &storage,
            &Settings::default(),
            &clock,
            ReportCommands::Trend {
                output: Some(path.clone()),
            },
        )
        .unwrap();

        let csv = std::fs::read_to_string(path).unwrap();
        assert_eq!(csv, "Month,Rental,Groceries,Entertainment,Travel,Others,Total\n");
    }
}
