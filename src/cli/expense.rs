//! Expense CLI commands
//!
//! Add, list, show and delete expenses.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::expense::format_expense_details;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, ExpenseDraft, Money, PaymentMode};
use crate::reports::{DateRange, HistoryFilter, HistoryReport};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "500" or "12.50")
        amount: String,
        /// Category (Rental, Groceries, Entertainment, Travel, Others)
        #[arg(short, long)]
        category: String,
        /// Payment mode (UPI, Credit Card, Net Banking, Cash)
        #[arg(short, long)]
        payment_mode: String,
        /// What the expense was for
        #[arg(short, long)]
        notes: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List expenses, newest first
    List {
        /// Date range: this-month, 30d, 90d or all
        #[arg(short, long, default_value = "all")]
        range: String,
        /// Only these categories (repeatable)
        #[arg(short, long)]
        category: Vec<String>,
        /// Only these payment modes (repeatable)
        #[arg(short, long)]
        payment_mode: Vec<String>,
        /// Export the listed expenses to a CSV file
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Show expense details
    Show {
        /// Expense ID (full, exp-xxxxxxxx, or a unique prefix)
        id: String,
    },
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID (full, exp-xxxxxxxx, or a unique prefix)
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage, clock);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            payment_mode,
            notes,
            date,
        } => {
            let amount = Money::parse(&amount).map_err(|e| {
                ExpenseError::Validation(format!(
                    "Invalid amount '{}'. Use a format like '500' or '12.50'. Error: {}",
                    amount, e
                ))
            })?;
            let category = parse_category(&category)?;
            let payment_mode = parse_payment_mode(&payment_mode)?;
            let date = match date {
                Some(date_str) => parse_date(&date_str)?,
                None => clock.today(),
            };

            let expense =
                service.add(ExpenseDraft::new(amount, category, payment_mode, notes, date))?;

            println!(
                "Expense added: {} for {}",
                expense.amount.format_with_symbol(symbol),
                expense.category
            );
            println!("  ID:   {}", expense.id);
            println!("  Date: {}", expense.date.format(&settings.date_format));
        }

        ExpenseCommands::List {
            range,
            category,
            payment_mode,
            output,
        } => {
            let mut filter = HistoryFilter::new(range.parse::<DateRange>()?);
            for name in &category {
                filter = filter.with_category(parse_category(name)?);
            }
            for name in &payment_mode {
                filter = filter.with_payment_mode(parse_payment_mode(name)?);
            }

            let report = HistoryReport::generate(&service.list()?, &filter, clock.today());

            if let Some(path) = output {
                let file = std::fs::File::create(&path).map_err(|e| {
                    ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
                })?;
                crate::export::export_expenses_csv(&report.expenses, std::io::BufWriter::new(file))?;
                println!(
                    "Exported {} expenses to: {}",
                    report.count(),
                    path.display()
                );
            } else {
                print!("{}", report.format_terminal(symbol, &settings.date_format));
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service
                .find(&id)?
                .ok_or_else(|| ExpenseError::expense_not_found(&id))?;
            print!(
                "{}",
                format_expense_details(&expense, symbol, &settings.date_format)
            );
        }

        ExpenseCommands::Delete { id } => match service.find(&id)? {
            Some(expense) => {
                service.delete(expense.id)?;
                println!(
                    "Expense deleted: {} removed",
                    expense.amount.format_with_symbol(symbol)
                );
            }
            None => println!("No expense matches '{}'; nothing deleted.", id),
        },
    }

    Ok(())
}

pub(crate) fn parse_category(name: &str) -> ExpenseResult<Category> {
    name.parse()
        .map_err(|e: crate::models::UnknownVariant| ExpenseError::Validation(e.to_string()))
}

pub(crate) fn parse_payment_mode(name: &str) -> ExpenseResult<PaymentMode> {
    name.parse()
        .map_err(|e: crate::models::UnknownVariant| ExpenseError::Validation(e.to_string()))
}

fn parse_date(date_str: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!(
            "Invalid date format: '{}'. Use YYYY-MM-DD",
            date_str
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn add_cmd(amount: &str, date: Option<&str>) -> ExpenseCommands {
        ExpenseCommands::Add {
            amount: amount.to_string(),
            category: "groceries".to_string(),
            payment_mode: "credit-card".to_string(),
            notes: "weekly shop".to_string(),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_add_and_delete() {
        let storage = Storage::in_memory().unwrap();
        let settings = Settings::default();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());

        handle_expense_command(&storage, &settings, &clock, add_cmd("500", Some("2024-03-15")))
            .unwrap();
        let expenses = storage.expenses.get_all().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category, Category::Groceries);
        assert_eq!(expenses[0].payment_mode, PaymentMode::CreditCard);

        handle_expense_command(
            &storage,
            &settings,
            &clock,
            ExpenseCommands::Delete {
                id: expenses[0].id.to_string(),
            },
        )
        .unwrap();
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_add_defaults_date_to_today() {
        let storage = Storage::in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let clock = FixedClock::on(today);

        handle_expense_command(&storage, &Settings::default(), &clock, add_cmd("12.50", None))
            .unwrap();
        let expense = &storage.expenses.get_all().unwrap()[0];
        assert_eq!(expense.date, today);
        assert_eq!(expense.amount, Money::from_cents(1250));
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let storage = Storage::in_memory().unwrap();
        let settings = Settings::default();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());

        for cmd in [
            add_cmd("abc", None),
            add_cmd("0", None),
            add_cmd("10", Some("2024-13-01")),
            add_cmd("10", Some("2024-03-21")),
            ExpenseCommands::Add {
                amount: "10".into(),
                category: "Food".into(),
                payment_mode: "Cash".into(),
                notes: "x".into(),
                date: None,
            },
        ] {
            let err = handle_expense_command(&storage, &settings, &clock, cmd).unwrap_err();
            assert!(err.is_validation(), "{}", err);
        }
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_show_unknown_is_not_found() {
        let storage = Storage::in_memory().unwrap();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        let err = handle_expense_command(
            &storage,
            &Settings::default(),
            &clock,
            ExpenseCommands::Show { id: "exp-00000000".into() },
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
