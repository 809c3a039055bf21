//! CSV Export functionality
//!
//! Writes expenses as spreadsheet-compatible rows, one per expense.

use std::io::Write;

use serde::Serialize;

use crate::error::ExpenseResult;
use crate::models::Expense;

#[derive(Serialize)]
struct ExpenseCsvRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Payment Mode")]
    payment_mode: &'a str,
    #[serde(rename = "Notes")]
    notes: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Created At")]
    created_at: String,
}

impl<'a> From<&'a Expense> for ExpenseCsvRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: expense.id.as_uuid().to_string(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            category: expense.category.as_str(),
            payment_mode: expense.payment_mode.as_str(),
            notes: &expense.notes,
            amount: format!("{:.2}", expense.amount.as_f64()),
            created_at: expense.created_at.to_rfc3339(),
        }
    }
}

/// Export expenses to CSV in the order given
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpenseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if expenses.is_empty() {
        csv_writer.write_record([
            "ID",
            "Date",
            "Category",
            "Payment Mode",
            "Notes",
            "Amount",
            "Created At",
        ])?;
    }

    for expense in expenses {
        csv_writer.serialize(ExpenseCsvRow::from(expense))?;
    }

    csv_writer.flush()?;
    Ok(())
}
