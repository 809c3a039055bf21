//! Expense display formatting
//!
//! Register rows for the history listing and a detail view for one expense.

use crate::models::Expense;

/// Format a single expense as a register row
pub fn format_expense_row(expense: &Expense, symbol: &str, date_format: &str) -> String {
    format!(
        "{:<12} {:<14} {:<13} {:<24} {:>14}",
        expense.id.to_string(),
        expense.date.format(date_format).to_string(),
        expense.category.as_str(),
        truncate(&expense.notes, 24),
        expense.amount.format_with_symbol(symbol)
    )
}

/// Format a list of expenses as a register
pub fn format_expense_register(expenses: &[Expense], symbol: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:<14} {:<13} {:<24} {:>14}\n",
        "ID", "Date", "Category", "Notes", "Amount"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, symbol, date_format));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:      {}\n", expense.id));
    output.push_str(&format!("Full ID:      {}\n", expense.id.as_uuid()));
    output.push_str(&format!("Date:         {}\n", expense.date.format(date_format)));
    output.push_str(&format!(
        "Amount:       {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Category:     {}\n", expense.category));
    output.push_str(&format!("Payment mode: {}\n", expense.payment_mode));
    output.push_str(&format!("Notes:        {}\n", expense.notes));
    output.push_str(&format!(
        "Recorded:     {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// Shorten to `max_len` characters, ending in "..." when cut
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
