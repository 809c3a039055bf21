//! Summary statistics shown above the analytics views

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::{Expense, Money, MonthKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryStats {
    pub total: Money,
    /// Spending in the calendar month containing `today`
    pub current_month_total: Money,
    pub months_with_data: usize,
    /// `total / months_with_data`, zero when there is no data
    pub average_per_month: Money,
    pub expense_count: usize,
}

impl SummaryStats {
    pub fn generate(expenses: &[Expense], today: NaiveDate) -> Self {
        let current = MonthKey::of(today);

        let total: Money = expenses.iter().map(|e| e.amount).sum();
        let current_month_total = expenses
            .iter()
            .filter(|e| current.contains(e.date))
            .map(|e| e.amount)
            .sum();
        let months_with_data = expenses
            .iter()
            .map(|e| MonthKey::of(e.date))
            .collect::<BTreeSet<_>>()
            .len();

        Self {
            total,
            current_month_total,
            months_with_data,
            average_per_month: total.average_over(months_with_data),
            expense_count: expenses.len(),
        }
    }

    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str("Summary\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>17}\n",
            "Total spent:",
            self.total.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "{:<22} {:>17}\n",
            "This month:",
            self.current_month_total.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "{:<22} {:>17}\n",
            "Average per month:",
            self.average_per_month.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "{:<22} {:>17}\n",
            "Months with data:", self.months_with_data
        ));
        output.push_str(&format!(
            "{:<22} {:>17}\n",
            "Expenses:", self.expense_count
        ));
        output
    }
}
