//! Monthly Trend Report
//!
//! Spending per category for every calendar month that has expenses.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::ExpenseResult;
use crate::models::{Category, Expense, Money, MonthKey};

/// One month of the trend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRow {
    pub month: MonthKey,
    /// Per-category sums, one entry per category in `Category::ALL` order
    pub by_category: [Money; 5],
    pub total: Money,
}

impl MonthRow {
    fn empty(month: MonthKey) -> Self {
        Self {
            month,
            by_category: [Money::zero(); 5],
            total: Money::zero(),
        }
    }

    pub fn amount_for(&self, category: Category) -> Money {
        self.by_category[category_index(category)]
    }
}

/// Monthly trend, oldest month first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTrend {
    pub rows: Vec<MonthRow>,
}

impl MonthlyTrend {
    /// Group expenses by calendar month
    ///
    /// Months without expenses are not emitted.
    pub fn generate(expenses: &[Expense]) -> Self {
        let mut months: BTreeMap<MonthKey, MonthRow> = BTreeMap::new();

        for expense in expenses {
            let key = MonthKey::of(expense.date);
            let row = months.entry(key).or_insert_with(|| MonthRow::empty(key));
            row.by_category[category_index(expense.category)] += expense.amount;
            row.total += expense.amount;
        }

        Self {
            rows: months.into_values().collect(),
        }
    }

    /// Months that have data, oldest first
    pub fn available_months(&self) -> Vec<MonthKey> {
        self.rows.iter().map(|r| r.month).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Monthly Spending Trend\n");
        output.push_str(&"=".repeat(100));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No expenses recorded yet.\n");
            return output;
        }

        output.push_str(&format!("{:<10}", "Month"));
        for category in Category::ALL {
            output.push_str(&format!(" {:>14}", category.as_str()));
        }
        output.push_str(&format!(" {:>14}\n", "Total"));
        output.push_str(&"-".repeat(100));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!("{:<10}", row.month.to_string()));
            for amount in &row.by_category {
                output.push_str(&format!(" {:>14}", amount.format_with_symbol(symbol)));
            }
            output.push_str(&format!(" {:>14}\n", row.total.format_with_symbol(symbol)));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ExpenseResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["Month"];
        header.extend(Category::ALL.iter().map(|c| c.as_str()));
        header.push("Total");
        csv_writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![row.month.iso()];
            record.extend(row.by_category.iter().map(|a| format!("{:.2}", a.as_f64())));
            record.push(format!("{:.2}", row.total.as_f64()));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

pub(crate) fn category_index(category: Category) -> usize {
    match category {
        Category::Rental => 0,
        Category::Groceries => 1,
        Category::Entertainment => 2,
        Category::Travel => 3,
        Category::Others => 4,
    }
}
