//! Category Breakdown Report
//!
//! Spending per category, either over all history or for one month.

use std::io::Write;

use serde::Serialize;

use crate::error::ExpenseResult;
use crate::models::{Category, Expense, Money, MonthKey};

use super::trend::category_index;

/// Which expenses a breakdown covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownScope {
    Lifetime,
    /// A single month; `None` means no month has been chosen yet
    Month(Option<MonthKey>),
}

/// One category line of a breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub category: Category,
    pub amount: Money,
    pub expense_count: usize,
    pub percentage: f64,
}

/// Category breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub scope: BreakdownScope,
    /// Categories with spending, in category order
    pub rows: Vec<BreakdownRow>,
    pub total: Money,
}

impl CategoryBreakdown {
    pub fn generate(expenses: &[Expense], scope: BreakdownScope) -> Self {
        let month = match scope {
            BreakdownScope::Lifetime => None,
            BreakdownScope::Month(Some(month)) => Some(month),
            BreakdownScope::Month(None) => {
                return Self {
                    scope,
                    rows: Vec::new(),
                    total: Money::zero(),
                }
            }
        };

        let mut sums = [(Money::zero(), 0usize); 5];
        for expense in expenses {
            if month.map_or(true, |m| m.contains(expense.date)) {
                let slot = &mut sums[category_index(expense.category)];
                slot.0 += expense.amount;
                slot.1 += 1;
            }
        }

        let total: Money = sums.iter().map(|(amount, _)| *amount).sum();

        let rows = Category::ALL
            .into_iter()
            .zip(sums)
            .filter(|(_, (_, count))| *count > 0)
            .map(|(category, (amount, expense_count))| BreakdownRow {
                category,
                amount,
                expense_count,
                percentage: amount.percentage_of(total),
            })
            .collect();

        Self { scope, rows, total }
    }

    /// True when a single-month breakdown has no month chosen
    pub fn awaiting_month_selection(&self) -> bool {
        self.scope == BreakdownScope::Month(None)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Amount for one category (zero if it has no spending)
    pub fn amount_for(&self, category: Category) -> Money {
        self.rows
            .iter()
            .find(|r| r.category == category)
            .map(|r| r.amount)
            .unwrap_or_default()
    }

    /// Rows sorted by amount, largest first
    pub fn top_categories(&self, limit: usize) -> Vec<&BreakdownRow> {
        let mut rows: Vec<_> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.amount.cmp(&a.amount));
        rows.into_iter().take(limit).collect()
    }

    fn scope_label(&self) -> String {
        match self.scope {
            BreakdownScope::Lifetime => "Lifetime".to_string(),
            BreakdownScope::Month(Some(month)) => month.to_string(),
            BreakdownScope::Month(None) => "No month selected".to_string(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Category Breakdown: {}\n", self.scope_label()));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.awaiting_month_selection() {
            output.push_str("Select a month to see its breakdown.\n");
            return output;
        }
        if self.rows.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<20} {:>14} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<20} {:>14} {:>8} {:>7.1}%\n",
                row.category.as_str(),
                row.amount.format_with_symbol(symbol),
                row.expense_count,
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14}\n",
            "TOTAL",
            self.total.format_with_symbol(symbol)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ExpenseResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let scope = match self.scope {
            BreakdownScope::Month(Some(month)) => month.iso(),
            _ => "lifetime".to_string(),
        };

        if self.rows.is_empty() {
            csv_writer.write_record(["Scope", "Category", "Amount", "Expense Count", "Percentage"])?;
        }

        for row in &self.rows {
            csv_writer.serialize(BreakdownCsvRow {
                scope: &scope,
                category: row.category.as_str(),
                amount: format!("{:.2}", row.amount.as_f64()),
                expense_count: row.expense_count,
                percentage: format!("{:.2}", row.percentage),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct BreakdownCsvRow<'a> {
    #[serde(rename = "Scope")]
    scope: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Expense Count")]
    expense_count: usize,
    #[serde(rename = "Percentage")]
    percentage: String,
}
