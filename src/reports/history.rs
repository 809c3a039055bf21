//! Expense history
//!
//! Filters the collection by date range, category and payment mode, and
//! lists the matching expenses newest first.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};

use crate::error::ExpenseError;
use crate::models::{Category, Expense, Money, MonthKey, PaymentMode};

/// Named time window for the history view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    ThisMonth,
    Last30Days,
    Last90Days,
    #[default]
    AllTime,
}

impl DateRange {
    pub const ALL: [DateRange; 4] = [
        DateRange::ThisMonth,
        DateRange::Last30Days,
        DateRange::Last90Days,
        DateRange::AllTime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ThisMonth => "This month",
            Self::Last30Days => "Last 30 days",
            Self::Last90Days => "Last 90 days",
            Self::AllTime => "All time",
        }
    }

    /// Whether `date` falls inside the window ending on `today`
    ///
    /// The rolling windows exclude the day exactly N days back.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::ThisMonth => date >= MonthKey::of(today).first_day(),
            Self::Last30Days => date > today - Duration::days(30),
            Self::Last90Days => date > today - Duration::days(90),
            Self::AllTime => true,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DateRange {
    type Err = ExpenseError;

    /// Accepts the label ("Last 30 days") or a short form ("30d", "this-month", "all")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "thismonth" | "month" => Ok(Self::ThisMonth),
            "last30days" | "30days" | "30d" | "30" => Ok(Self::Last30Days),
            "last90days" | "90days" | "90d" | "90" => Ok(Self::Last90Days),
            "alltime" | "all" => Ok(Self::AllTime),
            _ => Err(ExpenseError::Validation(format!(
                "Unknown date range '{}'. Expected one of: this-month, 30d, 90d, all",
                s
            ))),
        }
    }
}

/// History filter. Empty category or payment mode sets allow everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub range: DateRange,
    pub categories: BTreeSet<Category>,
    pub payment_modes: BTreeSet<PaymentMode>,
}

impl HistoryFilter {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_payment_mode(mut self, mode: PaymentMode) -> Self {
        self.payment_modes.insert(mode);
        self
    }

    pub fn matches(&self, expense: &Expense, today: NaiveDate) -> bool {
        self.range.contains(expense.date, today)
            && (self.categories.is_empty() || self.categories.contains(&expense.category))
            && (self.payment_modes.is_empty() || self.payment_modes.contains(&expense.payment_mode))
    }
}

/// Filtered expense history
#[derive(Debug, Clone)]
pub struct HistoryReport {
    pub filter: HistoryFilter,
    /// Matching expenses, newest date first
    pub expenses: Vec<Expense>,
    pub total: Money,
}

impl HistoryReport {
    /// Apply `filter` relative to `today`
    ///
    /// Expenses on the same date keep their insertion order.
    pub fn generate(expenses: &[Expense], filter: &HistoryFilter, today: NaiveDate) -> Self {
        let mut matching: Vec<Expense> = expenses
            .iter()
            .filter(|e| filter.matches(e, today))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date));

        let total = matching.iter().map(|e| e.amount).sum();

        Self {
            filter: filter.clone(),
            expenses: matching,
            total,
        }
    }

    pub fn count(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str, date_format: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Expense History: {}\n", self.filter.range));
        if !self.filter.categories.is_empty() {
            let names: Vec<_> = self.filter.categories.iter().map(|c| c.as_str()).collect();
            output.push_str(&format!("Categories: {}\n", names.join(", ")));
        }
        if !self.filter.payment_modes.is_empty() {
            let names: Vec<_> = self.filter.payment_modes.iter().map(|m| m.as_str()).collect();
            output.push_str(&format!("Payment modes: {}\n", names.join(", ")));
        }
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.expenses.is_empty() {
            output.push_str("No expenses match the current filters.\n");
            return output;
        }

        output.push_str(&crate::display::expense::format_expense_register(
            &self.expenses,
            symbol,
            date_format,
        ));

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{} expense(s), total {}\n",
            self.count(),
            self.total.format_with_symbol(symbol)
        ));

        output
    }
}
