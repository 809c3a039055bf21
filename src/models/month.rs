//! Calendar month key used by the analytics views
//!
//! A month key is an expense date truncated to the first of its month.
//! It displays as `Mar 2024` and parses from either that form or `2024-03`.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// A calendar month (year + month), ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, returning `None` if `month` is not 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Constructors only admit valid year/month pairs
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Sortable `YYYY-MM` form
    pub fn iso(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%b %Y"))
    }
}

/// Error returned when a month string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthParseError(pub String);

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid month '{}'. Use 'Mar 2024' or '2024-03'",
            self.0
        )
    }
}

impl std::error::Error for MonthParseError {}

impl FromStr for MonthKey {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let parsed = NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("01 {}", trimmed), "%d %b %Y"));

        parsed
            .map(MonthKey::of)
            .map_err(|_| MonthParseError(s.to_string()))
    }
}
