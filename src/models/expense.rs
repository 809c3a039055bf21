//! Expense model
//!
//! An expense is immutable once recorded: it can only be created (from an
//! [`ExpenseDraft`]) or deleted. Category and payment mode are closed sets.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::ExpenseId;
use super::money::Money;

/// Spending purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Rental,
    Groceries,
    Entertainment,
    Travel,
    Others,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 5] = [
        Category::Rental,
        Category::Groceries,
        Category::Entertainment,
        Category::Travel,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rental => "Rental",
            Self::Groceries => "Groceries",
            Self::Entertainment => "Entertainment",
            Self::Travel => "Travel",
            Self::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|c| normalize(c.as_str()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: s.to_string(),
                expected: Self::ALL.iter().map(|c| c.as_str()).collect(),
            })
    }
}

/// How an expense was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Net Banking")]
    NetBanking,
    Cash,
}

impl PaymentMode {
    /// All payment modes in display order
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Upi,
        PaymentMode::CreditCard,
        PaymentMode::NetBanking,
        PaymentMode::Cash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::CreditCard => "Credit Card",
            Self::NetBanking => "Net Banking",
            Self::Cash => "Cash",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|m| normalize(m.as_str()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "payment mode",
                value: s.to_string(),
                expected: Self::ALL.iter().map(|m| m.as_str()).collect(),
            })
    }
}

/// Lowercase and drop separators so "credit-card", "Credit Card" and
/// "creditcard" compare equal
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Error for a category or payment mode name outside the closed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: Vec<&'static str>,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown {} '{}'. Expected one of: {}",
            self.kind,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownVariant {}

/// User input for a new expense; the store assigns `id` and `createdAt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub amount: Money,
    pub category: Category,
    pub payment_mode: PaymentMode,
    pub notes: String,
    pub date: NaiveDate,
}

impl ExpenseDraft {
    pub fn new(
        amount: Money,
        category: Category,
        payment_mode: PaymentMode,
        notes: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            category,
            payment_mode,
            notes: notes.into(),
            date,
        }
    }

    /// Validate the draft against the current day
    pub fn validate(&self, today: NaiveDate) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > Money::MAX {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        if self.notes.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyNotes);
        }

        if self.date > today {
            return Err(ExpenseValidationError::FutureDate {
                date: self.date,
                today,
            });
        }

        Ok(())
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier, assigned at creation
    pub id: ExpenseId,

    /// Amount spent (always positive)
    pub amount: Money,

    pub category: Category,

    pub notes: String,

    /// Day the expense occurred
    pub date: NaiveDate,

    pub payment_mode: PaymentMode,

    /// When the record was inserted (audit only)
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Build a record from a draft with store-assigned id and timestamp
    pub fn from_draft(draft: ExpenseDraft, id: ExpenseId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            amount: draft.amount,
            category: draft.category,
            notes: draft.notes.trim().to_string(),
            date: draft.date,
            payment_mode: draft.payment_mode,
            created_at,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.notes,
            self.amount
        )
    }
}

/// Validation errors for expense input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyNotes,
    FutureDate { date: NaiveDate, today: NaiveDate },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than 0 (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount must be at most {} (got {})", Money::MAX, amount)
            }
            Self::EmptyNotes => write!(f, "Notes are required"),
            Self::FutureDate { date, today } => write!(
                f,
                "Expense date {} is in the future (today is {})",
                date, today
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
