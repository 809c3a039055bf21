//! Core data models for the expense tracker
//!
//! This module contains the data structures of the expense domain: the
//! expense record itself, its closed classification sets, money amounts and
//! calendar month keys.

pub mod expense;
pub mod ids;
pub mod money;
pub mod month;

pub use expense::{
    Category, Expense, ExpenseDraft, ExpenseValidationError, PaymentMode, UnknownVariant,
};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthParseError};
