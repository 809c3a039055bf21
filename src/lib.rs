//! Expense Tracker - personal expense recording and spending analytics
//!
//! This library provides the core of the expense tracker: a persisted
//! expense store with create/delete operations, and read-only aggregation
//! views (filtered history, monthly trend, category breakdown, summary).
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `clock`: Injectable source of "now"
//! - `models`: Core data models (expenses, money, month keys)
//! - `storage`: Key-value persistence of the expense collection
//! - `services`: Business logic layer (the expense store operations)
//! - `reports`: Aggregation views
//! - `audit`: Audit logging system
//! - `display`, `export`, `cli`: Terminal output, file export, command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::clock::SystemClock;
//! use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
//! use expense_tracker::services::ExpenseService;
//! use expense_tracker::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(&paths, &settings)?;
//! let service = ExpenseService::new(&storage, &SystemClock);
//! ```

pub mod audit;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::ExpenseError;
