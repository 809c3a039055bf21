//! Reports module for the expense tracker
//!
//! Read-only views derived from the expense collection: the filtered
//! history, the monthly trend, the category breakdown and the summary
//! figures. Every report is recomputed from a snapshot; none is cached.

pub mod breakdown;
pub mod history;
pub mod summary;
pub mod trend;

pub use breakdown::{BreakdownRow, BreakdownScope, CategoryBreakdown};
pub use history::{DateRange, HistoryFilter, HistoryReport};
pub use summary::SummaryStats;
pub use trend::{MonthRow, MonthlyTrend};
