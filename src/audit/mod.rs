//! Audit logging for the expense tracker
//!
//! Records every add and delete in an append-only, line-delimited JSON log
//! (`audit.log`). Expenses are never edited, so an entry carries either the
//! record as created (`after`) or the record as it was removed (`before`).
//!
//! ```rust,ignore
//! use expense_tracker::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(&expense, clock.now()))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
