//! Storage layer for the expense tracker
//!
//! Provides the key-value backends, atomic file writes, the expense
//! repository, and the audit hooks used by the service layer.

pub mod backend;
pub mod expenses;
pub mod file_io;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use expenses::{ExpenseRepository, LoadOutcome};
pub use file_io::{read_optional, write_atomic, write_json_atomic};

use chrono::{DateTime, Utc};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::ExpensePaths;
use crate::config::settings::Settings;
use crate::error::ExpenseError;
use crate::models::Expense;

/// Storage coordinator: the expense repository plus the audit log
///
/// Constructed once at startup; construction loads the persisted collection.
pub struct Storage {
    pub expenses: ExpenseRepository,
    audit: Option<AuditLogger>,
    load_outcome: LoadOutcome,
}

impl Storage {
    /// Open file-backed storage under the configured paths
    pub fn new(paths: &ExpensePaths, settings: &Settings) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        let backend = FileStore::new(paths.data_dir());
        // Reject an unusable key up front rather than on the first write
        backend.path_for(&settings.storage_key)?;

        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Self::with_backend(Box::new(backend), &settings.storage_key, audit)
    }

    /// Open storage over an arbitrary backend
    pub fn with_backend(
        backend: Box<dyn KeyValueStore>,
        key: &str,
        audit: Option<AuditLogger>,
    ) -> Result<Self, ExpenseError> {
        let expenses = ExpenseRepository::new(backend, key);
        let load_outcome = expenses.load()?;

        Ok(Self {
            expenses,
            audit,
            load_outcome,
        })
    }

    /// In-memory storage without an audit log
    pub fn in_memory() -> Result<Self, ExpenseError> {
        Self::with_backend(
            Box::new(MemoryStore::new()),
            crate::config::settings::DEFAULT_STORAGE_KEY,
            None,
        )
    }

    /// What happened when the persisted collection was loaded
    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record a created expense in the audit log
    pub fn log_create(&self, expense: &Expense, at: DateTime<Utc>) {
        self.write_audit(AuditEntry::create(expense, at));
    }

    /// Record a deleted expense in the audit log
    pub fn log_delete(&self, expense: &Expense, at: DateTime<Utc>) {
        self.write_audit(AuditEntry::delete(expense, at));
    }

    // The data change is already persisted; a failed audit write is reported, not propagated.
    fn write_audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(err) = logger.log(&entry) {
                tracing::warn!(
                    path = %logger.path().display(),
                    error = %err,
                    "failed to write audit entry"
                );
            }
        }
    }
}
