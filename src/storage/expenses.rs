//! Expense repository
//!
//! Owns the persisted expense collection. The whole collection is stored as
//! one JSON array under a single key and rewritten in full on every commit.
//! An unreadable stored value never aborts loading: it is logged, copied
//! aside under `<key>.corrupt`, and the repository starts empty.

use std::collections::HashSet;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseId};

use super::backend::KeyValueStore;

/// Suffix of the key an unreadable value is preserved under
pub const CORRUPT_SUFFIX: &str = ".corrupt";

/// Outcome of loading the stored collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet
    Empty,
    /// Stored collection parsed; `dropped_duplicates` records shared an id
    Loaded {
        count: usize,
        dropped_duplicates: usize,
    },
    /// Stored value could not be read or parsed; started empty
    Recovered,
}

/// Repository for the expense collection
pub struct ExpenseRepository {
    backend: Box<dyn KeyValueStore>,
    key: String,
    data: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    pub fn new(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the collection from the backend, replacing what is in memory
    pub fn load(&self) -> Result<LoadOutcome, ExpenseError> {
        let (expenses, outcome) = match self.backend.get(&self.key) {
            Ok(None) => (Vec::new(), LoadOutcome::Empty),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Expense>>(&raw) {
                Ok(parsed) => {
                    let total = parsed.len();
                    let unique = dedup_by_id(parsed);
                    let dropped_duplicates = total - unique.len();
                    if dropped_duplicates > 0 {
                        tracing::warn!(
                            key = %self.key,
                            dropped = dropped_duplicates,
                            "stored expenses contained duplicate ids; kept first occurrences"
                        );
                    }
                    let count = unique.len();
                    (
                        unique,
                        LoadOutcome::Loaded {
                            count,
                            dropped_duplicates,
                        },
                    )
                }
                Err(err) => {
                    tracing::error!(
                        key = %self.key,
                        error = %err,
                        "stored expenses are unreadable; starting with an empty list"
                    );
                    self.preserve_corrupt(&raw);
                    (Vec::new(), LoadOutcome::Recovered)
                }
            },
            Err(err) => {
                tracing::error!(
                    key = %self.key,
                    error = %err,
                    "failed to read stored expenses; starting with an empty list"
                );
                (Vec::new(), LoadOutcome::Recovered)
            }
        };

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = expenses;

        tracing::debug!(key = %self.key, count = data.len(), "loaded expenses");
        Ok(outcome)
    }

    /// Write the in-memory collection back to the backend
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        self.persist(&data)
    }

    /// Snapshot of the collection in insertion order
    pub fn get_all(&self) -> Result<Vec<Expense>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.iter().find(|e| e.id == id).cloned())
    }

    pub fn contains(&self, id: ExpenseId) -> Result<bool, ExpenseError> {
        Ok(self.get(id)?.is_some())
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }

    /// Append a record and persist the full collection
    ///
    /// The in-memory collection only changes once the write succeeded.
    pub fn append(&self, expense: Expense) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if data.iter().any(|e| e.id == expense.id) {
            return Err(ExpenseError::Validation(format!(
                "Expense id {} already exists",
                expense.id
            )));
        }

        let mut next = data.clone();
        next.push(expense);
        self.persist(&next)?;
        *data = next;
        Ok(())
    }

    /// Remove a record by id and persist the remaining collection
    ///
    /// Returns `None` without writing if no record has that id. The in-memory
    /// collection only changes once the write succeeded.
    pub fn remove(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let Some(position) = data.iter().position(|e| e.id == id) else {
            return Ok(None);
        };

        let mut next = data.clone();
        let removed = next.remove(position);
        self.persist(&next)?;
        *data = next;
        Ok(Some(removed))
    }

    fn persist(&self, expenses: &[Expense]) -> Result<(), ExpenseError> {
        let json = serde_json::to_string(expenses)
            .map_err(|e| ExpenseError::Storage(format!("Failed to serialize expenses: {}", e)))?;

        self.backend.set(&self.key, &json).map_err(|e| {
            ExpenseError::Storage(format!("changes could not be saved: {}", e))
        })?;

        tracing::debug!(key = %self.key, count = expenses.len(), "saved expenses");
        Ok(())
    }

    fn preserve_corrupt(&self, raw: &str) {
        let backup_key = format!("{}{}", self.key, CORRUPT_SUFFIX);
        if let Err(err) = self.backend.set(&backup_key, raw) {
            tracing::warn!(
                key = %backup_key,
                error = %err,
                "could not preserve unreadable expense data"
            );
        }
    }
}

fn dedup_by_id(expenses: Vec<Expense>) -> Vec<Expense> {
    let mut seen = HashSet::new();
    expenses
        .into_iter()
        .filter(|e| seen.insert(e.id))
        .collect()
}
