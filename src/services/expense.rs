//! Expense service
//!
//! The command surface of the expense store: every add and delete goes
//! through here. Input is validated at this boundary regardless of what the
//! caller already checked, ids and `createdAt` are assigned here, and each
//! successful change is persisted and audited before returning.

use crate::clock::Clock;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseDraft, ExpenseId};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    clock: &'a dyn Clock,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage, clock: &'a dyn Clock) -> Self {
        Self { storage, clock }
    }

    /// Record a new expense
    ///
    /// # Errors
    ///
    /// `Validation` if the draft is invalid (non-positive amount, blank notes,
    /// future date); `Storage` if the collection could not be written, in
    /// which case nothing was added.
    pub fn add(&self, draft: ExpenseDraft) -> ExpenseResult<Expense> {
        draft
            .validate(self.clock.today())
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let id = self.fresh_id()?;
        let created_at = self.clock.now();
        let expense = Expense::from_draft(draft, id, created_at);

        self.storage.expenses.append(expense.clone())?;
        self.storage.log_create(&expense, created_at);

        tracing::info!(id = %expense.id, amount = %expense.amount, category = %expense.category, "expense added");
        Ok(expense)
    }

    /// Delete an expense by id
    ///
    /// Deleting an id that does not exist is a no-op and returns `Ok(None)`.
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let removed = self.storage.expenses.remove(id)?;

        match &removed {
            Some(expense) => {
                self.storage.log_delete(expense, self.clock.now());
                tracing::info!(id = %expense.id, amount = %expense.amount, "expense deleted");
            }
            None => tracing::debug!(id = %id, "delete of unknown expense ignored"),
        }

        Ok(removed)
    }

    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full UUID, display id (`exp-1a2b3c4d`) or id prefix
    ///
    /// # Errors
    ///
    /// `Validation` if a prefix matches more than one expense.
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.get(id);
        }

        let mut matches: Vec<Expense> = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| e.id.matches_prefix(identifier))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(ExpenseError::Validation(format!(
                "'{}' matches {} expenses; use more characters of the id",
                identifier.trim(),
                n
            ))),
        }
    }

    /// All expenses in insertion order
    pub fn list(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.expenses.count()
    }

    fn fresh_id(&self) -> ExpenseResult<ExpenseId> {
        loop {
            let id = ExpenseId::new();
            if !self.storage.expenses.contains(id)? {
                return Ok(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, Operation};
    use crate::clock::FixedClock;
    use crate::models::{Category, Money, MonthKey, PaymentMode};
    use crate::reports::{BreakdownScope, CategoryBreakdown, MonthlyTrend, SummaryStats};
    use crate::storage::LoadOutcome;
    use crate::storage::{FileStore, MemoryStore};
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock::on(date(2024, 3, 20))
    }

    fn draft(units: i64, day: u32) -> ExpenseDraft {
        ExpenseDraft::new(
            Money::from_units(units),
            Category::Groceries,
            PaymentMode::Cash,
            "weekly shop",
            date(2024, 3, day),
        )
    }

    fn file_storage(temp_dir: &TempDir) -> Storage {
        Storage::with_backend(
            Box::new(FileStore::new(temp_dir.path().join("data"))),
            "expense-tracker-data",
            Some(AuditLogger::new(temp_dir.path().join("audit.log"))),
        )
        .unwrap()
    }

    #[test]
    fn test_add_assigns_id_and_created_at() {
        let storage = Storage::in_memory().unwrap();
        let clock = clock();
        let service = ExpenseService::new(&storage, &clock);

        let expense = service.add(draft(500, 15)).unwrap();
        assert_eq!(expense.created_at, clock.now());
        assert_eq!(expense.amount, Money::from_units(500));
        assert_eq!(service.count().unwrap(), 1);
        assert_eq!(service.get(expense.id).unwrap(), Some(expense));
    }

    #[test]
    fn test_ids_are_unique() {
        let storage = Storage::in_memory().unwrap();
        let clock = clock();
        let service = ExpenseService::new(&storage, &clock);

        let ids: HashSet<_> = (1..=50)
            .map(|i| service.add(draft(i, 1 + (i as u32 % 20))).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_add_validates_at_the_boundary() {
        let storage = Storage::in_memory().unwrap();
        let clock = clock();
        let service = ExpenseService::new(&storage, &clock);

        let mut zero = draft(0, 10);
        zero.amount = Money::zero();
        assert!(service.add(zero).unwrap_err().is_validation());

        let mut blank = draft(10, 10);
        blank.notes = " ".into();
        assert!(service.add(blank).unwrap_err().is_validation());

        let future = ExpenseDraft::new(
            Money::from_units(10),
            Category::Travel,
            PaymentMode::Upi,
            "train",
            date(2024, 3, 21),
        );
        assert!(service.add(future).unwrap_err().is_validation());

        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_add_then_delete_restores_previous_state() {
        let storage = Storage::in_memory().unwrap();
        let clock = clock();
        let service = ExpenseService::new(&storage, &clock);

        service.add(draft(100, 1)).unwrap();
        service.add(draft(200, 2)).unwrap();
        let before = service.list().unwrap();

        let added = service.add(draft(300, 3)).unwrap();
        let removed = service.delete(added.id).unwrap();

        assert_eq!(removed, Some(added));
        assert_eq!(service.list().unwrap(), before);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let storage = Storage::in_memory().unwrap();
        let clock = clock();
        let service = ExpenseService::new(&storage, &clock);

        service.add(draft(100, 1)).unwrap();
        assert_eq!(service.delete(ExpenseId::new()).unwrap(), None);
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_persisted_state_matches_memory_after_reload() {
        let temp_dir = TempDir::new().unwrap();
        let clock = clock();

        let storage = file_storage(&temp_dir);
        let service = ExpenseService::new(&storage, &clock);
        service.add(draft(100, 1)).unwrap();
        let second = service.add(draft(200, 2)).unwrap();
        service.add(draft(300, 3)).unwrap();
        service.delete(second.id).unwrap();
        let in_memory = service.list().unwrap();

        let reopened = file_storage(&temp_dir);
        assert_eq!(reopened.expenses.get_all().unwrap(), in_memory);
    }

    #[test]
    fn test_audit_trail_records_add_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let clock = clock();
        let storage = file_storage(&temp_dir);
        let service = ExpenseService::new(&storage, &clock);

        let expense = service.add(draft(500, 15)).unwrap();
        service.delete(expense.id).unwrap();
        service.delete(expense.id).unwrap();

        let entries = storage.audit_logger().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].operation, Operation::Delete);
        assert_eq!(entries[0].timestamp, clock.now());
    }

    #[test]
    fn test_storage_failure_is_reported_and_nothing_is_added() {
        let storage =
            Storage::with_backend(Box::new(MemoryStore::with_quota(64)), "k", None).unwrap();
        let clock = clock();
        let service = ExpenseService::new(&storage, &clock);

        let err = service.add(draft(500, 15)).unwrap_err();
        assert!(err.is_storage());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_find_by_display_id_and_prefix() {
        let storage = Storage::in_memory().unwrap();
        let clock = clock();
        let service = ExpenseService::new(&storage, &clock);
        let expense = service.add(draft(500, 15)).unwrap();

        let full = expense.id.as_uuid().to_string();
        assert_eq!(service.find(&full).unwrap(), Some(expense.clone()));
        assert_eq!(
            service.find(&expense.id.to_string()).unwrap(),
            Some(expense.clone())
        );
        assert_eq!(service.find(&full[..6]).unwrap(), Some(expense));
        assert_eq!(service.find("zzzz").unwrap(), None);
    }

    #[test]
    fn test_largest_amount_survives_reload() {
        let temp_dir = TempDir::new().unwrap();
        let clock = clock();

        let storage = file_storage(&temp_dir);
        let service = ExpenseService::new(&storage, &clock);
        service.add(draft(100, 1)).unwrap();
        let mut largest = draft(0, 2);
        largest.amount = Money::parse("1000000000000").unwrap();
        service.add(largest).unwrap();

        let mut too_large = draft(0, 3);
        too_large.amount = Money::MAX + Money::from_cents(1);
        assert!(service.add(too_large).unwrap_err().is_validation());
        let in_memory = service.list().unwrap();

        let reopened = file_storage(&temp_dir);
        assert_eq!(
            reopened.load_outcome(),
            LoadOutcome::Loaded {
                count: 2,
                dropped_duplicates: 0
            }
        );
        assert_eq!(reopened.expenses.get_all().unwrap(), in_memory);
    }

    #[test]
    fn test_add_then_delete_empties_every_aggregation() {
        let storage = Storage::in_memory().unwrap();
        let clock = clock();
        let service = ExpenseService::new(&storage, &clock);

        let expense = service
            .add(ExpenseDraft::new(
                Money::from_units(500),
                Category::Groceries,
                PaymentMode::Cash,
                "weekly shop",
                date(2024, 3, 15),
            ))
            .unwrap();

        let expenses = service.list().unwrap();
        let breakdown = CategoryBreakdown::generate(&expenses, BreakdownScope::Lifetime);
        assert_eq!(breakdown.rows.len(), 1);
        assert_eq!(breakdown.amount_for(Category::Groceries), Money::from_units(500));

        let trend = MonthlyTrend::generate(&expenses);
        assert_eq!(trend.rows.len(), 1);
        let march = &trend.rows[0];
        assert_eq!(march.month, MonthKey::new(2024, 3).unwrap());
        assert_eq!(march.month.to_string(), "Mar 2024");
        assert_eq!(march.amount_for(Category::Groceries), Money::from_units(500));
        assert_eq!(march.total, Money::from_units(500));

        assert_eq!(service.delete(expense.id).unwrap(), Some(expense));

        let expenses = service.list().unwrap();
        assert!(expenses.is_empty());
        assert!(MonthlyTrend::generate(&expenses).is_empty());
        assert!(CategoryBreakdown::generate(&expenses, BreakdownScope::Lifetime).is_empty());

        let stats = SummaryStats::generate(&expenses, clock.today());
        assert_eq!(stats.total, Money::zero());
        assert_eq!(stats.current_month_total, Money::zero());
        assert_eq!(stats.months_with_data, 0);
        assert_eq!(stats.average_per_month, Money::zero());
        assert_eq!(stats.expense_count, 0);
    }
}
