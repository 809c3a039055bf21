//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Full UUID of the affected expense
    pub entity_id: String,

    /// Short human-readable description (date, category, amount)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// The record as it was removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// The record as it was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Entry for a newly recorded expense
    pub fn create(expense: &Expense, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            operation: Operation::Create,
            entity_id: expense.id.as_uuid().to_string(),
            entity_name: Some(describe(expense)),
            before: None,
            after: serde_json::to_value(expense).ok(),
        }
    }

    /// Entry for a deleted expense
    pub fn delete(expense: &Expense, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            operation: Operation::Delete,
            entity_id: expense.id.as_uuid().to_string(),
            entity_name: Some(describe(expense)),
            before: serde_json::to_value(expense).ok(),
            after: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} Expense {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        output
    }
}

fn describe(expense: &Expense) -> String {
    format!("{} {} {}", expense.date, expense.category, expense.amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseDraft, ExpenseId, Money, PaymentMode};
    use chrono::NaiveDate;

    fn sample() -> Expense {
        let draft = ExpenseDraft::new(
            Money::from_units(500),
            Category::Groceries,
            PaymentMode::Cash,
            "weekly shop",
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        );
        let id = ExpenseId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        Expense::from_draft(draft, id, Utc::now())
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(&sample(), Utc::now());
        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_id, "550e8400-e29b-41d4-a716-446655440000");
        assert!(entry.before.is_none());
        assert_eq!(entry.after.as_ref().unwrap()["amount"], 500);
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(&sample(), Utc::now());
        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_human_readable() {
        let entry = AuditEntry::create(&sample(), Utc::now());
        let text = entry.format_human_readable();
        assert!(text.contains("CREATE Expense 550e8400"));
        assert!(text.contains("(2024-03-15 Groceries ₹500.00)"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::create(&sample(), Utc::now());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("\"before\""));
        assert!(json.contains("\"operation\":\"create\""));
    }
}
