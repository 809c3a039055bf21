//! Strongly-typed expense identifier
//!
//! Expense ids are random UUIDs generated by the store at insertion time. On
//! disk they are plain UUID strings; for display they are shortened to
//! `exp-` followed by the first eight hex digits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "exp-";

/// Unique identifier of an expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse an ID from a full UUID string, with or without the display prefix
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        s.parse()
    }

    /// Check whether a user-typed fragment identifies this ID
    ///
    /// Accepts the display form (`exp-1a2b3c4d`) or any leading part of the
    /// hyphenated UUID, case-insensitively.
    pub fn matches_prefix(&self, fragment: &str) -> bool {
        let fragment = fragment.trim();
        let fragment = fragment.strip_prefix(DISPLAY_PREFIX).unwrap_or(fragment);
        if fragment.is_empty() {
            return false;
        }
        self.0
            .hyphenated()
            .to_string()
            .starts_with(&fragment.to_ascii_lowercase())
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, &self.0.simple().to_string()[..8])
    }
}

impl From<Uuid> for ExpenseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ExpenseId::new();
        assert!(!id.as_uuid().is_nil());
        assert_ne!(id, ExpenseId::new());
    }

    #[test]
    fn test_id_display() {
        let id = ExpenseId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(id.to_string(), "exp-550e8400");
    }

    #[test]
    fn test_id_serializes_as_plain_uuid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = ExpenseId::parse(uuid_str).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }

    #[test]
    fn test_prefix_matching() {
        let id = ExpenseId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(id.matches_prefix("exp-550e8400"));
        assert!(id.matches_prefix("550E84"));
        assert!(id.matches_prefix("550e8400-e29b"));
        assert!(!id.matches_prefix("exp-"));
        assert!(!id.matches_prefix("660e"));
    }
}
