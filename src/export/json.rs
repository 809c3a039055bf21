//! JSON Export functionality
//!
//! Exports the expense collection to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub expenses: Vec<Expense>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub count: usize,

    /// Earliest expense date
    pub earliest: Option<String>,

    /// Latest expense date
    pub latest: Option<String>,

    pub total: Money,
}

impl FullExport {
    pub fn new(expenses: Vec<Expense>, exported_at: DateTime<Utc>) -> Self {
        let metadata = ExportMetadata {
            count: expenses.len(),
            earliest: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
            total: expenses.iter().map(|e| e.amount).sum(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses,
            metadata,
        }
    }
}

/// Export to JSON
pub fn export_full_json<W: Write>(
    export: &FullExport,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
