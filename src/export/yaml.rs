//! YAML Export functionality
//!
//! Same structure as the JSON export, for reading by humans.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::FullExport;

/// Export to YAML with a short header comment
pub fn export_full_yaml<W: Write>(export: &FullExport, writer: &mut W) -> ExpenseResult<()> {
    writeln!(writer, "# Expense Tracker Export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export)?;
    Ok(())
}
