//! Audit log CLI command

use crate::error::ExpenseResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, count: usize) -> ExpenseResult<()> {
    let Some(logger) = storage.audit_logger() else {
        println!("Audit logging is disabled (set \"audit_enabled\": true in config.json).");
        return Ok(());
    };

    let entries = logger.read_recent(count)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
