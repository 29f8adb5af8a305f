//! Audit history command

use super::session::Session;
use crate::error::BudgetResult;

/// Print the most recent audit log entries, oldest first
pub fn handle_history_command(session: &Session, limit: usize) -> BudgetResult<()> {
    let entries = session.storage.audit().read_recent(limit)?;
    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
