//! CSV export of expense rows

use std::io::Write;

use crate::error::{BudgetResult, SharedBudgetError};
use crate::models::ExpenseRecord;

/// Write one row per expense
pub fn export_expenses_csv<W: Write>(expenses: &[ExpenseRecord], writer: W) -> BudgetResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| SharedBudgetError::Export(e.to_string());

    csv_writer
        .write_record(["ID", "Date", "Category", "Description", "Amount", "Recorded By"])
        .map_err(export_err)?;

    for expense in expenses {
        csv_writer
            .write_record([
                expense.id.as_uuid().to_string(),
                expense.created_at.format("%Y-%m-%d").to_string(),
                expense.category.as_str().to_string(),
                expense.name.clone(),
                format!("{:.2}", expense.amount),
                expense
                    .created_by
                    .as_ref()
                    .map(|u| u.to_string())
                    .unwrap_or_default(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| SharedBudgetError::Export(e.to_string()))?;
    Ok(())
}
