//! Export CLI command

use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use super::session::Session;
use crate::error::{BudgetResult, SharedBudgetError};
use crate::export::{export_budget_json, export_budget_yaml, export_expenses_csv, BudgetExport};
use crate::services::ExpenseService;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Full budget as JSON
    Json,
    /// Full budget as YAML
    Yaml,
    /// Expense rows as CSV
    Csv,
}

/// Export the active budget to `output`, or stdout
pub fn handle_export_command(
    session: &Session,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> BudgetResult<()> {
    let actor = session.actor()?;
    let budget_id = session.budget_id(&actor)?;

    let mut writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            SharedBudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        ExportFormat::Json | ExportFormat::Yaml => {
            let export =
                BudgetExport::collect(session.storage, &actor, budget_id, session.thresholds())?;
            if matches!(format, ExportFormat::Json) {
                export_budget_json(&export, &mut writer)?;
            } else {
                export_budget_yaml(&export, &mut writer)?;
            }
        }
        ExportFormat::Csv => {
            let expenses = ExpenseService::new(session.storage).list(&actor, budget_id, None)?;
            export_expenses_csv(&expenses, &mut writer)?;
        }
    }

    writer
        .flush()
        .map_err(|e| SharedBudgetError::Export(e.to_string()))?;

    if let Some(path) = output {
        eprintln!("Exported to: {}", path.display());
    }
    Ok(())
}
