//! Report CLI commands

use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use super::session::Session;
use crate::error::{BudgetResult, SharedBudgetError};
use crate::services::BudgetService;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Financial summary and expense distribution of the active budget
    Summary {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Savings insights, budget alerts and tips
    Insights,
}

pub fn handle_report_command(session: &Session, cmd: ReportCommands) -> BudgetResult<()> {
    let actor = session.actor()?;
    let budget_id = session.budget_id(&actor)?;
    let summary =
        BudgetService::new(session.storage).summary(&actor, budget_id, session.thresholds())?;

    match cmd {
        ReportCommands::Summary { output: Some(path) } => {
            let file = File::create(&path).map_err(|e| {
                SharedBudgetError::Export(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            summary.export_csv(BufWriter::new(file))?;
            println!("Summary exported to: {}", path.display());
        }
        ReportCommands::Summary { output: None } => {
            println!("{}", summary.format_overview(session.symbol()));
            print!("{}", summary.format_distribution(session.symbol()));
        }
        ReportCommands::Insights => {
            print!("{}", summary.format_insights());
        }
    }

    Ok(())
}
