//! Expense CLI commands

use clap::Subcommand;

use super::session::Session;
use crate::display::format_expense_list;
use crate::error::{BudgetResult, SharedBudgetError};
use crate::models::{format_amount, parse_amount, ExpenseCategory};
use crate::services::ExpenseService;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense in the active budget
    Add {
        /// Category: housing, groceries, transportation, health, personal, entertainment
        category: String,
        /// Amount (e.g., "45.50")
        amount: String,
        /// Description (defaults to the category name)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Remove {
        /// Expense ID (as shown by `expense list`)
        id: String,
    },

    /// List expenses of the active budget
    #[command(alias = "ls")]
    List {
        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,
    },
}

fn parse_category(raw: &str) -> BudgetResult<ExpenseCategory> {
    raw.parse::<ExpenseCategory>()
        .map_err(|e| SharedBudgetError::Validation(e.to_string()))
}

pub fn handle_expense_command(session: &Session, cmd: ExpenseCommands) -> BudgetResult<()> {
    let actor = session.actor()?;
    let budget_id = session.budget_id(&actor)?;
    let service = ExpenseService::new(session.storage);

    match cmd {
        ExpenseCommands::Add {
            category,
            amount,
            description,
        } => {
            let category = parse_category(&category)?;
            let amount =
                parse_amount(&amount).map_err(|e| SharedBudgetError::Validation(e.to_string()))?;
            let name = description.unwrap_or_else(|| category.name().to_string());

            let expense = service.add(&actor, budget_id, category, &name, amount)?;
            println!(
                "Added expense {}: {} ({}) {}",
                expense.id,
                expense.name,
                category,
                format_amount(expense.amount, session.symbol())
            );
        }

        ExpenseCommands::Remove { id } => {
            let expense = service.remove(&actor, budget_id, &id)?;
            println!("Removed expense: {} ({})", expense.name, expense.id);
        }

        ExpenseCommands::List { category } => {
            let category = category.as_deref().map(parse_category).transpose()?;
            let expenses = service.list(&actor, budget_id, category)?;
            println!("{}", format_expense_list(&expenses, session.symbol()));
        }
    }

    Ok(())
}
