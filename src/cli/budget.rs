//! Budget CLI commands

use clap::Subcommand;

use super::session::Session;
use crate::display::{format_budget_details, format_budget_list};
use crate::error::{BudgetResult, SharedBudgetError};
use crate::models::{format_amount, parse_amount};
use crate::services::BudgetService;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget (you become its admin)
    Create {
        /// Budget name
        name: String,
    },

    /// List your budgets with your role and the member count
    #[command(alias = "ls")]
    List,

    /// Make a budget the active one
    Use {
        /// Budget name or ID
        budget: String,
    },

    /// Show budget details
    Show {
        /// Budget name or ID (defaults to the active budget)
        budget: Option<String>,
    },

    /// Set the monthly income of the active budget
    Income {
        /// Amount (e.g., "5000" or "5,000.00")
        amount: String,
    },

    /// Rename the active budget
    Rename {
        /// New name
        name: String,
    },

    /// Delete a budget with all its expenses and members
    Delete {
        /// Budget name or ID
        budget: String,
    },
}

pub fn handle_budget_command(session: &mut Session, cmd: BudgetCommands) -> BudgetResult<()> {
    let actor = session.actor()?;
    let service = BudgetService::new(session.storage);

    match cmd {
        BudgetCommands::Create { name } => {
            let budget = service.create(&actor, &name)?;
            if session.settings.active_budget.is_none() {
                session.settings.active_budget = Some(budget.id);
                session.save_settings()?;
            }
            println!("Created budget: {} ({})", budget.name, budget.id);
        }

        BudgetCommands::List => {
            let listings = service.list_for_user(&actor)?;
            let active = match session.settings.active_budget {
                Some(id) => session.storage.budgets.get(id)?,
                None => None,
            };
            println!(
                "{}",
                format_budget_list(&listings, active.as_ref(), session.symbol())
            );
        }

        BudgetCommands::Use { budget } => {
            let found = service
                .find(&actor, &budget)?
                .ok_or_else(|| SharedBudgetError::budget_not_found(budget.clone()))?;
            session.settings.active_budget = Some(found.id);
            session.save_settings()?;
            println!("Active budget: {}", found.name);
        }

        BudgetCommands::Show { budget } => {
            let budget_id = match budget {
                Some(identifier) => {
                    service
                        .find(&actor, &identifier)?
                        .ok_or_else(|| SharedBudgetError::budget_not_found(identifier.clone()))?
                        .id
                }
                None => session.budget_id(&actor)?,
            };
            let (budget, membership) = service.open(&actor, budget_id)?;
            let member_count = session.storage.members.count_for_budget(budget_id)?;
            print!(
                "{}",
                format_budget_details(&budget, &membership, member_count, session.symbol())
            );
        }

        BudgetCommands::Income { amount } => {
            let amount =
                parse_amount(&amount).map_err(|e| SharedBudgetError::Validation(e.to_string()))?;
            let budget_id = session.budget_id(&actor)?;
            let budget = service.set_income(&actor, budget_id, amount)?;
            println!(
                "Monthly income for '{}' set to {}",
                budget.name,
                format_amount(budget.monthly_income, session.symbol())
            );
        }

        BudgetCommands::Rename { name } => {
            let budget_id = session.budget_id(&actor)?;
            let budget = service.rename(&actor, budget_id, &name)?;
            println!("Renamed budget to: {}", budget.name);
        }

        BudgetCommands::Delete { budget } => {
            let found = service
                .find(&actor, &budget)?
                .ok_or_else(|| SharedBudgetError::budget_not_found(budget.clone()))?;
            service.delete(&actor, found.id)?;
            if session.settings.active_budget == Some(found.id) {
                session.settings.active_budget = None;
                session.save_settings()?;
            }
            println!("Deleted budget: {}", found.name);
        }
    }

    Ok(())
}
