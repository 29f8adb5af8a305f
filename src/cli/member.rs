//! Member CLI commands

use clap::Subcommand;

use super::session::Session;
use crate::display::format_member_list;
use crate::error::{BudgetResult, SharedBudgetError};
use crate::models::{Role, UserId};
use crate::services::MemberService;

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// List members of the active budget
    #[command(alias = "ls")]
    List,

    /// Add a user to the active budget (admins only)
    Add {
        /// User id
        user: String,
        /// Role: admin, editor or viewer
        #[arg(short, long, default_value = "viewer")]
        role: String,
    },

    /// Change a member's role (admins only)
    Role {
        /// User id
        user: String,
        /// New role: admin, editor or viewer
        role: String,
    },

    /// Remove a member (admins only, not yourself)
    #[command(alias = "rm")]
    Remove {
        /// User id
        user: String,
    },
}

fn parse_role(raw: &str) -> BudgetResult<Role> {
    raw.parse::<Role>()
        .map_err(|e| SharedBudgetError::Validation(e.to_string()))
}

pub fn handle_member_command(session: &Session, cmd: MemberCommands) -> BudgetResult<()> {
    let actor = session.actor()?;
    let budget_id = session.budget_id(&actor)?;
    let service = MemberService::new(session.storage);

    match cmd {
        MemberCommands::List => {
            let members = service.list(&actor, budget_id)?;
            println!("{}", format_member_list(&members, &actor));
        }

        MemberCommands::Add { user, role } => {
            let role = parse_role(&role)?;
            let membership = service.add(&actor, budget_id, &UserId::new(user), role)?;
            println!("Added member: {}", membership);
        }

        MemberCommands::Role { user, role } => {
            let role = parse_role(&role)?;
            let membership = service.change_role(&actor, budget_id, &UserId::new(user), role)?;
            println!("Updated member: {}", membership);
        }

        MemberCommands::Remove { user } => {
            let membership = service.remove(&actor, budget_id, &UserId::new(user))?;
            println!("Removed member: {}", membership.user_id);
        }
    }

    Ok(())
}
