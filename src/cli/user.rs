//! User identity commands
//!
//! Authentication is outside the application; `login` only records which
//! user id subsequent commands act as.

use clap::Subcommand;

use super::session::Session;
use crate::error::{BudgetResult, SharedBudgetError};
use crate::models::UserId;
use crate::services::ProfileService;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Act as the given user from now on
    Login {
        /// User id
        user_id: String,
        /// Display name shown to other members
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Forget the logged-in user
    Logout,

    /// Show the current user
    Whoami,
}

pub fn handle_user_command(session: &mut Session, cmd: UserCommands) -> BudgetResult<()> {
    match cmd {
        UserCommands::Login { user_id, name } => {
            let user = UserId::new(user_id);
            if user.is_empty() {
                return Err(SharedBudgetError::Validation(
                    "User id cannot be empty".into(),
                ));
            }

            if let Some(name) = name {
                ProfileService::new(session.storage).set_display_name(&user, Some(&name))?;
            }

            if session.settings.current_user.as_ref() != Some(&user) {
                session.settings.active_budget = None;
            }
            session.settings.current_user = Some(user.clone());
            session.save_settings()?;

            println!("Logged in as {}", user);
        }
        UserCommands::Logout => {
            session.settings.current_user = None;
            session.settings.active_budget = None;
            session.save_settings()?;
            println!("Logged out");
        }
        UserCommands::Whoami => {
            let user = session.actor()?;
            match ProfileService::new(session.storage).get(&user)? {
                Some(profile) if profile.display_name.is_some() => {
                    println!("{} ({})", profile.label(), user)
                }
                _ => println!("{}", user),
            }
        }
    }

    Ok(())
}
