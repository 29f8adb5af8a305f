//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod expense;
pub mod export;
pub mod history;
pub mod member;
pub mod report;
pub mod session;
pub mod user;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportFormat};
pub use history::handle_history_command;
pub use member::{handle_member_command, MemberCommands};
pub use report::{handle_report_command, ReportCommands};
pub use session::Session;
pub use user::{handle_user_command, UserCommands};
