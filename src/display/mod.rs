//! Display formatting for terminal output
//!
//! Formats budgets, members and expenses for the terminal. Report panels
//! live on [`crate::reports::BudgetSummary`] and reuse the helpers in
//! [`report`].

pub mod budget;
pub mod expense;
pub mod member;
pub mod report;

pub use budget::{format_budget_details, format_budget_list};
pub use expense::format_expense_list;
pub use member::format_member_list;
