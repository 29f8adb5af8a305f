//! Core data models for SharedBudget
//!
//! This module contains the data structures of the budgeting domain:
//! budgets, expense records, categories, memberships and profiles.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod member;
pub mod money;
pub mod profile;

pub use budget::Budget;
pub use category::{CategoryLabel, ExpenseCategory};
pub use expense::ExpenseRecord;
pub use ids::{BudgetId, ExpenseId, MembershipId, UserId};
pub use member::{Membership, Role};
pub use money::{format_amount, format_signed, parse_amount};
pub use profile::Profile;
