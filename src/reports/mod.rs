//! Reports module for SharedBudget
//!
//! The computational core of the application: category totals, the savings
//! advisor, and the summary that chains the two. Everything here is a pure
//! function of an income and a list of expenses.

pub mod advice;
pub mod summary;
pub mod totals;

pub use advice::{Advice, AdvisorThresholds, CategoryRatios, Message, Tip, Warning};
pub use summary::BudgetSummary;
pub use totals::{CategoryTotals, SkippedExpense};
