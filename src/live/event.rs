//! Change events

use crate::models::{Budget, BudgetId, ExpenseId, ExpenseRecord};

/// A committed change to a budget or its expenses
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// Budget row replaced (income or name changed)
    BudgetUpdated(Budget),
    BudgetDeleted(BudgetId),
    ExpenseInserted(ExpenseRecord),
    ExpenseUpdated(ExpenseRecord),
    ExpenseDeleted {
        budget_id: BudgetId,
        expense_id: ExpenseId,
    },
    /// Membership list or roles changed
    MembersChanged(BudgetId),
}

impl ChangeEvent {
    /// The budget the event belongs to
    pub fn budget_id(&self) -> BudgetId {
        match self {
            Self::BudgetUpdated(budget) => budget.id,
            Self::BudgetDeleted(id) | Self::MembersChanged(id) => *id,
            Self::ExpenseInserted(expense) | Self::ExpenseUpdated(expense) => expense.budget_id,
            Self::ExpenseDeleted { budget_id, .. } => *budget_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::BudgetUpdated(_) => "budget_updated",
            Self::BudgetDeleted(_) => "budget_deleted",
            Self::ExpenseInserted(_) => "expense_inserted",
            Self::ExpenseUpdated(_) => "expense_updated",
            Self::ExpenseDeleted { .. } => "expense_deleted",
            Self::MembersChanged(_) => "members_changed",
        }
    }
}
