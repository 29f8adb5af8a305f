//! Membership checks shared by the services

use crate::error::{BudgetResult, SharedBudgetError};
use crate::models::{Budget, BudgetId, Membership, Role, UserId};
use crate::storage::Storage;

/// Load a budget or fail with `NotFound`
pub(crate) fn load_budget(storage: &Storage, budget_id: BudgetId) -> BudgetResult<Budget> {
    storage
        .budgets
        .get(budget_id)?
        .ok_or_else(|| SharedBudgetError::budget_not_found(budget_id.to_string()))
}

/// The acting user's membership in a budget
pub(crate) fn membership_of(
    storage: &Storage,
    budget_id: BudgetId,
    user: &UserId,
) -> BudgetResult<Membership> {
    storage
        .members
        .find(budget_id, user)?
        .ok_or_else(|| SharedBudgetError::NotAMember {
            user: user.to_string(),
            budget: budget_id.to_string(),
        })
}

/// Fail with `PermissionDenied` unless `allowed` holds for the member's role
pub(crate) fn require(
    membership: &Membership,
    allowed: fn(&Role) -> bool,
    action: &'static str,
) -> BudgetResult<()> {
    if allowed(&membership.role) {
        Ok(())
    } else {
        Err(SharedBudgetError::PermissionDenied {
            action,
            role: membership.role,
        })
    }
}

/// Look up the actor's membership and check the role in one step
pub(crate) fn authorize(
    storage: &Storage,
    budget_id: BudgetId,
    actor: &UserId,
    allowed: fn(&Role) -> bool,
    action: &'static str,
) -> BudgetResult<Membership> {
    let membership = membership_of(storage, budget_id, actor)?;
    require(&membership, allowed, action)?;
    Ok(membership)
}
