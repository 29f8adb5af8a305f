//! Live budget snapshot
//!
//! Holds the latest budget row and expense list as seen through the change
//! feed. Derived figures are never patched incrementally; the summary is
//! recomputed from the whole snapshot on request.

use super::event::ChangeEvent;
use super::feed::Subscription;
use crate::models::{Budget, BudgetId, ExpenseRecord};
use crate::reports::{AdvisorThresholds, BudgetSummary};

/// Current view of one budget
#[derive(Debug, Clone)]
pub struct LiveBudget {
    budget: Budget,
    expenses: Vec<ExpenseRecord>,
    deleted: bool,
}

impl LiveBudget {
    /// Start from a loaded budget and its expenses (newest first)
    pub fn new(budget: Budget, expenses: Vec<ExpenseRecord>) -> Self {
        Self {
            budget,
            expenses,
            deleted: false,
        }
    }

    pub fn id(&self) -> BudgetId {
        self.budget.id
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    /// Whether a delete event for this budget has been seen
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Fold one event into the snapshot.
    ///
    /// Returns `true` if the snapshot changed. Events for other budgets are
    /// ignored.
    pub fn apply(&mut self, event: &ChangeEvent) -> bool {
        if event.budget_id() != self.budget.id {
            return false;
        }

        match event {
            ChangeEvent::BudgetUpdated(budget) => {
                self.budget = budget.clone();
                true
            }
            ChangeEvent::BudgetDeleted(_) => {
                self.deleted = true;
                true
            }
            ChangeEvent::ExpenseInserted(expense) => {
                match self.expenses.iter_mut().find(|e| e.id == expense.id) {
                    Some(existing) => *existing = expense.clone(),
                    None => self.expenses.insert(0, expense.clone()),
                }
                true
            }
            ChangeEvent::ExpenseUpdated(expense) => {
                match self.expenses.iter_mut().find(|e| e.id == expense.id) {
                    Some(existing) => {
                        *existing = expense.clone();
                        true
                    }
                    None => false,
                }
            }
            ChangeEvent::ExpenseDeleted { expense_id, .. } => {
                let before = self.expenses.len();
                self.expenses.retain(|e| e.id != *expense_id);
                self.expenses.len() != before
            }
            ChangeEvent::MembersChanged(_) => false,
        }
    }

    /// Apply every pending event of `subscription`, returning how many
    /// changed the snapshot
    pub fn sync(&mut self, subscription: &Subscription) -> usize {
        subscription
            .drain()
            .iter()
            .filter(|event| self.apply(event))
            .count()
    }

    /// Recompute the full summary of the current snapshot
    pub fn summary(&self, thresholds: &AdvisorThresholds) -> BudgetSummary {
        BudgetSummary::compute(self.budget.monthly_income, &self.expenses, thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::ChangeFeed;
    use crate::models::{ExpenseCategory, UserId};

    fn family() -> (Budget, Vec<ExpenseRecord>) {
        let mut budget = Budget::new("Family", UserId::new("alice"));
        budget.set_income(5000.0);
        let expenses = vec![ExpenseRecord::new(
            budget.id,
            ExpenseCategory::Housing,
            "Rent",
            1600.0,
        )];
        (budget, expenses)
    }

    #[test]
    fn test_insert_prepends() {
        let (budget, expenses) = family();
        let mut live = LiveBudget::new(budget.clone(), expenses);

        let food = ExpenseRecord::new(budget.id, ExpenseCategory::Groceries, "Food", 400.0);
        assert!(live.apply(&ChangeEvent::ExpenseInserted(food.clone())));

        assert_eq!(live.expenses().len(), 2);
        assert_eq!(live.expenses()[0].id, food.id);
        assert_eq!(live.summary(&AdvisorThresholds::default()).total_expenses(), 2000.0);
    }

    #[test]
    fn test_duplicate_insert_is_replaced_not_doubled() {
        let (budget, expenses) = family();
        let rent = expenses[0].clone();
        let mut live = LiveBudget::new(budget, expenses);

        live.apply(&ChangeEvent::ExpenseInserted(rent));
        assert_eq!(live.expenses().len(), 1);
    }

    #[test]
    fn test_update_replaces_by_id() {
        let (budget, expenses) = family();
        let mut rent = expenses[0].clone();
        let mut live = LiveBudget::new(budget, expenses);

        rent.amount = 1700.0;
        assert!(live.apply(&ChangeEvent::ExpenseUpdated(rent)));
        assert_eq!(live.expenses()[0].amount, 1700.0);
    }

    #[test]
    fn test_delete_filters_by_id() {
        let (budget, expenses) = family();
        let rent_id = expenses[0].id;
        let mut live = LiveBudget::new(budget.clone(), expenses);

        assert!(live.apply(&ChangeEvent::ExpenseDeleted {
            budget_id: budget.id,
            expense_id: rent_id
        }));
        assert!(live.expenses().is_empty());
        assert!(!live.apply(&ChangeEvent::ExpenseDeleted {
            budget_id: budget.id,
            expense_id: rent_id
        }));
    }

    #[test]
    fn test_budget_update_changes_income() {
        let (budget, expenses) = family();
        let mut live = LiveBudget::new(budget.clone(), expenses);

        let mut updated = budget;
        updated.set_income(2000.0);
        live.apply(&ChangeEvent::BudgetUpdated(updated));

        let summary = live.summary(&AdvisorThresholds::default());
        assert_eq!(summary.monthly_income, 2000.0);
        assert_eq!(summary.net_leftover(), 400.0);
    }

    #[test]
    fn test_other_budget_ignored() {
        let (budget, expenses) = family();
        let mut live = LiveBudget::new(budget, expenses);
        let stranger = ExpenseRecord::new(BudgetId::new(), ExpenseCategory::Health, "x", 5.0);

        assert!(!live.apply(&ChangeEvent::ExpenseInserted(stranger)));
        assert_eq!(live.expenses().len(), 1);
    }

    #[test]
    fn test_sync_from_subscription() {
        let (budget, expenses) = family();
        let feed = ChangeFeed::new();
        let sub = feed.subscribe(budget.id).unwrap();
        let mut live = LiveBudget::new(budget.clone(), expenses);

        feed.publish(&ChangeEvent::ExpenseInserted(ExpenseRecord::new(
            budget.id,
            ExpenseCategory::Entertainment,
            "Movies",
            200.0,
        )))
        .unwrap();
        feed.publish(&ChangeEvent::MembersChanged(budget.id)).unwrap();
        feed.publish(&ChangeEvent::BudgetDeleted(budget.id)).unwrap();

        assert_eq!(live.sync(&sub), 2);
        assert_eq!(live.expenses().len(), 2);
        assert!(live.is_deleted());
    }
}
