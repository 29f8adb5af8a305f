//! Expense service
//!
//! Expenses are created and deleted, never edited. Both require the admin
//! or editor role; any member may list them.

use tracing::debug;

use super::access::{authorize, load_budget, membership_of};
use crate::audit::EntityType;
use crate::error::{BudgetResult, SharedBudgetError};
use crate::live::ChangeEvent;
use crate::models::{BudgetId, ExpenseCategory, ExpenseRecord, Role, UserId};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense in a budget
    pub fn add(
        &self,
        actor: &UserId,
        budget_id: BudgetId,
        category: ExpenseCategory,
        name: &str,
        amount: f64,
    ) -> BudgetResult<ExpenseRecord> {
        load_budget(self.storage, budget_id)?;
        authorize(self.storage, budget_id, actor, Role::can_edit, "add expenses")?;

        let expense =
            ExpenseRecord::new(budget_id, category, name, amount).with_author(actor.clone());
        expense
            .validate()
            .map_err(|e| SharedBudgetError::Validation(e.to_string()))?;
        if expense.amount <= 0.0 {
            return Err(SharedBudgetError::Validation(
                "Expense amount must be greater than zero".into(),
            ));
        }

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            actor,
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;
        self.storage
            .publish(ChangeEvent::ExpenseInserted(expense.clone()))?;

        debug!(expense = %expense.id, category = category.key(), amount, "Added expense");
        Ok(expense)
    }

    /// Delete an expense, identified by short ID or full UUID
    pub fn remove(
        &self,
        actor: &UserId,
        budget_id: BudgetId,
        identifier: &str,
    ) -> BudgetResult<ExpenseRecord> {
        authorize(self.storage, budget_id, actor, Role::can_edit, "remove expenses")?;

        let expense = self
            .storage
            .expenses
            .find_in_budget(budget_id, identifier)?
            .ok_or_else(|| SharedBudgetError::expense_not_found(identifier.trim()))?;

        self.storage.expenses.delete(expense.id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            actor,
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;
        self.storage.publish(ChangeEvent::ExpenseDeleted {
            budget_id,
            expense_id: expense.id,
        })?;

        Ok(expense)
    }

    /// Expenses of a budget, newest first, optionally for one category
    pub fn list(
        &self,
        actor: &UserId,
        budget_id: BudgetId,
        category: Option<ExpenseCategory>,
    ) -> BudgetResult<Vec<ExpenseRecord>> {
        membership_of(self.storage, budget_id, actor)?;

        let mut expenses = self.storage.expenses.get_by_budget(budget_id)?;
        if let Some(category) = category {
            expenses.retain(|e| e.category.known() == Some(category));
        }
        Ok(expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::models::Membership;
    use crate::services::BudgetService;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn shared_budget(storage: &Storage) -> BudgetId {
        let budget = BudgetService::new(storage)
            .create(&UserId::new("alice"), "Family")
            .unwrap();
        for (user, role) in [("bob", Role::Editor), ("vic", Role::Viewer)] {
            storage
                .members
                .upsert(Membership::new(budget.id, UserId::new(user), role))
                .unwrap();
        }
        budget.id
    }

    #[test]
    fn test_editor_adds_and_removes() {
        let (_temp_dir, storage) = create_test_storage();
        let budget_id = shared_budget(&storage);
        let service = ExpenseService::new(&storage);
        let bob = UserId::new("bob");

        let expense = service
            .add(&bob, budget_id, ExpenseCategory::Groceries, "Food", 400.0)
            .unwrap();
        assert_eq!(expense.created_by, Some(bob.clone()));
        assert_eq!(service.list(&bob, budget_id, None).unwrap().len(), 1);

        let removed = service
            .remove(&bob, budget_id, &expense.id.to_string())
            .unwrap();
        assert_eq!(removed.id, expense.id);
        assert!(service.list(&bob, budget_id, None).unwrap().is_empty());
    }

    #[test]
    fn test_viewer_cannot_change_expenses() {
        let (_temp_dir, storage) = create_test_storage();
        let budget_id = shared_budget(&storage);
        let service = ExpenseService::new(&storage);
        let vic = UserId::new("vic");

        let err = service
            .add(&vic, budget_id, ExpenseCategory::Health, "Dentist", 80.0)
            .unwrap_err();
        assert!(err.is_permission());

        let expense = service
            .add(&UserId::new("alice"), budget_id, ExpenseCategory::Health, "Dentist", 80.0)
            .unwrap();
        assert!(service
            .remove(&vic, budget_id, &expense.id.to_string())
            .unwrap_err()
            .is_permission());

        // Viewers can still read
        assert_eq!(service.list(&vic, budget_id, None).unwrap().len(), 1);
    }

    #[test]
    fn test_outsider_cannot_list() {
        let (_temp_dir, storage) = create_test_storage();
        let budget_id = shared_budget(&storage);
        let service = ExpenseService::new(&storage);

        assert!(matches!(
            service.list(&UserId::new("mallory"), budget_id, None),
            Err(SharedBudgetError::NotAMember { .. })
        ));
    }

    #[test]
    fn test_invalid_expense_not_stored() {
        let (_temp_dir, storage) = create_test_storage();
        let budget_id = shared_budget(&storage);
        let service = ExpenseService::new(&storage);
        let alice = UserId::new("alice");

        assert!(service
            .add(&alice, budget_id, ExpenseCategory::Personal, "Gym", -10.0)
            .unwrap_err()
            .is_validation());
        assert!(service
            .add(&alice, budget_id, ExpenseCategory::Personal, " ", 10.0)
            .unwrap_err()
            .is_validation());
        let err = service
            .add(&alice, budget_id, ExpenseCategory::Personal, "Gym", 0.0)
            .unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_remove_unknown_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let budget_id = shared_budget(&storage);
        let service = ExpenseService::new(&storage);

        assert!(service
            .remove(&UserId::new("alice"), budget_id, "exp-00000000")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_list_by_category() {
        let (_temp_dir, storage) = create_test_storage();
        let budget_id = shared_budget(&storage);
        let service = ExpenseService::new(&storage);
        let alice = UserId::new("alice");

        service
            .add(&alice, budget_id, ExpenseCategory::Housing, "Rent", 1600.0)
            .unwrap();
        service
            .add(&alice, budget_id, ExpenseCategory::Groceries, "Food", 400.0)
            .unwrap();

        let housing = service
            .list(&alice, budget_id, Some(ExpenseCategory::Housing))
            .unwrap();
        assert_eq!(housing.len(), 1);
        assert_eq!(housing[0].name, "Rent");
    }

    #[test]
    fn test_events_published() {
        let (_temp_dir, storage) = create_test_storage();
        let budget_id = shared_budget(&storage);
        let service = ExpenseService::new(&storage);
        let alice = UserId::new("alice");
        let subscription = storage.feed().subscribe(budget_id).unwrap();

        let expense = service
            .add(&alice, budget_id, ExpenseCategory::Entertainment, "Movies", 200.0)
            .unwrap();
        service
            .remove(&alice, budget_id, &expense.id.to_string())
            .unwrap();

        let events = subscription.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ChangeEvent::ExpenseInserted(expense.clone()));
        assert_eq!(
            events[1],
            ChangeEvent::ExpenseDeleted {
                budget_id,
                expense_id: expense.id
            }
        );
    }
}
