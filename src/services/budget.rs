//! Budget service
//!
//! Creating, listing and changing shared budgets. The creator of a budget
//! becomes its first admin; every later change is gated on the acting
//! member's role.

use tracing::{info, warn};

use super::access::{authorize, load_budget, membership_of};
use crate::audit::EntityType;
use crate::error::{BudgetResult, SharedBudgetError};
use crate::live::{ChangeEvent, LiveBudget, Subscription};
use crate::models::{Budget, BudgetId, Membership, Role, UserId};
use crate::reports::{AdvisorThresholds, BudgetSummary};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// A budget as listed for one user
#[derive(Debug, Clone)]
pub struct BudgetListing {
    pub budget: Budget,
    /// The listing user's role
    pub role: Role,
    pub member_count: usize,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a budget owned by `actor`, who becomes its admin
    pub fn create(&self, actor: &UserId, name: &str) -> BudgetResult<Budget> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SharedBudgetError::Validation(
                "Budget name cannot be empty".into(),
            ));
        }

        for listing in self.list_for_user(actor)? {
            if listing.budget.name.eq_ignore_ascii_case(name) {
                return Err(SharedBudgetError::Duplicate {
                    entity_type: "Budget",
                    identifier: name.to_string(),
                });
            }
        }

        let budget = Budget::new(name, actor.clone());
        budget
            .validate()
            .map_err(|e| SharedBudgetError::Validation(e.to_string()))?;
        let membership = Membership::new(budget.id, actor.clone(), Role::Admin);

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.members.upsert(membership.clone())?;
        // Members first: a membership without its budget is never listed
        if let Err(e) = self
            .storage
            .members
            .save()
            .and_then(|_| self.storage.budgets.save())
        {
            self.discard_new(&budget, &membership)?;
            return Err(e);
        }

        self.storage.log_create(
            actor,
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.name.clone()),
            &budget,
        )?;
        self.storage.log_create(
            actor,
            EntityType::Membership,
            membership.id.to_string(),
            Some(membership.to_string()),
            &membership,
        )?;

        info!(budget = %budget.id, owner = %actor, "Created budget");
        Ok(budget)
    }

    /// Find a budget by ID or name among the budgets `actor` belongs to
    pub fn find(&self, actor: &UserId, identifier: &str) -> BudgetResult<Option<Budget>> {
        let needle = identifier.trim().to_lowercase();
        Ok(self
            .list_for_user(actor)?
            .into_iter()
            .map(|listing| listing.budget)
            .find(|b| b.id.matches(identifier) || b.name.to_lowercase() == needle))
    }

    /// A budget and the actor's membership in it
    pub fn open(&self, actor: &UserId, budget_id: BudgetId) -> BudgetResult<(Budget, Membership)> {
        let budget = load_budget(self.storage, budget_id)?;
        let membership = membership_of(self.storage, budget_id, actor)?;
        Ok((budget, membership))
    }

    /// Budgets the user belongs to, with role and member count, oldest first
    pub fn list_for_user(&self, user: &UserId) -> BudgetResult<Vec<BudgetListing>> {
        let mut listings = Vec::new();

        for membership in self.storage.members.get_by_user(user)? {
            if let Some(budget) = self.storage.budgets.get(membership.budget_id)? {
                listings.push(BudgetListing {
                    member_count: self.storage.members.count_for_budget(budget.id)?,
                    role: membership.role,
                    budget,
                });
            }
        }

        listings.sort_by(|a, b| a.budget.created_at.cmp(&b.budget.created_at));
        Ok(listings)
    }

    /// Set the monthly income (admins and editors)
    pub fn set_income(&self, actor: &UserId, budget_id: BudgetId, amount: f64) -> BudgetResult<Budget> {
        authorize(self.storage, budget_id, actor, Role::can_edit, "change the income")?;

        let before = load_budget(self.storage, budget_id)?;
        let mut budget = before.clone();
        budget.set_income(amount);
        budget
            .validate()
            .map_err(|e| SharedBudgetError::Validation(e.to_string()))?;

        self.commit_update(actor, &before, budget)
    }

    /// Rename the budget (admins)
    pub fn rename(&self, actor: &UserId, budget_id: BudgetId, name: &str) -> BudgetResult<Budget> {
        authorize(self.storage, budget_id, actor, Role::can_manage, "rename the budget")?;

        let before = load_budget(self.storage, budget_id)?;
        let mut budget = before.clone();
        budget.rename(name);
        budget
            .validate()
            .map_err(|e| SharedBudgetError::Validation(e.to_string()))?;

        self.commit_update(actor, &before, budget)
    }

    /// Delete the budget with all of its members and expenses (admins)
    pub fn delete(&self, actor: &UserId, budget_id: BudgetId) -> BudgetResult<Budget> {
        authorize(self.storage, budget_id, actor, Role::can_manage, "delete the budget")?;
        let budget = load_budget(self.storage, budget_id)?;

        let expenses = self.storage.expenses.delete_by_budget(budget_id)?;
        let members = self.storage.members.delete_by_budget(budget_id)?;
        self.storage.budgets.delete(budget_id)?;
        self.storage.save_all()?;

        self.storage.log_delete(
            actor,
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.name.clone()),
            &budget,
        )?;
        self.storage.publish(ChangeEvent::BudgetDeleted(budget_id))?;

        info!(budget = %budget_id, expenses, members, "Deleted budget");
        Ok(budget)
    }

    /// Summary of the budget as it is now (any member)
    pub fn summary(
        &self,
        actor: &UserId,
        budget_id: BudgetId,
        thresholds: &AdvisorThresholds,
    ) -> BudgetResult<BudgetSummary> {
        let (budget, _) = self.open(actor, budget_id)?;
        let expenses = self.storage.expenses.get_by_budget(budget_id)?;
        Ok(BudgetSummary::compute(budget.monthly_income, &expenses, thresholds))
    }

    /// Subscribe to a budget and take a snapshot of it.
    ///
    /// The subscription is registered before the snapshot is read so that
    /// no committed change falls between the two.
    pub fn watch(&self, actor: &UserId, budget_id: BudgetId) -> BudgetResult<(LiveBudget, Subscription)> {
        membership_of(self.storage, budget_id, actor)?;
        let subscription = self.storage.feed().subscribe(budget_id)?;
        let budget = load_budget(self.storage, budget_id)?;
        let expenses = self.storage.expenses.get_by_budget(budget_id)?;
        Ok((LiveBudget::new(budget, expenses), subscription))
    }

    /// Undo the in-memory inserts of a failed `create`
    fn discard_new(&self, budget: &Budget, membership: &Membership) -> BudgetResult<()> {
        self.storage.budgets.delete(budget.id)?;
        self.storage.members.delete(membership.id)?;
        if let Err(e) = self.storage.members.save() {
            warn!(budget = %budget.id, error = %e, "Could not remove membership of unsaved budget");
        }
        Ok(())
    }

    fn commit_update(&self, actor: &UserId, before: &Budget, budget: Budget) -> BudgetResult<Budget> {
        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_update(
            actor,
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.name.clone()),
            before,
            &budget,
        )?;
        self.storage.publish(ChangeEvent::BudgetUpdated(budget.clone()))?;

        Ok(budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::models::{ExpenseCategory, ExpenseRecord};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn alice() -> UserId {
        UserId::new("alice")
    }

    fn join(storage: &Storage, budget_id: BudgetId, user: &str, role: Role) {
        storage
            .members
            .upsert(Membership::new(budget_id, UserId::new(user), role))
            .unwrap();
    }

    #[test]
    fn test_creator_becomes_admin() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service.create(&alice(), "Family").unwrap();

        let (_, membership) = service.open(&alice(), budget.id).unwrap();
        assert_eq!(membership.role, Role::Admin);
        assert_eq!(budget.monthly_income, 0.0);
    }

    #[test]
    fn test_create_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        assert!(service.create(&alice(), "   ").unwrap_err().is_validation());

        service.create(&alice(), "Family").unwrap();
        assert!(matches!(
            service.create(&alice(), "family"),
            Err(SharedBudgetError::Duplicate { .. })
        ));
        // Another user may reuse the name
        assert!(service.create(&UserId::new("bob"), "Family").is_ok());
    }

    #[test]
    fn test_failed_create_leaves_nothing_on_disk() {
        let (temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let data_dir = temp_dir.path().join("data");
        std::fs::create_dir_all(data_dir.join("members.json.tmp")).unwrap();

        assert!(service.create(&alice(), "Family").is_err());
        assert!(service.list_for_user(&alice()).unwrap().is_empty());
        assert_eq!(storage.budgets.count().unwrap(), 0);

        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.budgets.count().unwrap(), 0);
        assert!(reloaded.members.get_by_user(&alice()).unwrap().is_empty());
    }

    #[test]
    fn test_list_for_user_reports_role_and_count() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let family = service.create(&alice(), "Family").unwrap();
        join(&storage, family.id, "bob", Role::Viewer);
        service.create(&UserId::new("carol"), "Trip").unwrap();

        let mine = service.list_for_user(&alice()).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].role, Role::Admin);
        assert_eq!(mine[0].member_count, 2);

        let bobs = service.list_for_user(&UserId::new("bob")).unwrap();
        assert_eq!(bobs[0].role, Role::Viewer);
    }

    #[test]
    fn test_find_only_sees_own_budgets() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let family = service.create(&alice(), "Family").unwrap();

        assert_eq!(service.find(&alice(), "family").unwrap().unwrap().id, family.id);
        assert_eq!(
            service.find(&alice(), &family.id.to_string()).unwrap().unwrap().id,
            family.id
        );
        assert!(service.find(&UserId::new("bob"), "Family").unwrap().is_none());
    }

    #[test]
    fn test_income_permissions() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let family = service.create(&alice(), "Family").unwrap();
        join(&storage, family.id, "bob", Role::Editor);
        join(&storage, family.id, "vic", Role::Viewer);

        let updated = service.set_income(&UserId::new("bob"), family.id, 5000.0).unwrap();
        assert_eq!(updated.monthly_income, 5000.0);

        let err = service
            .set_income(&UserId::new("vic"), family.id, 1.0)
            .unwrap_err();
        assert!(matches!(
            err,
            SharedBudgetError::PermissionDenied { role: Role::Viewer, .. }
        ));

        let err = service
            .set_income(&UserId::new("mallory"), family.id, 1.0)
            .unwrap_err();
        assert!(matches!(err, SharedBudgetError::NotAMember { .. }));

        assert!(service.set_income(&alice(), family.id, -5.0).unwrap_err().is_validation());
        let (budget, _) = service.open(&alice(), family.id).unwrap();
        assert_eq!(budget.monthly_income, 5000.0);
    }

    #[test]
    fn test_rename_and_delete_need_admin() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let family = service.create(&alice(), "Family").unwrap();
        join(&storage, family.id, "bob", Role::Editor);

        assert!(service
            .rename(&UserId::new("bob"), family.id, "Ours")
            .unwrap_err()
            .is_permission());
        assert_eq!(service.rename(&alice(), family.id, "Ours").unwrap().name, "Ours");

        assert!(service.delete(&UserId::new("bob"), family.id).unwrap_err().is_permission());
        service.delete(&alice(), family.id).unwrap();
        assert!(storage.budgets.get(family.id).unwrap().is_none());
        assert_eq!(storage.members.count_for_budget(family.id).unwrap(), 0);
    }

    #[test]
    fn test_summary_uses_stored_expenses() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let family = service.create(&alice(), "Family").unwrap();
        service.set_income(&alice(), family.id, 5000.0).unwrap();
        storage
            .expenses
            .upsert(ExpenseRecord::new(family.id, ExpenseCategory::Housing, "Rent", 1600.0))
            .unwrap();

        let summary = service
            .summary(&alice(), family.id, &AdvisorThresholds::default())
            .unwrap();
        assert_eq!(summary.total_expenses(), 1600.0);
        assert_eq!(summary.net_leftover(), 3400.0);
    }

    #[test]
    fn test_watch_sees_income_change() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let family = service.create(&alice(), "Family").unwrap();

        let (mut live, subscription) = service.watch(&alice(), family.id).unwrap();
        service.set_income(&alice(), family.id, 4200.0).unwrap();

        assert_eq!(live.sync(&subscription), 1);
        assert_eq!(live.budget().monthly_income, 4200.0);
    }

    #[test]
    fn test_changes_are_audited() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let family = service.create(&alice(), "Family").unwrap();
        service.set_income(&alice(), family.id, 5000.0).unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[2].diff_summary.as_deref(),
            Some("monthly_income: 0.0 -> 5000.0")
        );
    }
}
