//! Per-invocation state shared by the command handlers
//!
//! Resolves who is acting and which budget a command applies to from the
//! global flags and the saved settings.

use tracing::debug;

use crate::config::{BudgetPaths, Settings};
use crate::error::{BudgetResult, SharedBudgetError};
use crate::models::{BudgetId, UserId};
use crate::reports::AdvisorThresholds;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Storage, settings and the global overrides for one command
pub struct Session<'a> {
    pub storage: &'a Storage,
    pub settings: Settings,
    user_override: Option<UserId>,
    budget_override: Option<String>,
}

impl<'a> Session<'a> {
    pub fn new(
        storage: &'a Storage,
        settings: Settings,
        user_override: Option<String>,
        budget_override: Option<String>,
    ) -> Self {
        Self {
            storage,
            settings,
            user_override: user_override
                .map(UserId::new)
                .filter(|u| !u.is_empty()),
            budget_override,
        }
    }

    pub fn paths(&self) -> &BudgetPaths {
        self.storage.paths()
    }

    /// The acting user: `--user` if given, else the logged-in user
    pub fn actor(&self) -> BudgetResult<UserId> {
        self.user_override
            .clone()
            .or_else(|| self.settings.current_user.clone())
            .ok_or(SharedBudgetError::NotLoggedIn)
    }

    /// The budget a command applies to.
    ///
    /// `--budget` wins, then the saved active budget. A user with exactly
    /// one budget does not need to select it.
    pub fn budget_id(&self, actor: &UserId) -> BudgetResult<BudgetId> {
        let service = BudgetService::new(self.storage);

        if let Some(identifier) = &self.budget_override {
            return service
                .find(actor, identifier)?
                .map(|b| b.id)
                .ok_or_else(|| SharedBudgetError::budget_not_found(identifier.clone()));
        }

        if let Some(active) = self.settings.active_budget {
            if self.storage.members.find(active, actor)?.is_some() {
                return Ok(active);
            }
            debug!(budget = %active, "Active budget is no longer available");
        }

        let listings = service.list_for_user(actor)?;
        match listings.as_slice() {
            [only] => Ok(only.budget.id),
            [] => Err(SharedBudgetError::Validation(
                "You have no budgets yet. Run 'budget budget create <name>'".into(),
            )),
            _ => Err(SharedBudgetError::Validation(
                "No active budget. Run 'budget budget use <budget>' or pass --budget".into(),
            )),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    pub fn thresholds(&self) -> &AdvisorThresholds {
        &self.settings.thresholds
    }

    pub fn save_settings(&self) -> BudgetResult<()> {
        self.settings.save(self.storage.paths())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_actor_resolution() {
        let (_temp_dir, storage) = create_test_storage();

        let session = Session::new(&storage, Settings::default(), None, None);
        assert!(matches!(session.actor(), Err(SharedBudgetError::NotLoggedIn)));

        let mut settings = Settings::default();
        settings.current_user = Some(UserId::new("alice"));
        let session = Session::new(&storage, settings.clone(), None, None);
        assert_eq!(session.actor().unwrap(), UserId::new("alice"));

        let session = Session::new(&storage, settings, Some("bob".into()), None);
        assert_eq!(session.actor().unwrap(), UserId::new("bob"));
    }

    #[test]
    fn test_budget_resolution() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = UserId::new("alice");
        let service = BudgetService::new(&storage);

        let session = Session::new(&storage, Settings::default(), None, None);
        assert!(session.budget_id(&alice).unwrap_err().is_validation());

        let family = service.create(&alice, "Family").unwrap();
        assert_eq!(session.budget_id(&alice).unwrap(), family.id);

        let trip = service.create(&alice, "Trip").unwrap();
        assert!(session.budget_id(&alice).unwrap_err().is_validation());

        let session = Session::new(&storage, Settings::default(), None, Some("trip".into()));
        assert_eq!(session.budget_id(&alice).unwrap(), trip.id);

        let mut settings = Settings::default();
        settings.active_budget = Some(family.id);
        let session = Session::new(&storage, settings, None, None);
        assert_eq!(session.budget_id(&alice).unwrap(), family.id);
    }
}
