//! Profile service

use crate::audit::EntityType;
use crate::error::BudgetResult;
use crate::models::{Profile, UserId};
use crate::storage::Storage;

/// Service for user profiles
pub struct ProfileService<'a> {
    storage: &'a Storage,
}

impl<'a> ProfileService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn get(&self, user: &UserId) -> BudgetResult<Option<Profile>> {
        self.storage.profiles.get(user)
    }

    /// Set (or clear, with `None` or a blank name) the user's display name
    pub fn set_display_name(&self, user: &UserId, name: Option<&str>) -> BudgetResult<Profile> {
        let profile = Profile::new(user.clone(), name.map(str::to_string));
        let before = self.storage.profiles.get(user)?;

        self.storage.profiles.upsert(profile.clone())?;
        self.storage.profiles.save()?;

        match before {
            Some(before) => self.storage.log_update(
                user,
                EntityType::Profile,
                user.to_string(),
                profile.display_name.clone(),
                &before,
                &profile,
            )?,
            None => self.storage.log_create(
                user,
                EntityType::Profile,
                user.to_string(),
                profile.display_name.clone(),
                &profile,
            )?,
        }

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::BudgetPaths;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_replace_display_name() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let service = ProfileService::new(&storage);
        let alice = UserId::new("alice");

        assert!(service.get(&alice).unwrap().is_none());

        service.set_display_name(&alice, Some("Al")).unwrap();
        let profile = service.set_display_name(&alice, Some("Alice")).unwrap();
        assert_eq!(profile.label(), "Alice");

        let cleared = service.set_display_name(&alice, None).unwrap();
        assert_eq!(cleared.label(), "alice");

        let operations: Vec<_> = storage
            .audit()
            .read_all()
            .unwrap()
            .into_iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(
            operations,
            vec![Operation::Create, Operation::Update, Operation::Update]
        );
    }
}
