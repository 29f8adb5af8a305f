//! Profile repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SharedBudgetError;
use crate::models::{Profile, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ProfileData {
    profiles: Vec<Profile>,
}

/// Repository for user profiles, keyed by user id
pub struct ProfileRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, Profile>>,
}

impl ProfileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), SharedBudgetError> {
        let file_data: ProfileData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for profile in file_data.profiles {
            data.insert(profile.user_id.clone(), profile);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut profiles: Vec<_> = data.values().cloned().collect();
        profiles.sort_by(|a, b| a.user_id.cmp(&b.user_id));

        write_json_atomic(&self.path, &ProfileData { profiles })
    }

    pub fn get(&self, user_id: &UserId) -> Result<Option<Profile>, SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(user_id).cloned())
    }

    pub fn upsert(&self, profile: Profile) -> Result<(), SharedBudgetError> {
        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(profile.user_id.clone(), profile);
        Ok(())
    }
}
