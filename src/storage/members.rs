//! Membership repository for JSON storage
//!
//! Manages loading and saving budget memberships to members.json. A user
//! holds at most one membership per budget.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SharedBudgetError;
use crate::models::{BudgetId, Membership, MembershipId, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MemberData {
    members: Vec<Membership>,
}

/// Repository for membership persistence
pub struct MemberRepository {
    path: PathBuf,
    data: RwLock<HashMap<MembershipId, Membership>>,
}

impl MemberRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load memberships from disk
    pub fn load(&self) -> Result<(), SharedBudgetError> {
        let file_data: MemberData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for member in file_data.members {
            data.insert(member.id, member);
        }

        Ok(())
    }

    /// Save memberships to disk
    pub fn save(&self) -> Result<(), SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut members: Vec<_> = data.values().cloned().collect();
        members.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &MemberData { members })
    }

    /// Members of a budget, most privileged first, then by join date
    pub fn get_by_budget(&self, budget_id: BudgetId) -> Result<Vec<Membership>, SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut members: Vec<_> = data
            .values()
            .filter(|m| m.budget_id == budget_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.role.cmp(&b.role).then(a.created_at.cmp(&b.created_at)));
        Ok(members)
    }

    /// Memberships held by a user, across all budgets
    pub fn get_by_user(&self, user_id: &UserId) -> Result<Vec<Membership>, SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .values()
            .filter(|m| &m.user_id == user_id)
            .cloned()
            .collect())
    }

    /// The membership of `user_id` in `budget_id`, if any
    pub fn find(
        &self,
        budget_id: BudgetId,
        user_id: &UserId,
    ) -> Result<Option<Membership>, SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .values()
            .find(|m| m.budget_id == budget_id && &m.user_id == user_id)
            .cloned())
    }

    pub fn count_for_budget(&self, budget_id: BudgetId) -> Result<usize, SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().filter(|m| m.budget_id == budget_id).count())
    }

    /// Insert or update a membership
    pub fn upsert(&self, member: Membership) -> Result<(), SharedBudgetError> {
        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(member.id, member);
        Ok(())
    }

    pub fn delete(&self, id: MembershipId) -> Result<bool, SharedBudgetError> {
        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id).is_some())
    }

    /// Remove every membership of a budget, returning how many were removed
    pub fn delete_by_budget(&self, budget_id: BudgetId) -> Result<usize, SharedBudgetError> {
        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let before = data.len();
        data.retain(|_, m| m.budget_id != budget_id);
        Ok(before - data.len())
    }
}
