//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SharedBudgetError;
use crate::models::{Budget, BudgetId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), SharedBudgetError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for budget in file_data.budgets {
            data.insert(budget.id, budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), SharedBudgetError> {
        let file_data = BudgetData {
            budgets: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// All budgets, oldest first
    pub fn get_all(&self) -> Result<Vec<Budget>, SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(budgets)
    }

    /// Find a budget by its short ID, full UUID, or case-insensitive name
    pub fn find(&self, identifier: &str) -> Result<Option<Budget>, SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        if let Some(budget) = data.values().find(|b| b.id.matches(identifier)) {
            return Ok(Some(budget.clone()));
        }

        let needle = identifier.trim().to_lowercase();
        Ok(data
            .values()
            .find(|b| b.name.to_lowercase() == needle)
            .cloned())
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), SharedBudgetError> {
        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(budget.id, budget);
        Ok(())
    }

    pub fn delete(&self, id: BudgetId) -> Result<bool, SharedBudgetError> {
        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
