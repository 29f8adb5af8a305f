//! Expense repository for JSON storage
//!
//! Manages loading and saving expense records to expenses.json, indexed by
//! budget.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SharedBudgetError;
use crate::models::{BudgetId, ExpenseId, ExpenseRecord};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<ExpenseRecord>,
}

/// Repository for expense persistence with a per-budget index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, ExpenseRecord>>,
    /// Index: budget_id -> expense_ids
    by_budget: RwLock<HashMap<BudgetId, Vec<ExpenseId>>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_budget: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and build the index
    pub fn load(&self) -> Result<(), SharedBudgetError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_budget = self.by_budget.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_budget.clear();

        for expense in file_data.expenses {
            by_budget.entry(expense.budget_id).or_default().push(expense.id);
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk, newest first
    pub fn save(&self) -> Result<(), SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<ExpenseRecord>, SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Expenses of a budget, newest first
    pub fn get_by_budget(
        &self,
        budget_id: BudgetId,
    ) -> Result<Vec<ExpenseRecord>, SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_budget = self.by_budget.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut expenses: Vec<_> = by_budget
            .get(&budget_id)
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(expenses)
    }

    /// Find an expense of a budget by short ID or full UUID
    pub fn find_in_budget(
        &self,
        budget_id: BudgetId,
        identifier: &str,
    ) -> Result<Option<ExpenseRecord>, SharedBudgetError> {
        Ok(self
            .get_by_budget(budget_id)?
            .into_iter()
            .find(|e| e.id.matches(identifier)))
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: ExpenseRecord) -> Result<(), SharedBudgetError> {
        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_budget = self.by_budget.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_budget.get_mut(&old.budget_id) {
                ids.retain(|id| *id != expense.id);
            }
        }

        by_budget.entry(expense.budget_id).or_default().push(expense.id);
        data.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense, returning it if it existed
    pub fn delete(&self, id: ExpenseId) -> Result<Option<ExpenseRecord>, SharedBudgetError> {
        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_budget = self.by_budget.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let removed = data.remove(&id);
        if let Some(expense) = &removed {
            if let Some(ids) = by_budget.get_mut(&expense.budget_id) {
                ids.retain(|eid| *eid != id);
            }
        }
        Ok(removed)
    }

    /// Remove every expense of a budget, returning how many were removed
    pub fn delete_by_budget(&self, budget_id: BudgetId) -> Result<usize, SharedBudgetError> {
        let mut data = self.data.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_budget = self.by_budget.write().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let ids = by_budget.remove(&budget_id).unwrap_or_default();
        for id in &ids {
            data.remove(id);
        }
        Ok(ids.len())
    }

    pub fn count(&self) -> Result<usize, SharedBudgetError> {
        let data = self.data.read().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
