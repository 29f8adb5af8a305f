//! Budget model
//!
//! A budget is a named, shared collection of a monthly income and expense
//! records. Membership and expenses refer back to it by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, UserId};
use super::money::validate_amount;

/// A shared budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Display name
    pub name: String,

    /// Monthly income
    #[serde(default)]
    pub monthly_income: f64,

    /// The user who created the budget
    pub created_by: UserId,

    /// When the budget was created
    pub created_at: DateTime<Utc>,

    /// When the budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget with no income
    pub fn new(name: impl Into<String>, created_by: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            name: name.into().trim().to_string(),
            monthly_income: 0.0,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the monthly income
    pub fn set_income(&mut self, amount: f64) {
        self.monthly_income = amount;
        self.updated_at = Utc::now();
    }

    /// Rename the budget
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into().trim().to_string();
        self.updated_at = Utc::now();
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(BudgetValidationError::NameTooLong(self.name.len()));
        }

        if validate_amount(self.monthly_income).is_err() {
            return Err(BudgetValidationError::InvalidIncome(self.monthly_income));
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidIncome(f64),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Budget name too long ({} chars, max 100)", len),
            Self::InvalidIncome(value) => {
                write!(f, "Monthly income must be a non-negative amount, got {}", value)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_budget() {
        let budget = Budget::new("  Family  ", UserId::new("alice"));
        assert_eq!(budget.name, "Family");
        assert_eq!(budget.monthly_income, 0.0);
        assert_eq!(budget.created_by.as_str(), "alice");
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut budget = Budget::new("Family", UserId::new("alice"));

        budget.name = String::new();
        assert_eq!(budget.validate(), Err(BudgetValidationError::EmptyName));

        budget.name = "a".repeat(101);
        assert!(matches!(
            budget.validate(),
            Err(BudgetValidationError::NameTooLong(101))
        ));

        budget.name = "Family".into();
        budget.monthly_income = -1.0;
        assert!(matches!(
            budget.validate(),
            Err(BudgetValidationError::InvalidIncome(_))
        ));
    }

    #[test]
    fn test_set_income_touches_updated_at() {
        let mut budget = Budget::new("Family", UserId::new("alice"));
        let before = budget.updated_at;
        budget.set_income(5000.0);
        assert_eq!(budget.monthly_income, 5000.0);
        assert!(budget.updated_at >= before);
    }

    #[test]
    fn test_missing_income_defaults_to_zero() {
        let budget = Budget::new("Family", UserId::new("alice"));
        let mut value = serde_json::to_value(&budget).unwrap();
        value.as_object_mut().unwrap().remove("monthly_income");
        let loaded: Budget = serde_json::from_value(value).unwrap();
        assert_eq!(loaded.monthly_income, 0.0);
    }
}
