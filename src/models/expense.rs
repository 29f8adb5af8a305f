//! Expense record model
//!
//! Expenses are immutable once recorded: they are created and deleted, never
//! edited in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{CategoryLabel, ExpenseCategory};
use super::ids::{BudgetId, ExpenseId, UserId};
use super::money::validate_amount;

/// A single categorized expense in a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier
    pub id: ExpenseId,

    /// The budget this expense belongs to
    pub budget_id: BudgetId,

    /// Category label as stored
    pub category: CategoryLabel,

    /// Human-readable description
    pub name: String,

    /// Amount (non-negative)
    pub amount: f64,

    /// Who recorded the expense
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,
}

impl ExpenseRecord {
    /// Create a new expense in one of the fixed categories
    pub fn new(
        budget_id: BudgetId,
        category: ExpenseCategory,
        name: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            budget_id,
            category: CategoryLabel::Known(category),
            name: name.into().trim().to_string(),
            amount,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    /// Record the author of the expense
    pub fn with_author(mut self, user: UserId) -> Self {
        self.created_by = Some(user);
        self
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }

        if self.name.len() > 200 {
            return Err(ExpenseValidationError::NameTooLong(self.name.len()));
        }

        if validate_amount(self.amount).is_err() {
            return Err(ExpenseValidationError::InvalidAmount(self.amount));
        }

        if !self.category.is_recognized() {
            return Err(ExpenseValidationError::UnrecognizedCategory(
                self.category.as_str().to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {:.2}", self.name, self.category, self.amount)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidAmount(f64),
    UnrecognizedCategory(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense description cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Expense description too long ({} chars, max 200)", len)
            }
            Self::InvalidAmount(value) => {
                write!(f, "Expense amount must be non-negative, got {}", value)
            }
            Self::UnrecognizedCategory(raw) => write!(f, "Unrecognized category '{}'", raw),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense() {
        let budget_id = BudgetId::new();
        let expense = ExpenseRecord::new(budget_id, ExpenseCategory::Housing, " Rent ", 1600.0)
            .with_author(UserId::new("alice"));

        assert_eq!(expense.budget_id, budget_id);
        assert_eq!(expense.name, "Rent");
        assert_eq!(expense.category.known(), Some(ExpenseCategory::Housing));
        assert_eq!(expense.created_by, Some(UserId::new("alice")));
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut expense =
            ExpenseRecord::new(BudgetId::new(), ExpenseCategory::Groceries, "Food", 50.0);

        expense.amount = -1.0;
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::InvalidAmount(_))
        ));

        expense.amount = 50.0;
        expense.name = "  ".into();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyName));

        expense.name = "Food".into();
        expense.category = CategoryLabel::Unrecognized("misc".into());
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::UnrecognizedCategory("misc".into()))
        );
    }

    #[test]
    fn test_deserialize_unknown_category() {
        let json = format!(
            r#"{{"id":"{}","budget_id":"{}","category":"misc","name":"Stuff","amount":12.5,"created_at":"2025-01-01T00:00:00Z"}}"#,
            uuid::Uuid::new_v4(),
            uuid::Uuid::new_v4()
        );
        let expense: ExpenseRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(expense.category, CategoryLabel::Unrecognized("misc".into()));
        assert!(expense.created_by.is_none());
    }
}
