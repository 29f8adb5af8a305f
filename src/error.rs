//! Custom error types for SharedBudget
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The pure reporting core never returns
//! these; they belong to storage, services and the CLI.

use thiserror::Error;

use crate::models::Role;

/// The main error type for SharedBudget operations
#[derive(Error, Debug)]
pub enum SharedBudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The acting member's role does not allow the operation
    #[error("Permission denied: {role} members cannot {action}")]
    PermissionDenied { action: &'static str, role: Role },

    /// The acting user has no membership in the budget
    #[error("User '{user}' is not a member of budget {budget}")]
    NotAMember { user: String, budget: String },

    /// Members may not remove themselves through membership management
    #[error("You cannot remove yourself from a budget")]
    SelfRemoval,

    /// The operation would leave the budget without an admin
    #[error("Budget {0} must keep at least one admin")]
    LastAdmin(String),

    /// No identity is available for the current command
    #[error("Not logged in. Run 'budget user login <user-id>' or pass --user")]
    NotLoggedIn,

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl SharedBudgetError {
    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for memberships
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the membership/role policy
    pub fn is_permission(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied { .. } | Self::NotAMember { .. } | Self::SelfRemoval
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for SharedBudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SharedBudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for SharedBudget operations
pub type BudgetResult<T> = Result<T, SharedBudgetError>;
