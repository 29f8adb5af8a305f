//! Membership and role model
//!
//! A membership links a user to a budget with a role. The role alone decides
//! what the member may change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{BudgetId, MembershipId, UserId};

/// Role of a member within a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    #[default]
    Viewer,
}

impl Role {
    /// Get all roles, most privileged first
    pub fn all() -> &'static [Self] {
        &[Self::Admin, Self::Editor, Self::Viewer]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    /// May read the budget (every role)
    pub fn can_view(&self) -> bool {
        true
    }

    /// May create/delete expenses and change the income
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Admin | Self::Editor)
    }

    /// May add, remove and re-role members, rename or delete the budget
    pub fn can_manage(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

/// Error returned for unknown role names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleParseError(pub String);

impl fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown role '{}' (expected admin, editor or viewer)", self.0)
    }
}

impl std::error::Error for RoleParseError {}

/// A user's membership in a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier
    pub id: MembershipId,

    /// The budget
    pub budget_id: BudgetId,

    /// The member
    pub user_id: UserId,

    /// Granted role
    pub role: Role,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(budget_id: BudgetId, user_id: UserId, role: Role) -> Self {
        Self {
            id: MembershipId::new(),
            budget_id,
            user_id,
            role,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.user_id, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_matrix() {
        assert!(Role::Admin.can_edit());
        assert!(Role::Admin.can_manage());

        assert!(Role::Editor.can_edit());
        assert!(!Role::Editor.can_manage());

        assert!(Role::Viewer.can_view());
        assert!(!Role::Viewer.can_edit());
        assert!(!Role::Viewer.can_manage());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" editor".parse::<Role>().unwrap(), Role::Editor);
        assert!("owner".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::Viewer);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Editor).unwrap(), "\"editor\"");
        let role: Role = serde_json::from_str("\"viewer\"").unwrap();
        assert_eq!(role, Role::Viewer);
    }

    #[test]
    fn test_new_membership() {
        let budget_id = BudgetId::new();
        let member = Membership::new(budget_id, UserId::new("bob"), Role::Editor);
        assert_eq!(member.budget_id, budget_id);
        assert_eq!(member.to_string(), "bob (editor)");
    }
}
