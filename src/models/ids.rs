//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. User identities come from outside the
//! application, so `UserId` wraps an opaque string rather than a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                s.parse()
            }

            /// Whether `s` is the short display form or the full UUID of this ID
            pub fn matches(&self, s: &str) -> bool {
                let s = s.trim();
                s == self.to_string() || s == self.0.to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(BudgetId, "bud-");
define_id!(ExpenseId, "exp-");
define_id!(MembershipId, "mem-");

/// Identity of a user as asserted by the (external) authentication layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user ID, trimming surrounding whitespace
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_id_creation() {
        let id = BudgetId::new();
        assert!(!id.as_uuid().is_nil());
    }

    #[test]
    fn test_id_display() {
        let id = ExpenseId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("exp-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_serialization() {
        let id = BudgetId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: BudgetId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse_with_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = MembershipId::parse(uuid_str).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: MembershipId = format!("mem-{}", uuid_str).parse().unwrap();
        assert_eq!(prefixed, id);
    }

    #[test]
    fn test_matches_short_and_full_forms() {
        let id = ExpenseId::new();
        assert!(id.matches(&id.to_string()));
        assert!(id.matches(&id.as_uuid().to_string()));
        assert!(!id.matches("exp-00000000"));
    }

    #[test]
    fn test_user_id_trims() {
        let user = UserId::new("  alice ");
        assert_eq!(user.as_str(), "alice");
        assert_eq!(serde_json::to_string(&user).unwrap(), "\"alice\"");
        assert!(UserId::new("   ").is_empty());
    }
}
