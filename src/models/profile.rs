//! User profile model
//!
//! Profiles carry the optional display name shown next to a member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// Display information for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(user_id: UserId, display_name: Option<String>) -> Self {
        Self {
            user_id,
            display_name: display_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            updated_at: Utc::now(),
        }
    }

    /// Display name, falling back to the user id
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.user_id.as_str())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
