//! Member display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::UserId;
use crate::services::MemberView;

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Member")]
    name: String,
    #[tabled(rename = "User ID")]
    user_id: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Joined")]
    joined: String,
}

/// Table of a budget's members; `current` is marked "(you)"
pub fn format_member_list(members: &[MemberView], current: &UserId) -> String {
    if members.is_empty() {
        return "No members found.".to_string();
    }

    let rows = members.iter().map(|member| {
        let mut name = member.label().to_string();
        if &member.membership.user_id == current {
            name.push_str(" (you)");
        }
        MemberRow {
            name,
            user_id: member.membership.user_id.to_string(),
            role: member.membership.role.to_string(),
            joined: member.membership.created_at.format("%Y-%m-%d").to_string(),
        }
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, Membership, Profile, Role};

    #[test]
    fn test_member_list() {
        let budget_id = BudgetId::new();
        let alice = UserId::new("alice");
        let members = vec![
            MemberView {
                membership: Membership::new(budget_id, alice.clone(), Role::Admin),
                profile: Some(Profile::new(alice.clone(), Some("Alice A.".into()))),
            },
            MemberView {
                membership: Membership::new(budget_id, UserId::new("bob"), Role::Viewer),
                profile: None,
            },
        ];

        let output = format_member_list(&members, &alice);
        assert!(output.contains("Alice A. (you)"));
        assert!(output.contains("bob"));
        assert!(output.contains("viewer"));
    }
}
