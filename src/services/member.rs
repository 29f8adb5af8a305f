//! Member service
//!
//! Only admins add, re-role or remove members. Nobody may remove their own
//! membership, and a budget always keeps at least one admin.

use tracing::info;

use super::access::{authorize, load_budget, membership_of};
use crate::audit::EntityType;
use crate::error::{BudgetResult, SharedBudgetError};
use crate::live::ChangeEvent;
use crate::models::{BudgetId, Membership, Profile, Role, UserId};
use crate::storage::Storage;

/// Service for membership management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

/// A member together with their profile, if they have one
#[derive(Debug, Clone)]
pub struct MemberView {
    pub membership: Membership,
    pub profile: Option<Profile>,
}

impl MemberView {
    /// Display name, falling back to the user id
    pub fn label(&self) -> &str {
        match &self.profile {
            Some(profile) => profile.label(),
            None => self.membership.user_id.as_str(),
        }
    }
}

impl<'a> MemberService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Members of a budget with their profiles (any member)
    pub fn list(&self, actor: &UserId, budget_id: BudgetId) -> BudgetResult<Vec<MemberView>> {
        membership_of(self.storage, budget_id, actor)?;

        self.storage
            .members
            .get_by_budget(budget_id)?
            .into_iter()
            .map(|membership| {
                let profile = self.storage.profiles.get(&membership.user_id)?;
                Ok(MemberView {
                    membership,
                    profile,
                })
            })
            .collect()
    }

    /// Grant `user` a role in the budget
    pub fn add(
        &self,
        actor: &UserId,
        budget_id: BudgetId,
        user: &UserId,
        role: Role,
    ) -> BudgetResult<Membership> {
        load_budget(self.storage, budget_id)?;
        authorize(self.storage, budget_id, actor, Role::can_manage, "add members")?;

        if user.is_empty() {
            return Err(SharedBudgetError::Validation(
                "User id cannot be empty".into(),
            ));
        }

        if self.storage.members.find(budget_id, user)?.is_some() {
            return Err(SharedBudgetError::Duplicate {
                entity_type: "Member",
                identifier: user.to_string(),
            });
        }

        let membership = Membership::new(budget_id, user.clone(), role);
        self.storage.members.upsert(membership.clone())?;
        self.storage.members.save()?;

        self.storage.log_create(
            actor,
            EntityType::Membership,
            membership.id.to_string(),
            Some(membership.to_string()),
            &membership,
        )?;
        self.storage.publish(ChangeEvent::MembersChanged(budget_id))?;

        info!(budget = %budget_id, member = %user, role = %role, "Added member");
        Ok(membership)
    }

    /// Change a member's role
    pub fn change_role(
        &self,
        actor: &UserId,
        budget_id: BudgetId,
        user: &UserId,
        role: Role,
    ) -> BudgetResult<Membership> {
        authorize(self.storage, budget_id, actor, Role::can_manage, "change roles")?;

        let before = self.member(budget_id, user)?;
        if before.role == role {
            return Ok(before);
        }
        if before.role == Role::Admin {
            self.ensure_other_admin(budget_id, &before)?;
        }

        let mut membership = before.clone();
        membership.role = role;
        self.storage.members.upsert(membership.clone())?;
        self.storage.members.save()?;

        self.storage.log_update(
            actor,
            EntityType::Membership,
            membership.id.to_string(),
            Some(membership.to_string()),
            &before,
            &membership,
        )?;
        self.storage.publish(ChangeEvent::MembersChanged(budget_id))?;

        Ok(membership)
    }

    /// Remove another member from the budget
    pub fn remove(
        &self,
        actor: &UserId,
        budget_id: BudgetId,
        user: &UserId,
    ) -> BudgetResult<Membership> {
        authorize(self.storage, budget_id, actor, Role::can_manage, "remove members")?;

        if actor == user {
            return Err(SharedBudgetError::SelfRemoval);
        }

        let membership = self.member(budget_id, user)?;
        if membership.role == Role::Admin {
            self.ensure_other_admin(budget_id, &membership)?;
        }

        self.storage.members.delete(membership.id)?;
        self.storage.members.save()?;

        self.storage.log_delete(
            actor,
            EntityType::Membership,
            membership.id.to_string(),
            Some(membership.to_string()),
            &membership,
        )?;
        self.storage.publish(ChangeEvent::MembersChanged(budget_id))?;

        info!(budget = %budget_id, member = %user, "Removed member");
        Ok(membership)
    }

    fn member(&self, budget_id: BudgetId, user: &UserId) -> BudgetResult<Membership> {
        self.storage
            .members
            .find(budget_id, user)?
            .ok_or_else(|| SharedBudgetError::member_not_found(user.to_string()))
    }

    fn ensure_other_admin(&self, budget_id: BudgetId, leaving: &Membership) -> BudgetResult<()> {
        let others = self
            .storage
            .members
            .get_by_budget(budget_id)?
            .into_iter()
            .filter(|m| m.id != leaving.id && m.role == Role::Admin)
            .count();

        if others == 0 {
            return Err(SharedBudgetError::LastAdmin(budget_id.to_string()));
        }
        Ok(())
    }
}
