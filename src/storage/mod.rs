//! Storage layer for SharedBudget
//!
//! JSON file repositories with atomic writes, plus the audit log and the
//! change feed every committed write goes through.

pub mod budgets;
pub mod expenses;
pub mod file_io;
pub mod members;
pub mod profiles;

pub use budgets::BudgetRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use members::MemberRepository;
pub use profiles::ProfileRepository;

use serde::Serialize;
use tracing::{debug, info};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::BudgetPaths;
use crate::error::SharedBudgetError;
use crate::live::{ChangeEvent, ChangeFeed};
use crate::models::UserId;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BudgetPaths,
    pub budgets: BudgetRepository,
    pub members: MemberRepository,
    pub expenses: ExpenseRepository,
    pub profiles: ProfileRepository,
    audit: AuditLogger,
    feed: ChangeFeed,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetPaths) -> Result<Self, SharedBudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            budgets: BudgetRepository::new(paths.budgets_file()),
            members: MemberRepository::new(paths.members_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            profiles: ProfileRepository::new(paths.profiles_file()),
            audit: AuditLogger::new(paths.audit_log()),
            feed: ChangeFeed::new(),
            paths,
        })
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SharedBudgetError> {
        self.budgets.load()?;
        self.members.load()?;
        self.expenses.load()?;
        self.profiles.load()?;
        debug!(
            budgets = self.budgets.count()?,
            expenses = self.expenses.count()?,
            "Loaded data from {}",
            self.paths.data_dir().display()
        );
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SharedBudgetError> {
        self.budgets.save()?;
        self.members.save()?;
        self.expenses.save()?;
        self.profiles.save()?;
        Ok(())
    }

    /// The in-process change feed
    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Publish a committed change to subscribers of its budget
    pub fn publish(&self, event: ChangeEvent) -> Result<(), SharedBudgetError> {
        self.feed.publish(&event)?;
        Ok(())
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        actor: &UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), SharedBudgetError> {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity).by(Some(actor));
        self.write_audit(&entry)
    }

    /// Record an update in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        actor: &UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), SharedBudgetError> {
        let entry = AuditEntry::update(entity_type, entity_id, entity_name, before, after)
            .by(Some(actor));
        self.write_audit(&entry)
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        actor: &UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), SharedBudgetError> {
        let entry = AuditEntry::delete(entity_type, entity_id, entity_name, entity).by(Some(actor));
        self.write_audit(&entry)
    }

    fn write_audit(&self, entry: &AuditEntry) -> Result<(), SharedBudgetError> {
        info!(
            operation = %entry.operation,
            entity = %entry.entity_type,
            id = %entry.entity_id,
            "Recorded change"
        );
        self.audit.log(entry)
    }
}
