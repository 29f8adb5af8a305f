//! Audit logging for SharedBudget
//!
//! Every create, update and delete made through the services is appended to
//! a line-delimited JSON log (`audit.log`) together with the acting user
//! and before/after snapshots of the entity.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
