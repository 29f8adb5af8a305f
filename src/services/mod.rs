//! Service layer for SharedBudget
//!
//! Services sit on top of the storage layer. Each write follows the same
//! order: check the actor's role, validate, persist, append to the audit
//! log, then publish a change event.

mod access;
pub mod budget;
pub mod expense;
pub mod member;
pub mod profile;

pub use budget::{BudgetListing, BudgetService};
pub use expense::ExpenseService;
pub use member::{MemberService, MemberView};
pub use profile::ProfileService;
