//! SharedBudget - shared household budgeting from the terminal
//!
//! Several people keep one budget together: a monthly income and a list of
//! categorized expenses. Members hold a role (admin, editor, viewer) that
//! decides what they may change. For every budget the application derives
//! per-category totals and savings advice.
//!
//! # Architecture
//!
//! - `reports`: category totals, the savings advisor and the budget summary
//!   (pure computation, no I/O)
//! - `models`: budgets, expenses, categories, memberships, profiles
//! - `storage`: JSON file repositories
//! - `services`: role checks and writes on top of storage
//! - `live`: change events and live budget snapshots
//! - `audit`: append-only change log
//! - `config`: paths and settings
//! - `display`, `export`, `cli`: terminal output, file export, commands
//!
//! # Example
//!
//! ```rust,ignore
//! use shared_budget::reports::{AdvisorThresholds, BudgetSummary};
//!
//! let summary = BudgetSummary::compute(5000.0, &expenses, &AdvisorThresholds::default());
//! println!("{}", summary.format_terminal("$"));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod live;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetResult, SharedBudgetError};
