//! Configuration module for SharedBudget
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence (identity, active budget, advisor thresholds)

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
