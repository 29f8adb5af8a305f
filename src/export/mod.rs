//! Export module for SharedBudget
//!
//! Exports one budget at a time:
//! - JSON: machine-readable export of the budget, members, expenses and summary
//! - YAML: the same document, human-readable
//! - CSV: expense rows (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_budget_json, BudgetExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_budget_yaml;
