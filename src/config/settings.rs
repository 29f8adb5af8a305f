//! User settings for SharedBudget
//!
//! Persists the locally asserted identity, the active budget, display
//! preferences and the advisor thresholds.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::SharedBudgetError;
use crate::models::{BudgetId, UserId};
use crate::reports::AdvisorThresholds;

/// User settings for SharedBudget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The user commands act as (set by `user login`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user: Option<UserId>,

    /// The budget commands operate on by default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_budget: Option<BudgetId>,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Thresholds used by the savings advisor
    #[serde(default)]
    pub thresholds: AdvisorThresholds,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            current_user: None,
            active_budget: None,
            currency_symbol: default_currency(),
            thresholds: AdvisorThresholds::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, SharedBudgetError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
            SharedBudgetError::Io(format!("Failed to read settings file: {}", e))
        })?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            SharedBudgetError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings
            .thresholds
            .validate()
            .map_err(SharedBudgetError::Config)?;

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), SharedBudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SharedBudgetError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            SharedBudgetError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
