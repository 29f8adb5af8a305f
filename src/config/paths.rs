//! Path management for SharedBudget
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `SHARED_BUDGET_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/shared-budget` or `~/.config/shared-budget`
//! 3. Windows: `%APPDATA%\shared-budget`

use std::path::PathBuf;

use crate::error::SharedBudgetError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SHARED_BUDGET_DATA_DIR";

/// Manages all paths used by SharedBudget
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    /// Base directory for all SharedBudget data
    base_dir: PathBuf,
}

impl BudgetPaths {
    /// Create a new BudgetPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SharedBudgetError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BudgetPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/shared-budget/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/shared-budget/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    pub fn members_file(&self) -> PathBuf {
        self.data_dir().join("members.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn profiles_file(&self) -> PathBuf {
        self.data_dir().join("profiles.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SharedBudgetError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            SharedBudgetError::Io(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            SharedBudgetError::Io(format!("Failed to create data directory: {}", e))
        })?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SharedBudgetError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                SharedBudgetError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("shared-budget"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SharedBudgetError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SharedBudgetError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("shared-budget"))
}
