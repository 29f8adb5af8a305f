//! YAML export of a single budget

use std::io::Write;

use super::json::BudgetExport;
use crate::error::{BudgetResult, SharedBudgetError};

/// Write the budget export as YAML with a short header comment
pub fn export_budget_yaml<W: Write>(export: &BudgetExport, writer: &mut W) -> BudgetResult<()> {
    let export_err = |e: std::io::Error| SharedBudgetError::Export(e.to_string());

    writeln!(writer, "# SharedBudget export: {}", export.budget.name).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, export).map_err(|e| SharedBudgetError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::models::UserId;
    use crate::reports::AdvisorThresholds;
    use crate::services::BudgetService;
    use crate::storage::Storage;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let alice = UserId::new("alice");
        let budget = BudgetService::new(&storage).create(&alice, "Family").unwrap();

        let export =
            BudgetExport::collect(&storage, &alice, budget.id, &AdvisorThresholds::default())
                .unwrap();
        let mut buffer = Vec::new();
        export_budget_yaml(&export, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# SharedBudget export: Family"));
        assert!(text.contains("schema_version:"));
        assert!(text.contains("1.0.0"));
        assert!(text.contains("name: Family"));
    }
}
