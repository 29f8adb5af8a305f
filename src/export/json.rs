//! JSON export of a single budget

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{BudgetResult, SharedBudgetError};
use crate::models::{Budget, BudgetId, ExpenseRecord, Membership, UserId};
use crate::reports::{AdvisorThresholds, BudgetSummary};
use crate::services::{BudgetService, ExpenseService, MemberService};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything known about one budget at export time
#[derive(Debug, Clone, Serialize)]
pub struct BudgetExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    pub budget: Budget,
    pub members: Vec<Membership>,
    pub expenses: Vec<ExpenseRecord>,
    pub summary: BudgetSummary,
}

impl BudgetExport {
    /// Collect the export as seen by `actor` (any member may export)
    pub fn collect(
        storage: &Storage,
        actor: &UserId,
        budget_id: BudgetId,
        thresholds: &AdvisorThresholds,
    ) -> BudgetResult<Self> {
        let (budget, _) = BudgetService::new(storage).open(actor, budget_id)?;
        let members = MemberService::new(storage)
            .list(actor, budget_id)?
            .into_iter()
            .map(|m| m.membership)
            .collect();
        let expenses = ExpenseService::new(storage).list(actor, budget_id, None)?;
        let summary = BudgetSummary::compute(budget.monthly_income, &expenses, thresholds);

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            budget,
            members,
            expenses,
            summary,
        })
    }
}

/// Write the budget export as pretty-printed JSON
pub fn export_budget_json<W: Write>(export: &BudgetExport, writer: &mut W) -> BudgetResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| SharedBudgetError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SharedBudgetError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::models::ExpenseCategory;
    use tempfile::TempDir;

    fn populated() -> (TempDir, Storage, BudgetId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let alice = UserId::new("alice");
        let budget = BudgetService::new(&storage).create(&alice, "Family").unwrap();
        BudgetService::new(&storage)
            .set_income(&alice, budget.id, 5000.0)
            .unwrap();
        ExpenseService::new(&storage)
            .add(&alice, budget.id, ExpenseCategory::Housing, "Rent", 1600.0)
            .unwrap();

        (temp_dir, storage, budget.id)
    }

    #[test]
    fn test_json_export() {
        let (_temp_dir, storage, budget_id) = populated();
        let export = BudgetExport::collect(
            &storage,
            &UserId::new("alice"),
            budget_id,
            &AdvisorThresholds::default(),
        )
        .unwrap();

        let mut buffer = Vec::new();
        export_budget_json(&export, &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["budget"]["name"], "Family");
        assert_eq!(value["members"].as_array().unwrap().len(), 1);
        assert_eq!(value["expenses"][0]["category"], "housing");
        assert_eq!(value["summary"]["advice"]["net_leftover"], 3400.0);
    }

    #[test]
    fn test_outsider_cannot_export() {
        let (_temp_dir, storage, budget_id) = populated();
        let result = BudgetExport::collect(
            &storage,
            &UserId::new("mallory"),
            budget_id,
            &AdvisorThresholds::default(),
        );
        assert!(result.unwrap_err().is_permission());
    }
}
