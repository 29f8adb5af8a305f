//! Budget summary
//!
//! Runs category totals and the advisor over one snapshot of a budget and
//! formats the result for the terminal or CSV.

use serde::Serialize;
use std::io::Write;

use super::advice::{general_guidance, Advice, AdvisorThresholds};
use super::totals::CategoryTotals;
use crate::display::report::{format_bar, format_percentage, separator};
use crate::error::{BudgetResult, SharedBudgetError};
use crate::models::{format_amount, format_signed, ExpenseRecord};

/// Everything shown for a budget at one point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub monthly_income: f64,
    pub totals: CategoryTotals,
    pub advice: Advice,
    /// Share of income spent (0 when there is no income)
    pub percent_spent: f64,
    pub thresholds: AdvisorThresholds,
}

impl BudgetSummary {
    /// Compute the summary of one income/expense snapshot
    pub fn compute(
        monthly_income: f64,
        expenses: &[ExpenseRecord],
        thresholds: &AdvisorThresholds,
    ) -> Self {
        let totals = CategoryTotals::aggregate(expenses);
        let advice = Advice::evaluate(monthly_income, &totals, thresholds);
        let percent_spent = totals.percent_of_income(monthly_income);

        Self {
            monthly_income,
            totals,
            advice,
            percent_spent,
            thresholds: *thresholds,
        }
    }

    pub fn total_expenses(&self) -> f64 {
        self.advice.total_expenses
    }

    pub fn net_leftover(&self) -> f64 {
        self.advice.net_leftover
    }

    /// Financial summary panel: income, expenses, leftover
    pub fn format_overview(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Financial Summary\n");
        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>14}\n",
            "Total Income",
            format_amount(self.monthly_income, symbol)
        ));
        output.push_str(&format!(
            "{:<22} {:>14}  ({:.1}% of income)\n",
            "Total Expenses",
            format_amount(self.total_expenses(), symbol),
            self.percent_spent
        ));
        output.push_str(&format!(
            "{:<22} {:>14}\n",
            "Net Monthly Leftover",
            format_signed(self.net_leftover(), symbol)
        ));

        if self.totals.has_skipped() {
            output.push_str(&format!(
                "\nNote: {} expense(s) totalling {} have an unrecognized category and are not counted.\n",
                self.totals.skipped.len(),
                format_amount(self.totals.skipped_amount(), symbol)
            ));
        }

        output
    }

    /// Expense distribution by category
    pub fn format_distribution(&self, symbol: &str) -> String {
        let entries = self.totals.non_zero();
        if entries.is_empty() {
            return "No expenses recorded yet.\n".to_string();
        }

        let max = entries.iter().map(|(_, t)| *t).fold(0.0, f64::max);
        let mut output = String::new();
        output.push_str("Expense Distribution\n");
        output.push_str(&separator(60));
        output.push('\n');

        for (category, total) in entries {
            let flag = match self.thresholds.for_category(category) {
                Some(limit) if self.monthly_income > 0.0 && total / self.monthly_income * 100.0 > limit => {
                    format!("  ⚠ above {}% of income", limit)
                }
                _ => String::new(),
            };
            output.push_str(&format!(
                "{:<20} {:>12} {:>6}  {}{}\n",
                category.name(),
                format_amount(total, symbol),
                format_percentage(self.totals.share_of_expenses(category)),
                format_bar(total, max, 20),
                flag
            ));
        }

        output
    }

    /// Savings insights, alerts and the general benchmarks
    pub fn format_insights(&self) -> String {
        let t = &self.thresholds;
        let mut output = String::new();

        output.push_str(&format!(
            "Savings rate: {:.1}%   Spending rate: {:.1}%\n",
            self.advice.savings_rate, self.advice.spending_rate
        ));

        let tips = self.advice.tip_messages(t);
        if !tips.is_empty() {
            output.push_str("\nSavings Insights\n");
            for tip in tips {
                output.push_str(&format!("  ✓ {}\n", tip));
            }
        }

        let warnings = self.advice.warning_messages(t);
        if !warnings.is_empty() {
            output.push_str("\nBudget Alerts\n");
            for warning in warnings {
                output.push_str(&format!("  ⚠ {}\n", warning));
            }
        }

        output.push_str("\nBudget Tips\n");
        for line in general_guidance(t) {
            output.push_str(&format!("  • {}\n", line));
        }

        output
    }

    /// Full terminal report
    pub fn format_terminal(&self, symbol: &str) -> String {
        format!(
            "{}\n{}\n{}",
            self.format_overview(symbol),
            self.format_distribution(symbol),
            self.format_insights()
        )
    }

    /// Export per-category rows and the headline figures as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);
        let export_err = |e: csv::Error| SharedBudgetError::Export(e.to_string());

        csv.write_record(["Category", "Amount", "Count", "Share of Expenses", "Share of Income"])
            .map_err(export_err)?;

        for (category, total) in self.totals.iter() {
            let of_income = if self.monthly_income > 0.0 {
                total / self.monthly_income * 100.0
            } else {
                0.0
            };
            csv.write_record([
                category.name().to_string(),
                format!("{:.2}", total),
                self.totals.count(category).to_string(),
                format!("{:.2}", self.totals.share_of_expenses(category)),
                format!("{:.2}", of_income),
            ])
            .map_err(export_err)?;
        }

        for (label, value) in [
            ("TOTAL EXPENSES", self.total_expenses()),
            ("MONTHLY INCOME", self.monthly_income),
            ("NET LEFTOVER", self.net_leftover()),
            ("SAVINGS RATE", self.advice.savings_rate),
        ] {
            csv.write_record([label.to_string(), format!("{:.2}", value)])
                .map_err(export_err)?;
        }

        csv.flush()
            .map_err(|e| SharedBudgetError::Export(e.to_string()))?;
        Ok(())
    }
}
