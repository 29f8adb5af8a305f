//! Expense display formatting

use super::report::truncate;
use crate::models::{format_amount, ExpenseRecord};

/// Format expenses as a table with a total row
pub fn format_expense_list(expenses: &[ExpenseRecord], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded yet.".to_string();
    }

    let name_width = expenses
        .iter()
        .map(|e| e.name.chars().count().min(30))
        .max()
        .unwrap_or(11)
        .max(11);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<15}  {:<name_width$}  {:>12}\n",
        "ID",
        "Date",
        "Category",
        "Description",
        "Amount",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<15}  {:-<name_width$}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for expense in expenses {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<15}  {:<name_width$}  {:>12}\n",
            expense.id.to_string(),
            expense.created_at.format("%Y-%m-%d").to_string(),
            truncate(&expense.category.to_string(), 15),
            truncate(&expense.name, 30),
            format_amount(expense.amount, symbol),
            name_width = name_width,
        ));
    }

    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<15}  {:<name_width$}  {:>12}\n",
        "",
        "",
        "",
        "TOTAL",
        format_amount(total, symbol),
        name_width = name_width,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, CategoryLabel, ExpenseCategory};

    #[test]
    fn test_empty() {
        assert_eq!(format_expense_list(&[], "$"), "No expenses recorded yet.");
    }

    #[test]
    fn test_rows_and_total() {
        let budget_id = BudgetId::new();
        let mut misc = ExpenseRecord::new(budget_id, ExpenseCategory::Personal, "Odds", 10.0);
        misc.category = CategoryLabel::Unrecognized("misc".into());
        let expenses = vec![
            ExpenseRecord::new(budget_id, ExpenseCategory::Housing, "Rent", 1600.0),
            misc,
        ];

        let output = format_expense_list(&expenses, "$");
        assert!(output.contains("Housing"));
        assert!(output.contains("$1600.00"));
        assert!(output.contains("misc (unreco..."));
        assert!(output.contains("$1610.00"));
    }
}
