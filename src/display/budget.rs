//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{format_amount, Budget, Membership};
use crate::services::BudgetListing;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "")]
    active: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Income")]
    income: String,
}

/// Table of the budgets a user belongs to; the active one is starred
pub fn format_budget_list(
    listings: &[BudgetListing],
    active: Option<&Budget>,
    symbol: &str,
) -> String {
    if listings.is_empty() {
        return "No budgets yet. Create one with 'budget budget create <name>'.".to_string();
    }

    let rows = listings.iter().map(|listing| BudgetRow {
        active: if active.map(|b| b.id) == Some(listing.budget.id) {
            "*"
        } else {
            ""
        },
        id: listing.budget.id.to_string(),
        name: listing.budget.name.clone(),
        role: listing.role.to_string(),
        members: listing.member_count,
        income: format_amount(listing.budget.monthly_income, symbol),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Detail view of one budget from the point of view of a member
pub fn format_budget_details(
    budget: &Budget,
    membership: &Membership,
    member_count: usize,
    symbol: &str,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Budget: {}\n", budget.name));
    output.push_str(&format!("  ID:             {}\n", budget.id));
    output.push_str(&format!(
        "  Monthly income: {}\n",
        format_amount(budget.monthly_income, symbol)
    ));
    output.push_str(&format!("  Your role:      {}\n", membership.role));
    output.push_str(&format!("  Members:        {}\n", member_count));
    output.push_str(&format!("  Created by:     {}\n", budget.created_by));
    output.push_str(&format!(
        "  Created:        {}\n",
        budget.created_at.format("%Y-%m-%d")
    ));
    output
}
