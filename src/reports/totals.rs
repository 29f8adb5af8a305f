//! Category totals
//!
//! Reduces a list of expense records into one sum per fixed category and a
//! grand total. Records with an unrecognized category are left out of every
//! total and reported back in [`CategoryTotals::skipped`].

use serde::Serialize;
use tracing::warn;

use crate::models::{ExpenseCategory, ExpenseId, ExpenseRecord};

/// An expense that was excluded from the totals because its category is
/// not one of the fixed six
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedExpense {
    pub id: ExpenseId,
    pub label: String,
    pub amount: f64,
}

/// Per-category sums of a set of expenses
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    totals: [f64; ExpenseCategory::COUNT],
    counts: [usize; ExpenseCategory::COUNT],
    /// Records left out of all totals
    pub skipped: Vec<SkippedExpense>,
}

impl CategoryTotals {
    /// Sum the expenses by category
    pub fn aggregate<'a, I>(expenses: I) -> Self
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut result = Self::default();

        for expense in expenses {
            match expense.category.known() {
                Some(category) => {
                    result.totals[category.index()] += expense.amount;
                    result.counts[category.index()] += 1;
                }
                None => {
                    warn!(
                        expense = %expense.id,
                        category = expense.category.as_str(),
                        "Skipping expense with unrecognized category"
                    );
                    result.skipped.push(SkippedExpense {
                        id: expense.id,
                        label: expense.category.as_str().to_string(),
                        amount: expense.amount,
                    });
                }
            }
        }

        result
    }

    /// Build totals directly from per-category amounts
    pub fn from_amounts(amounts: &[(ExpenseCategory, f64)]) -> Self {
        let mut result = Self::default();
        for (category, amount) in amounts {
            result.totals[category.index()] += amount;
            result.counts[category.index()] += 1;
        }
        result
    }

    /// Total for one category (0 if it has no expenses)
    pub fn category_total(&self, category: ExpenseCategory) -> f64 {
        self.totals[category.index()]
    }

    /// Number of expenses counted in a category
    pub fn count(&self, category: ExpenseCategory) -> usize {
        self.counts[category.index()]
    }

    /// Sum of all six category totals
    pub fn grand_total(&self) -> f64 {
        self.totals.iter().sum()
    }

    /// Number of expenses counted in any category
    pub fn total_count(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Every category with its total, in display order
    pub fn iter(&self) -> impl Iterator<Item = (ExpenseCategory, f64)> + '_ {
        ExpenseCategory::all()
            .iter()
            .map(move |c| (*c, self.category_total(*c)))
    }

    /// Categories with a positive total, in display order
    pub fn non_zero(&self) -> Vec<(ExpenseCategory, f64)> {
        self.iter().filter(|(_, total)| *total > 0.0).collect()
    }

    /// Share of all expenses spent in a category, as a percentage
    pub fn share_of_expenses(&self, category: ExpenseCategory) -> f64 {
        let total = self.grand_total();
        if total > 0.0 {
            self.category_total(category) / total * 100.0
        } else {
            0.0
        }
    }

    /// Grand total as a percentage of `income` (0 when income is not positive)
    pub fn percent_of_income(&self, income: f64) -> f64 {
        if income > 0.0 {
            self.grand_total() / income * 100.0
        } else {
            0.0
        }
    }

    /// Sum of the amounts that were skipped
    pub fn skipped_amount(&self) -> f64 {
        self.skipped.iter().map(|s| s.amount).sum()
    }

    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}
