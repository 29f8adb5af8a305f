//! Savings advice
//!
//! Turns a monthly income and the category totals into a savings rate,
//! income ratios for the benchmarked categories, and a list of tips and
//! warnings.
//!
//! The savings rules are an ordered decision list: the first rule that applies
//! produces the single savings message, so exactly one of
//! [`Tip::HighSavings`], [`Tip::AdequateSavings`], [`Warning::OverSpending`]
//! or [`Tip::AimForSavings`] is emitted per run. The category benchmark rules
//! run afterwards and are independent of each other.

use serde::{Deserialize, Serialize};

use super::totals::CategoryTotals;
use crate::models::ExpenseCategory;

/// Thresholds (percentages) used by the advisory rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorThresholds {
    /// Savings rate strictly above this earns [`Tip::HighSavings`]
    pub savings_high: f64,
    /// Savings rate at or above this earns [`Tip::AdequateSavings`]
    pub savings_adequate: f64,
    /// Spending rate strictly above this raises [`Warning::OverSpending`]
    pub spending_ceiling: f64,
    /// Housing share of income strictly above this raises a warning
    pub housing: f64,
    /// Transportation share of income strictly above this raises a warning
    pub transportation: f64,
    /// Entertainment share of income strictly above this raises a warning
    pub entertainment: f64,
}

impl Default for AdvisorThresholds {
    fn default() -> Self {
        Self {
            savings_high: 20.0,
            savings_adequate: 10.0,
            spending_ceiling: 90.0,
            housing: 30.0,
            transportation: 20.0,
            entertainment: 10.0,
        }
    }
}

impl AdvisorThresholds {
    /// Check that every threshold is a percentage and the savings tiers are ordered
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("savings_high", self.savings_high),
            ("savings_adequate", self.savings_adequate),
            ("spending_ceiling", self.spending_ceiling),
            ("housing", self.housing),
            ("transportation", self.transportation),
            ("entertainment", self.entertainment),
        ];
        for (name, value) in fields {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(format!(
                    "Threshold '{}' must be between 0 and 100, got {}",
                    name, value
                ));
            }
        }
        if self.savings_adequate > self.savings_high {
            return Err(format!(
                "savings_adequate ({}) cannot exceed savings_high ({})",
                self.savings_adequate, self.savings_high
            ));
        }
        Ok(())
    }

    /// Threshold for a benchmarked category
    pub fn for_category(&self, category: ExpenseCategory) -> Option<f64> {
        match category {
            ExpenseCategory::Housing => Some(self.housing),
            ExpenseCategory::Transportation => Some(self.transportation),
            ExpenseCategory::Entertainment => Some(self.entertainment),
            _ => None,
        }
    }
}

/// Positive savings feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tip {
    HighSavings,
    AdequateSavings,
    AimForSavings,
}

impl Tip {
    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            Self::HighSavings => "high_savings",
            Self::AdequateSavings => "adequate_savings",
            Self::AimForSavings => "aim_for_savings",
        }
    }

    /// Human-readable message for the given thresholds
    pub fn message(&self, t: &AdvisorThresholds) -> String {
        match self {
            Self::HighSavings => format!(
                "Great job! You're saving more than {}% of your income.",
                pct(t.savings_high)
            ),
            Self::AdequateSavings => format!(
                "You're on the right track! Try to increase your savings rate to {}% or more.",
                pct(t.savings_high)
            ),
            Self::AimForSavings => format!(
                "Try to aim for at least {}-{}% of your income going into savings.",
                pct(t.savings_adequate),
                pct(t.savings_high)
            ),
        }
    }
}

/// Spending alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    OverSpending,
    HousingAboveBenchmark,
    TransportationAboveBenchmark,
    EntertainmentAboveBenchmark,
}

impl Warning {
    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            Self::OverSpending => "over_spending",
            Self::HousingAboveBenchmark => "housing_above_benchmark",
            Self::TransportationAboveBenchmark => "transportation_above_benchmark",
            Self::EntertainmentAboveBenchmark => "entertainment_above_benchmark",
        }
    }

    /// Human-readable message for the given thresholds
    pub fn message(&self, t: &AdvisorThresholds) -> String {
        match self {
            Self::OverSpending => format!(
                "You're spending over {}% of your income. Consider reducing expenses in one or two categories.",
                pct(t.spending_ceiling)
            ),
            Self::HousingAboveBenchmark => format!(
                "Your housing costs are above the typical {}% benchmark.",
                pct(t.housing)
            ),
            Self::TransportationAboveBenchmark => format!(
                "Transportation costs exceed the recommended {}-{}% of income.",
                pct((t.transportation - 5.0).max(0.0)),
                pct(t.transportation)
            ),
            Self::EntertainmentAboveBenchmark => format!(
                "Entertainment spending is above the recommended {}% of income.",
                pct(t.entertainment)
            ),
        }
    }
}

/// Income ratios of the benchmarked categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryRatios {
    pub housing: f64,
    pub transportation: f64,
    pub entertainment: f64,
}

/// Result of one advisor run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub monthly_income: f64,
    pub total_expenses: f64,
    pub net_leftover: f64,
    pub savings_rate: f64,
    pub spending_rate: f64,
    pub category_ratios: CategoryRatios,
    pub tips: Vec<Tip>,
    pub warnings: Vec<Warning>,
}

impl Advice {
    /// Run the advisory rules
    pub fn evaluate(
        monthly_income: f64,
        totals: &CategoryTotals,
        thresholds: &AdvisorThresholds,
    ) -> Self {
        let total_expenses = totals.grand_total();
        let net_leftover = monthly_income - total_expenses;
        let savings_rate = if monthly_income > 0.0 {
            (monthly_income - total_expenses) / monthly_income * 100.0
        } else {
            0.0
        };
        let spending_rate = 100.0 - savings_rate;

        let ratio = |category| {
            if monthly_income > 0.0 {
                totals.category_total(category) / monthly_income * 100.0
            } else {
                0.0
            }
        };
        let category_ratios = CategoryRatios {
            housing: ratio(ExpenseCategory::Housing),
            transportation: ratio(ExpenseCategory::Transportation),
            entertainment: ratio(ExpenseCategory::Entertainment),
        };

        let mut tips = Vec::new();
        let mut warnings = Vec::new();

        match savings_message(savings_rate, spending_rate, thresholds) {
            Message::Tip(tip) => tips.push(tip),
            Message::Warning(warning) => warnings.push(warning),
        }

        for (ratio, limit, warning) in [
            (
                category_ratios.housing,
                thresholds.housing,
                Warning::HousingAboveBenchmark,
            ),
            (
                category_ratios.transportation,
                thresholds.transportation,
                Warning::TransportationAboveBenchmark,
            ),
            (
                category_ratios.entertainment,
                thresholds.entertainment,
                Warning::EntertainmentAboveBenchmark,
            ),
        ] {
            if ratio > limit {
                warnings.push(warning);
            }
        }

        Self {
            monthly_income,
            total_expenses,
            net_leftover,
            savings_rate,
            spending_rate,
            category_ratios,
            tips,
            warnings,
        }
    }

    /// Tip messages, rendered
    pub fn tip_messages(&self, thresholds: &AdvisorThresholds) -> Vec<String> {
        self.tips.iter().map(|t| t.message(thresholds)).collect()
    }

    /// Warning messages, rendered
    pub fn warning_messages(&self, thresholds: &AdvisorThresholds) -> Vec<String> {
        self.warnings.iter().map(|w| w.message(thresholds)).collect()
    }
}

/// Either kind of advisory message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Tip(Tip),
    Warning(Warning),
}

/// One entry of the savings decision list
struct SavingsRule {
    applies: fn(savings: f64, spending: f64, t: &AdvisorThresholds) -> bool,
    message: Message,
}

/// Savings rules in priority order; the last one always applies
const SAVINGS_RULES: [SavingsRule; 4] = [
    SavingsRule {
        applies: saves_a_lot,
        message: Message::Tip(Tip::HighSavings),
    },
    SavingsRule {
        applies: saves_enough,
        message: Message::Tip(Tip::AdequateSavings),
    },
    SavingsRule {
        applies: spends_too_much,
        message: Message::Warning(Warning::OverSpending),
    },
    SavingsRule {
        applies: always,
        message: Message::Tip(Tip::AimForSavings),
    },
];

fn saves_a_lot(savings: f64, _: f64, t: &AdvisorThresholds) -> bool {
    savings > t.savings_high
}

fn saves_enough(savings: f64, _: f64, t: &AdvisorThresholds) -> bool {
    savings >= t.savings_adequate
}

fn spends_too_much(_: f64, spending: f64, t: &AdvisorThresholds) -> bool {
    spending > t.spending_ceiling
}

fn always(_: f64, _: f64, _: &AdvisorThresholds) -> bool {
    true
}

/// Pick the single savings message (first matching rule wins)
pub fn savings_message(savings_rate: f64, spending_rate: f64, t: &AdvisorThresholds) -> Message {
    SAVINGS_RULES
        .iter()
        .find(|rule| (rule.applies)(savings_rate, spending_rate, t))
        .map(|rule| rule.message)
        .unwrap_or(Message::Tip(Tip::AimForSavings))
}

/// The general benchmarks always shown alongside the advice
pub fn general_guidance(t: &AdvisorThresholds) -> Vec<String> {
    vec![
        format!(
            "Housing should ideally be {}-{}% of your income",
            pct((t.housing - 5.0).max(0.0)),
            pct(t.housing)
        ),
        format!(
            "Transportation costs should stay under {}-{}%",
            pct((t.transportation - 5.0).max(0.0)),
            pct(t.transportation)
        ),
        format!(
            "Entertainment should be limited to {}-{}%",
            pct((t.entertainment - 5.0).max(0.0)),
            pct(t.entertainment)
        ),
        format!(
            "Aim to save at least {}% of your monthly income",
            pct(t.savings_high)
        ),
    ]
}

fn pct(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
