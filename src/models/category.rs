//! Expense categories
//!
//! The category set is closed: every expense belongs to one of six fixed
//! categories. Labels read from storage that do not match any of them are kept
//! verbatim as [`CategoryLabel::Unrecognized`] so the reporting layer can skip
//! them explicitly instead of losing them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six fixed expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Housing,
    Groceries,
    Transportation,
    Health,
    Personal,
    Entertainment,
}

impl ExpenseCategory {
    /// Number of categories
    pub const COUNT: usize = 6;

    /// Get all categories in display order
    pub fn all() -> &'static [Self; Self::COUNT] {
        &[
            Self::Housing,
            Self::Groceries,
            Self::Transportation,
            Self::Health,
            Self::Personal,
            Self::Entertainment,
        ]
    }

    /// Position in [`ExpenseCategory::all`]
    pub const fn index(self) -> usize {
        match self {
            Self::Housing => 0,
            Self::Groceries => 1,
            Self::Transportation => 2,
            Self::Health => 3,
            Self::Personal => 4,
            Self::Entertainment => 5,
        }
    }

    /// Storage key (lowercase)
    pub fn key(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Groceries => "groceries",
            Self::Transportation => "transportation",
            Self::Health => "health",
            Self::Personal => "personal",
            Self::Entertainment => "entertainment",
        }
    }

    /// The category whose storage key is exactly `key`
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.key() == key)
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Groceries => "Groceries",
            Self::Transportation => "Transportation",
            Self::Health => "Health",
            Self::Personal => "Personal",
            Self::Entertainment => "Entertainment",
        }
    }

    /// Section title used when listing expenses
    pub fn title(&self) -> &'static str {
        match self {
            Self::Housing => "Housing Expenses",
            Self::Groceries => "Groceries",
            Self::Transportation => "Transportation",
            Self::Health => "Health & Insurance",
            Self::Personal => "Personal & Lifestyle",
            Self::Entertainment => "Entertainment",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ExpenseCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(&s.trim().to_lowercase()).ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// The category label of a stored expense
///
/// Serialized as a plain string. Only an exact lowercase key is recognized;
/// anything else, including case or whitespace variants, is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryLabel {
    Known(ExpenseCategory),
    Unrecognized(String),
}

impl CategoryLabel {
    /// The fixed category, if this label is recognized
    pub fn known(&self) -> Option<ExpenseCategory> {
        match self {
            Self::Known(category) => Some(*category),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// The raw storage label
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(category) => category.key(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<ExpenseCategory> for CategoryLabel {
    fn from(category: ExpenseCategory) -> Self {
        Self::Known(category)
    }
}

impl From<String> for CategoryLabel {
    fn from(raw: String) -> Self {
        match ExpenseCategory::from_key(&raw) {
            Some(category) => Self::Known(category),
            None => Self::Unrecognized(raw),
        }
    }
}

impl From<CategoryLabel> for String {
    fn from(label: CategoryLabel) -> Self {
        match label {
            CategoryLabel::Known(category) => category.key().to_string(),
            CategoryLabel::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(category) => write!(f, "{}", category),
            Self::Unrecognized(raw) => write!(f, "{} (unrecognized)", raw),
        }
    }
}

/// Error returned when a label is not one of the six categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<_> = ExpenseCategory::all().iter().map(|c| c.key()).collect();
        write!(
            f,
            "Unknown category '{}' (expected one of: {})",
            self.0,
            valid.join(", ")
        )
    }
}

impl std::error::Error for CategoryParseError {}
