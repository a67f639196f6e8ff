//! Transaction model
//!
//! A transaction is a dated money movement. The amount is a magnitude; the
//! kind decides whether it counts as income or spending.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{category_label, CategoryRef};
use super::ids::{CategoryId, TransactionId};
use super::money::Money;
use super::period::DateRange;

/// Kind of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Expense,
    /// Money moved between the user's own accounts; never income or spending
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::Transfer => "TRANSFER",
        }
    }

    /// Parse the backend's `transaction_type`, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "INCOME" => Some(Self::Income),
            "EXPENSE" => Some(Self::Expense),
            "TRANSFER" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount; the sign is not meaningful, `kind` is
    pub amount: Money,

    /// Income, expense or transfer
    pub kind: TransactionKind,

    /// Category, if one was assigned
    pub category: Option<CategoryRef>,

    /// Free-text description
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Create a new transaction without a category
    pub fn new(id: TransactionId, date: NaiveDate, amount: Money, kind: TransactionKind) -> Self {
        Self {
            id,
            date,
            amount,
            kind,
            category: None,
            description: String::new(),
        }
    }

    /// Create an expense
    pub fn expense(id: TransactionId, date: NaiveDate, amount: Money) -> Self {
        Self::new(id, date, amount, TransactionKind::Expense)
    }

    /// Create an income
    pub fn income(id: TransactionId, date: NaiveDate, amount: Money) -> Self {
        Self::new(id, date, amount, TransactionKind::Income)
    }

    /// Builder-style category assignment
    pub fn with_category(mut self, category: CategoryRef) -> Self {
        self.category = Some(category);
        self
    }

    /// Builder-style description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The amount as a non-negative magnitude
    pub fn magnitude(&self) -> Money {
        self.amount.abs()
    }

    /// The category id, if any
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|c| c.id)
    }

    /// Check whether the transaction falls within `range` (inclusive)
    pub fn is_within(&self, range: &DateRange) -> bool {
        range.contains(self.date)
    }

    /// Grouping label: category name, "Category <id>", or "Uncategorized"
    pub fn category_label(&self) -> String {
        category_label(self.category.as_ref())
    }
}
