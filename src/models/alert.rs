//! Budget alert definitions
//!
//! Users can attach threshold alerts to a budget's category allocation,
//! either as a percentage of the allocation or as a fixed amount spent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AlertId, BudgetId, CategoryId};

/// How an alert threshold is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    /// Threshold is a percentage of the allocation (e.g. 80)
    Percentage,
    /// Threshold is an amount spent
    Amount,
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage => write!(f, "Percentage"),
            Self::Amount => write!(f, "Amount"),
        }
    }
}

/// A threshold alert on one category allocation of one budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub id: AlertId,
    pub budget_id: BudgetId,
    pub category_id: CategoryId,
    pub alert_type: AlertType,
    pub threshold: Decimal,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl BudgetAlert {
    pub fn new(
        id: AlertId,
        budget_id: BudgetId,
        category_id: CategoryId,
        alert_type: AlertType,
        threshold: Decimal,
    ) -> Self {
        Self {
            id,
            budget_id,
            category_id,
            alert_type,
            threshold,
            is_active: true,
        }
    }
}
