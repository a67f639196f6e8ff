//! Budget Alerts
//!
//! Evaluates user-defined threshold alerts against computed budget progress.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::budget_progress::BudgetProgress;
use crate::models::{AlertId, AlertType, BudgetAlert, BudgetId, CategoryId, Money};

const CAUTION_PERCENT: Decimal = Decimal::from_parts(75, 0, 0, false, 0);
const WARNING_PERCENT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Severity bands for an allocation's percentage used
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Good,
    Caution,
    Warning,
    Over,
}

impl AlertLevel {
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage >= Decimal::ONE_HUNDRED {
            Self::Over
        } else if percentage >= WARNING_PERCENT {
            Self::Warning
        } else if percentage >= CAUTION_PERCENT {
            Self::Caution
        } else {
            Self::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Caution => "caution",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Caution => write!(f, "Caution"),
            Self::Warning => write!(f, "Warning"),
            Self::Over => write!(f, "Over budget"),
        }
    }
}

/// An alert whose threshold has been reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggeredAlert {
    pub alert_id: AlertId,
    pub budget_id: BudgetId,
    pub budget_name: String,
    pub category_id: CategoryId,
    pub category_label: String,
    pub alert_type: AlertType,
    pub threshold: Decimal,
    pub spent: Money,
    pub budgeted: Money,
    pub percentage: Decimal,
    pub level: AlertLevel,
}

/// Check every active alert against the budget progress it refers to.
///
/// Alerts pointing at a budget or category allocation that is not present in
/// `progress` are ignored. Thresholds are inclusive.
pub fn evaluate_alerts(progress: &[BudgetProgress], alerts: &[BudgetAlert]) -> Vec<TriggeredAlert> {
    alerts
        .iter()
        .filter(|alert| alert.is_active)
        .filter_map(|alert| {
            let budget = progress.iter().find(|p| p.budget_id == alert.budget_id)?;
            let category = budget.category(alert.category_id)?;

            let reached = match alert.alert_type {
                AlertType::Percentage => category.percentage >= alert.threshold,
                AlertType::Amount => category.spent.amount() >= alert.threshold,
            };
            if !reached {
                return None;
            }

            Some(TriggeredAlert {
                alert_id: alert.id,
                budget_id: budget.budget_id,
                budget_name: budget.budget_name.clone(),
                category_id: category.category_id,
                category_label: category.label.clone(),
                alert_type: alert.alert_type,
                threshold: alert.threshold,
                spent: category.spent,
                budgeted: category.budgeted,
                percentage: category.percentage,
                level: AlertLevel::from_percentage(category.percentage),
            })
        })
        .collect()
}
