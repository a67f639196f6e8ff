//! Spending Insights
//!
//! Short observations about the user's spending: how much of their income
//! they spend, which category dominates, and how this week compares to the
//! last. `today` is an explicit argument so the result depends only on inputs.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::category_groups::group_by_category_of_kind;
use super::whole_percent;
use crate::models::{DateRange, Money, Transaction, TransactionKind};

/// At most this many insights are returned
pub const MAX_INSIGHTS: usize = 3;

const HIGH_SPENDING_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
const GREAT_SAVINGS_PERCENT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const TOP_CATEGORY_PERCENT: Decimal = Decimal::from_parts(40, 0, 0, false, 0);
const WEEKLY_CHANGE_PERCENT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Which observation an insight makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    HighSpending,
    GreatSavings,
    TopCategory,
    SpendingIncreased,
    SpendingDecreased,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighSpending => "high_spending",
            Self::GreatSavings => "great_savings",
            Self::TopCategory => "top_category",
            Self::SpendingIncreased => "spending_increased",
            Self::SpendingDecreased => "spending_decreased",
        }
    }
}

/// How an insight should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightTone {
    Warning,
    Positive,
    Info,
}

impl InsightTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Positive => "positive",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub tone: InsightTone,
    pub title: String,
    pub message: String,
    /// The figure the message quotes, when there is one
    pub percentage: Option<Decimal>,
}

impl Insight {
    fn new(
        kind: InsightKind,
        tone: InsightTone,
        title: &str,
        message: String,
        percentage: Option<Decimal>,
    ) -> Self {
        Self {
            kind,
            tone,
            title: title.to_string(),
            message,
            percentage,
        }
    }
}

/// Derive up to three insights from the transactions.
pub fn spending_insights(transactions: &[Transaction], today: NaiveDate) -> Vec<Insight> {
    if transactions.is_empty() {
        return Vec::new();
    }

    let mut insights = Vec::new();

    let total_income: Money = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let total_expenses: Money = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.magnitude())
        .sum();

    if let Some(insight) = income_insight(total_income, total_expenses) {
        insights.push(insight);
    }

    if let Some(insight) = top_category_insight(transactions, total_expenses) {
        insights.push(insight);
    }

    if let Some(insight) = weekly_trend_insight(transactions, today) {
        insights.push(insight);
    }

    insights.truncate(MAX_INSIGHTS);
    insights
}

fn income_insight(total_income: Money, total_expenses: Money) -> Option<Insight> {
    if !total_income.is_positive() {
        // Spending with no income at all is the extreme case of high spending.
        return total_expenses.is_positive().then(|| {
            Insight::new(
                InsightKind::HighSpending,
                InsightTone::Warning,
                "High Spending Alert",
                "You're spending without any recorded income. Consider reviewing your budget."
                    .to_string(),
                None,
            )
        });
    }

    let spent_share = total_expenses.percent_of(total_income);

    if spent_share > HIGH_SPENDING_PERCENT {
        let pct = whole_percent(spent_share);
        Some(Insight::new(
            InsightKind::HighSpending,
            InsightTone::Warning,
            "High Spending Alert",
            format!(
                "You're spending {}% of your income. Consider reviewing your budget.",
                pct
            ),
            Some(spent_share),
        ))
    } else if spent_share < GREAT_SAVINGS_PERCENT {
        let saved_share = Decimal::ONE_HUNDRED - spent_share;
        Some(Insight::new(
            InsightKind::GreatSavings,
            InsightTone::Positive,
            "Great Savings!",
            format!(
                "You're saving {}% of your income. Keep it up!",
                whole_percent(saved_share)
            ),
            Some(saved_share),
        ))
    } else {
        None
    }
}

fn top_category_insight(transactions: &[Transaction], total_expenses: Money) -> Option<Insight> {
    if !total_expenses.is_positive() {
        return None;
    }

    let groups = group_by_category_of_kind(transactions, TransactionKind::Expense);
    let (label, bucket) = groups
        .iter()
        .max_by(|(a_label, a), (b_label, b)| a.total.cmp(&b.total).then_with(|| b_label.cmp(a_label)))?;

    let share = bucket.total.percent_of(total_expenses);
    if share <= TOP_CATEGORY_PERCENT {
        return None;
    }

    Some(Insight::new(
        InsightKind::TopCategory,
        InsightTone::Info,
        "Top Spending Category",
        format!(
            "{} accounts for {}% of your expenses.",
            label,
            whole_percent(share)
        ),
        Some(share),
    ))
}

fn weekly_trend_insight(transactions: &[Transaction], today: NaiveDate) -> Option<Insight> {
    let this_week = DateRange::trailing_days(today, 7);
    let last_week = DateRange::trailing_days(today - Duration::days(7), 7);

    let spent_in = |range: &DateRange| -> Money {
        transactions
            .iter()
            .filter(|t| t.is_expense() && t.is_within(range))
            .map(|t| t.magnitude())
            .sum()
    };

    let recent = spent_in(&this_week);
    let previous = spent_in(&last_week);

    if !previous.is_positive() {
        return None;
    }

    let change = (recent - previous).percent_of(previous);

    if change > WEEKLY_CHANGE_PERCENT {
        Some(Insight::new(
            InsightKind::SpendingIncreased,
            InsightTone::Warning,
            "Spending Increased",
            format!(
                "Your spending is up {}% compared to last week.",
                whole_percent(change)
            ),
            Some(change),
        ))
    } else if change < -WEEKLY_CHANGE_PERCENT {
        Some(Insight::new(
            InsightKind::SpendingDecreased,
            InsightTone::Positive,
            "Spending Decreased",
            format!(
                "Great job! Your spending is down {}% compared to last week.",
                whole_percent(change.abs())
            ),
            Some(change),
        ))
    } else {
        None
    }
}
