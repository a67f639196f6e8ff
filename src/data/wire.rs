//! Wire shapes for backend and fixture payloads
//!
//! The REST backend is loose about a few fields: amounts arrive as decimal
//! strings or JSON numbers, a transaction's category may be a nested object,
//! a bare id or null, and list endpoints may or may not be paginated. This is
//! the only place those variations are handled; everything past here works on
//! the canonical models.
//!
//! Each record is decoded on its own. A record that cannot be decoded is
//! logged and counted, and the rest of the list still loads.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{
    AlertId, AlertType, Budget, BudgetAlert, BudgetId, Category, CategoryAllocation, CategoryId,
    CategoryRef, DateRange, Money, PeriodType, Transaction, TransactionId, TransactionKind,
};

/// Records decoded from one list, plus how many were dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

/// Allocation id to the budget and category it belongs to.
///
/// The backend attaches alerts to a budget allocation row rather than to a
/// budget and category directly, so alerts are resolved through this.
pub type AllocationIndex = HashMap<i64, (BudgetId, CategoryId)>;

#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Bare(Vec<Value>),
    Page {
        results: Vec<Value>,
        #[serde(default)]
        next: Option<String>,
    },
}

/// Split a list payload into its records and the next page URL, if any.
///
/// Accepts a bare JSON array or a paginated `{ "results": [...], "next": ... }`
/// envelope.
pub fn split_page(body: Value, what: &str) -> SpendwiseResult<(Vec<Value>, Option<String>)> {
    match serde_json::from_value::<Listing>(body) {
        Ok(Listing::Bare(records)) => Ok((records, None)),
        Ok(Listing::Page { results, next }) => Ok((results, next.filter(|n| !n.is_empty()))),
        Err(_) => Err(SpendwiseError::Json(format!(
            "{}: expected a list or a paginated {{\"results\": [...]}} object",
            what
        ))),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireCategory {
    Nested {
        id: i64,
        #[serde(default)]
        name: Option<String>,
    },
    Id(i64),
    Text(String),
}

impl WireCategory {
    fn into_ref(self) -> Result<CategoryRef, String> {
        match self {
            Self::Nested { id, name } => Ok(CategoryRef {
                id: CategoryId::new(id),
                name,
            }),
            Self::Id(id) => Ok(CategoryRef::by_id(CategoryId::new(id))),
            Self::Text(text) => CategoryId::from_str(&text)
                .map(CategoryRef::by_id)
                .map_err(|_| format!("invalid category reference {:?}", text)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireTransaction {
    id: i64,
    date: String,
    amount: Value,
    transaction_type: String,
    #[serde(default)]
    category: Option<WireCategory>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireAllocation {
    #[serde(default)]
    id: Option<i64>,
    category: WireCategory,
    #[serde(default)]
    category_name: Option<String>,
    amount: Value,
}

#[derive(Debug, Deserialize)]
struct WireBudget {
    id: i64,
    name: String,
    #[serde(default)]
    period_type: Option<PeriodType>,
    start_date: String,
    end_date: String,
    total_amount: Value,
    #[serde(default)]
    categories: Vec<WireAllocation>,
    #[serde(default)]
    is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct WireAlert {
    id: i64,
    #[serde(default)]
    budget: Option<i64>,
    #[serde(default)]
    category: Option<WireCategory>,
    #[serde(default)]
    budget_category: Option<i64>,
    alert_type: AlertType,
    threshold: Value,
    #[serde(default)]
    is_active: Option<bool>,
}

fn parse_amount(value: &Value) -> Result<Money, String> {
    let amount = parse_unbounded_amount(value)?;
    if !amount.fits_storage() {
        return Err(format!("amount {} is out of range", amount.amount()));
    }
    Ok(amount)
}

fn parse_unbounded_amount(value: &Value) -> Result<Money, String> {
    match value {
        Value::String(text) => Money::parse(text).map_err(|e| e.to_string()),
        Value::Number(number) => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map(Money::new)
                .map_err(|e| format!("invalid amount {}: {}", text, e))
        }
        other => Err(format!("expected an amount, got {}", other)),
    }
}

fn parse_decimal(value: &Value) -> Result<Decimal, String> {
    parse_amount(value).map(|m| m.amount())
}

/// Parse an ISO-8601 calendar date; a full timestamp is cut to its date part
fn parse_date(text: &str) -> Result<NaiveDate, String> {
    let trimmed = text.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| format!("invalid date {:?}", text))
}

fn decode_list<W, T, F>(records: Vec<Value>, what: &str, mut convert: F) -> Decoded<T>
where
    W: DeserializeOwned,
    F: FnMut(W) -> Result<T, String>,
{
    let mut items = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for (index, record) in records.into_iter().enumerate() {
        let decoded = serde_json::from_value::<W>(record)
            .map_err(|e| e.to_string())
            .and_then(&mut convert);

        match decoded {
            Ok(item) => items.push(item),
            Err(reason) => {
                tracing::warn!(kind = what, index, %reason, "Skipping malformed record");
                skipped += 1;
            }
        }
    }

    Decoded { items, skipped }
}

/// Decode transaction records
pub fn decode_transactions(records: Vec<Value>) -> Decoded<Transaction> {
    decode_list(records, "transaction", |wire: WireTransaction| {
        let kind = TransactionKind::parse(&wire.transaction_type)
            .ok_or_else(|| format!("unknown transaction_type {:?}", wire.transaction_type))?;

        let mut txn = Transaction::new(
            TransactionId::new(wire.id),
            parse_date(&wire.date)?,
            parse_amount(&wire.amount)?,
            kind,
        );
        if let Some(category) = wire.category {
            txn = txn.with_category(category.into_ref()?);
        }
        if let Some(description) = wire.description {
            txn = txn.with_description(description);
        }
        Ok(txn)
    })
}

/// Decode budget records, recording allocation ids into `index`
pub fn decode_budgets(records: Vec<Value>, index: &mut AllocationIndex) -> Decoded<Budget> {
    decode_list(records, "budget", |wire: WireBudget| {
        let budget_id = BudgetId::new(wire.id);
        let range = DateRange::new(parse_date(&wire.start_date)?, parse_date(&wire.end_date)?)
            .map_err(|e| e.to_string())?;

        let mut allocations = Vec::with_capacity(wire.categories.len());
        let mut allocation_ids = Vec::new();
        for allocation in wire.categories {
            let mut category = allocation.category.into_ref()?;
            if category.name.is_none() {
                category.name = allocation.category_name;
            }
            if let Some(id) = allocation.id {
                allocation_ids.push((id, category.id));
            }
            allocations.push(CategoryAllocation::new(
                category,
                parse_amount(&allocation.amount)?,
            ));
        }

        let mut budget = Budget::new(
            budget_id,
            wire.name,
            wire.period_type.unwrap_or_default(),
            range,
            parse_amount(&wire.total_amount)?,
        );
        budget.allocations = allocations;
        budget.is_active = wire.is_active.unwrap_or(true);

        // Only index allocations of budgets that decoded successfully.
        for (id, category_id) in allocation_ids {
            index.insert(id, (budget_id, category_id));
        }
        Ok(budget)
    })
}

/// Decode category records
pub fn decode_categories(records: Vec<Value>) -> Decoded<Category> {
    decode_list(records, "category", |category: Category| Ok(category))
}

/// Decode alert records, resolving allocation-based alerts through `index`
pub fn decode_alerts(records: Vec<Value>, index: &AllocationIndex) -> Decoded<BudgetAlert> {
    decode_list(records, "alert", |wire: WireAlert| {
        let (budget_id, category_id) = match (wire.budget, wire.category, wire.budget_category) {
            (Some(budget), Some(category), _) => {
                (BudgetId::new(budget), category.into_ref()?.id)
            }
            (_, _, Some(allocation)) => *index
                .get(&allocation)
                .ok_or_else(|| format!("unknown budget allocation {}", allocation))?,
            _ => return Err("alert names neither a budget category nor an allocation".into()),
        };

        let mut alert = BudgetAlert::new(
            AlertId::new(wire.id),
            budget_id,
            category_id,
            wire.alert_type,
            parse_decimal(&wire.threshold)?,
        );
        alert.is_active = wire.is_active.unwrap_or(true);
        Ok(alert)
    })
}
