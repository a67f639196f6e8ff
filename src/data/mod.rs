//! Data loading
//!
//! Everything the reports need is fetched up front into a [`Snapshot`],
//! either from the REST backend or from a fixture directory. The reports
//! themselves never do I/O.

pub mod api;
pub mod files;
pub mod wire;

use serde::Serialize;
use serde_json::Value;

use crate::config::{DataSource, Session};
use crate::error::SpendwiseResult;
use crate::models::{Budget, BudgetAlert, BudgetId, Category, Transaction};

pub use api::ApiClient;
pub use wire::{AllocationIndex, Decoded};

/// Undecoded list records, as fetched
#[derive(Debug, Clone, Default)]
pub struct RawSnapshot {
    pub transactions: Vec<Value>,
    pub budgets: Vec<Value>,
    pub categories: Vec<Value>,
    pub alerts: Vec<Value>,
}

/// Everything loaded for one run, in canonical form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub categories: Vec<Category>,
    pub alerts: Vec<BudgetAlert>,
    /// Records dropped because they could not be decoded
    pub skipped: usize,
}

impl Snapshot {
    /// Decode raw records and fill in category names from the category list
    pub fn from_raw(raw: RawSnapshot) -> Self {
        let mut index = AllocationIndex::new();

        let transactions = wire::decode_transactions(raw.transactions);
        let budgets = wire::decode_budgets(raw.budgets, &mut index);
        let categories = wire::decode_categories(raw.categories);
        let alerts = wire::decode_alerts(raw.alerts, &index);

        let mut snapshot = Self {
            skipped: transactions.skipped + budgets.skipped + categories.skipped + alerts.skipped,
            transactions: transactions.items,
            budgets: budgets.items,
            categories: categories.items,
            alerts: alerts.items,
        };
        snapshot.resolve_category_names();
        snapshot.warn_over_allocated();
        snapshot
    }

    /// Budgets whose allocations add up to more than their total
    pub fn over_allocated_budgets(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.iter().filter(|b| b.is_over_allocated())
    }

    fn warn_over_allocated(&self) {
        for budget in self.over_allocated_budgets() {
            tracing::warn!(
                budget_id = budget.id.get(),
                budget = %budget.name,
                over_by = %budget.unallocated().abs(),
                "Category allocations exceed the budget total"
            );
        }
    }

    /// Name category references that arrived as a bare id
    fn resolve_category_names(&mut self) {
        let categories = &self.categories;
        let name_of = |id| Category::find_by_id(categories, id).map(|c| c.name.clone());

        for txn in &mut self.transactions {
            if let Some(category) = txn.category.as_mut().filter(|c| c.name.is_none()) {
                category.name = name_of(category.id);
            }
        }

        for budget in &mut self.budgets {
            for allocation in budget.allocations.iter_mut().filter(|a| a.category.name.is_none()) {
                allocation.category.name = name_of(allocation.category.id);
            }
        }
    }

    pub fn budget(&self, id: BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    /// Budgets the backend marks active
    pub fn active_budgets(&self) -> Vec<Budget> {
        self.budgets.iter().filter(|b| b.is_active).cloned().collect()
    }
}

/// Load the snapshot for this session.
///
/// Completes before any report runs; a transport or status failure on a
/// required list fails the whole load.
pub async fn load_snapshot(session: &Session) -> SpendwiseResult<Snapshot> {
    let raw = match &session.source {
        DataSource::Api {
            base_url,
            token,
            timeout,
        } => {
            tracing::info!(%base_url, authenticated = token.is_some(), "Loading from API");
            ApiClient::new(base_url, token.clone(), *timeout)?
                .fetch_all()
                .await?
        }
        DataSource::Files { dir } => {
            tracing::info!(dir = %dir.display(), "Loading from files");
            files::load_dir(dir)?
        }
    };

    let snapshot = Snapshot::from_raw(raw);

    if snapshot.skipped > 0 {
        tracing::warn!(
            skipped = snapshot.skipped,
            "Some records could not be read and were left out"
        );
    }
    tracing::info!(
        transactions = snapshot.transactions.len(),
        budgets = snapshot.budgets.len(),
        categories = snapshot.categories.len(),
        alerts = snapshot.alerts.len(),
        "Snapshot loaded"
    );

    Ok(snapshot)
}
