//! Core data models for Spendwise
//!
//! One canonical shape per entity. Whatever the backend or a fixture file
//! sends is normalised into these types by the `data` module before any
//! aggregation runs.

pub mod alert;
pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use alert::{AlertType, BudgetAlert};
pub use budget::{Budget, CategoryAllocation};
pub use category::{category_label, Category, CategoryRef, UNCATEGORIZED_LABEL};
pub use ids::{AlertId, BudgetId, CategoryId, TransactionId};
pub use money::{Money, MAX_STORED_AMOUNT};
pub use period::{format_date, DateRange, PeriodType};
pub use transaction::{Transaction, TransactionKind};
