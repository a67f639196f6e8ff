//! Strongly-typed ID wrappers for all entity types
//!
//! The backend hands out integer primary keys. Wrapping them in newtypes
//! prevents accidentally matching a budget id against a category id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create an ID from a backend primary key
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the underlying primary key
            pub const fn get(&self) -> i64 {
                self.0
            }

            /// Parse an ID from a string, with or without the display prefix
            pub fn parse(s: &str) -> Result<Self, ParseIntError> {
                s.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(BudgetId, "bud-");
define_id!(AlertId, "alr-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(BudgetId::new(7).to_string(), "bud-7");
        assert_eq!(CategoryId::new(12).to_string(), "cat-12");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!(BudgetId::parse("7").unwrap(), BudgetId::new(7));
        assert_eq!(BudgetId::parse("bud-7").unwrap(), BudgetId::new(7));
        assert_eq!(" cat-3 ".parse::<CategoryId>().unwrap(), CategoryId::new(3));
        assert!(BudgetId::parse("cat-7").is_err());
        assert!(BudgetId::parse("seven").is_err());
    }

    #[test]
    fn test_id_serialization() {
        let id = TransactionId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");

        let deserialized: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_ids_order_by_key() {
        let mut ids = vec![CategoryId::new(3), CategoryId::new(1), CategoryId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![CategoryId::new(1), CategoryId::new(2), CategoryId::new(3)]);
    }
}
