//! Typed IDs for type-safe entity references.
//!
//! The backend keys every table with an integer, so these wrap `i64`.
//! Using typed IDs prevents accidentally passing a `FundId` where an
//! `ExpenseTypeId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Creates an ID from a raw backend key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw backend key.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(ExpenseTypeId, "Unique identifier for an expense type.");
typed_id!(FundId, "Unique identifier for a monetary fund.");
typed_id!(BudgetId, "Unique identifier for a budget row.");
typed_id!(ExpenseRecordId, "Unique identifier for an expense record.");
typed_id!(
    ExpenseDetailId,
    "Unique identifier for an expense record detail line."
);
typed_id!(DepositId, "Unique identifier for a deposit.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_parse() {
        let id = FundId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(" 42 ".parse::<FundId>().unwrap(), id);
        assert!("abc".parse::<FundId>().is_err());
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = ExpenseTypeId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: ExpenseTypeId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }
}
