//! Report data types.

use chrono::NaiveDate;
use fintrack_shared::format::parse_date_only;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// Inclusive date range. A missing bound is open on that side; no bounds
/// means "all time".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    pub start: Option<NaiveDate>,
    /// Last day included.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// The unbounded range.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Creates a range from optional bounds.
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Parses form input; blank strings are treated as missing bounds.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDate` for a non-blank bound that is not a date.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, ReportError> {
        let parse_bound = |raw: Option<&str>| -> Result<Option<NaiveDate>, ReportError> {
            match raw.map(str::trim) {
                Some(s) if !s.is_empty() => Ok(Some(parse_date_only(s)?)),
                _ => Ok(None),
            }
        };
        Ok(Self::new(parse_bound(start)?, parse_bound(end)?))
    }

    /// Whether neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether the start is after the end. An inverted range matches nothing.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    /// Whether `date` falls inside the range (bounds included).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.is_inverted() {
            return false;
        }
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Direction of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Money into a fund.
    #[serde(alias = "Deposito", alias = "Depósito")]
    Deposit,
    /// Money out of a fund.
    #[serde(alias = "Gasto")]
    Expense,
}

impl MovementKind {
    /// Sign applied to the amount when computing net movement.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::Deposit => amount,
            Self::Expense => -amount,
        }
    }
}

/// A deposit or expense in the movement report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Movement date.
    pub date: NaiveDate,
    /// Deposit or expense.
    pub kind: MovementKind,
    /// Free-form description.
    pub description: String,
    /// Unsigned amount.
    pub amount: Decimal,
}

/// Totals of a movement report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementSummary {
    /// Sum of deposit amounts.
    pub total_deposits: Decimal,
    /// Sum of expense amounts.
    pub total_expenses: Decimal,
    /// `total_deposits - total_expenses`.
    pub net_movement: Decimal,
}

/// Movements inside a date range plus their totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementReport {
    /// Range the report covers.
    pub range: DateRange,
    /// Movements in backend order.
    pub movements: Vec<Movement>,
    /// Totals over `movements`.
    pub summary: MovementSummary,
}
