//! Budget vs actual comparison types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One category's budgeted and actual amounts, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonInput {
    /// Expense type name.
    pub expense_type: String,
    /// Budgeted amount.
    pub budgeted: Decimal,
    /// Actual spending.
    pub actual: Decimal,
}

impl ComparisonInput {
    /// Creates a new input row.
    #[must_use]
    pub fn new(expense_type: impl Into<String>, budgeted: Decimal, actual: Decimal) -> Self {
        Self {
            expense_type: expense_type.into(),
            budgeted,
            actual,
        }
    }
}

/// Variance as a percentage of the budget.
///
/// Serializes as a number, or `null` when unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Decimal>", into = "Option<Decimal>")]
pub enum VariancePercent {
    /// `variance / budgeted * 100` at full precision. Rounding happens
    /// only when the value is displayed.
    Defined(Decimal),
    /// Spending against a zero budget.
    Unbounded,
}

impl VariancePercent {
    /// The percentage, or `None` when unbounded.
    #[must_use]
    pub const fn as_decimal(self) -> Option<Decimal> {
        match self {
            Self::Defined(value) => Some(value),
            Self::Unbounded => None,
        }
    }
}

impl From<VariancePercent> for Option<Decimal> {
    fn from(value: VariancePercent) -> Self {
        value.as_decimal()
    }
}

impl From<Option<Decimal>> for VariancePercent {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(Self::Unbounded, Self::Defined)
    }
}

/// Display status of a variance.
///
/// Fixed contract: at or over budget is a warning (red), under budget is
/// favorable (green).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    /// `variance >= 0`.
    AtOrOverBudget,
    /// `variance < 0`.
    UnderBudget,
}

impl VarianceStatus {
    /// Classifies a variance.
    #[must_use]
    pub fn from_variance(variance: Decimal) -> Self {
        if variance.is_sign_negative() && !variance.is_zero() {
            Self::UnderBudget
        } else {
            Self::AtOrOverBudget
        }
    }

    /// Whether this status renders as a warning.
    #[must_use]
    pub const fn is_warning(self) -> bool {
        matches!(self, Self::AtOrOverBudget)
    }
}

/// Display-ready comparison row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Expense type name.
    pub expense_type_name: String,
    /// Budgeted amount.
    pub budgeted: Decimal,
    /// Actual spending.
    pub actual: Decimal,
    /// `actual - budgeted`.
    pub variance: Decimal,
    /// Variance relative to the budget.
    pub variance_percent: VariancePercent,
    /// Display status.
    pub status: VarianceStatus,
}

/// Totals across all comparison rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    /// Sum of budgeted amounts.
    pub total_budgeted: Decimal,
    /// Sum of actual amounts.
    pub total_actual: Decimal,
    /// `total_actual - total_budgeted`.
    pub total_variance: Decimal,
    /// Overall variance relative to the total budget.
    pub variance_percent: VariancePercent,
    /// Display status of the total variance.
    pub status: VarianceStatus,
}

/// Full budget vs actual report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Rows in input order.
    pub rows: Vec<ComparisonRow>,
    /// Summary totals.
    pub summary: ComparisonSummary,
}

impl ComparisonReport {
    /// Largest budgeted or actual amount, used to scale bar charts.
    #[must_use]
    pub fn max_amount(&self) -> Decimal {
        self.rows
            .iter()
            .flat_map(|row| [row.budgeted, row.actual])
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Global totals: all budgets vs all deposits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalTotals {
    /// Sum of all budgets.
    pub global_budget: Decimal,
    /// Sum of all deposits.
    pub global_deposit: Decimal,
}

impl GlobalTotals {
    /// Deposits left over after covering the whole budget.
    #[must_use]
    pub fn surplus(&self) -> Decimal {
        self.global_deposit - self.global_budget
    }
}
