//! Dashboard data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline amounts shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    /// Money across all funds.
    pub money_total: Option<Decimal>,
    /// Deposits made this month.
    pub money_month: Option<Decimal>,
    /// Expenses recorded this month.
    pub expense_month: Option<Decimal>,
    /// Total budgeted.
    pub budget_total: Option<Decimal>,
}

impl DashboardTotals {
    /// Budget left after this month's expenses.
    ///
    /// Only available once both the budget and expense cards have loaded.
    #[must_use]
    pub fn budget_remaining(&self) -> Option<Decimal> {
        Some(self.budget_total? - self.expense_month?)
    }
}

/// Kind of entry in the recent activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// An expense record.
    #[serde(alias = "Gasto")]
    Expense,
    /// A deposit into a fund.
    #[serde(alias = "Deposito", alias = "Depósito")]
    Deposit,
}

impl TransactionKind {
    /// Whether the entry takes money out.
    #[must_use]
    pub const fn is_outflow(self) -> bool {
        matches!(self, Self::Expense)
    }
}

/// One line of the recent activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentTransaction {
    /// Expense or deposit.
    pub kind: TransactionKind,
    /// Merchant for expenses, a fixed label for deposits.
    pub title: String,
    /// Expense type for expenses, fund name for deposits.
    pub subtitle: Option<String>,
    /// Unsigned amount.
    pub amount: Decimal,
    /// Transaction date.
    pub date: Option<NaiveDate>,
}

impl RecentTransaction {
    /// Amount with expenses negated.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_outflow() {
            -self.amount
        } else {
            self.amount
        }
    }
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Headline cards.
    pub totals: DashboardTotals,
    /// Latest activity, newest first as returned by the backend.
    pub recent: Vec<RecentTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_budget_remaining_needs_both_cards() {
        let mut totals = DashboardTotals {
            budget_total: Some(dec!(1000)),
            ..DashboardTotals::default()
        };
        assert_eq!(totals.budget_remaining(), None);

        totals.expense_month = Some(dec!(1250.50));
        assert_eq!(totals.budget_remaining(), Some(dec!(-250.50)));
    }

    #[test]
    fn test_signed_amount() {
        let mut tx = RecentTransaction {
            kind: TransactionKind::Expense,
            title: "Mercado".to_string(),
            subtitle: Some("Comida".to_string()),
            amount: dec!(45000),
            date: NaiveDate::from_ymd_opt(2024, 3, 5),
        };
        assert_eq!(tx.signed_amount(), dec!(-45000));

        tx.kind = TransactionKind::Deposit;
        assert_eq!(tx.signed_amount(), dec!(45000));
    }

    #[test]
    fn test_transaction_kind_aliases() {
        let kind: TransactionKind = serde_json::from_str("\"Gasto\"").unwrap();
        assert_eq!(kind, TransactionKind::Expense);
        let kind: TransactionKind = serde_json::from_str("\"Deposito\"").unwrap();
        assert_eq!(kind, TransactionKind::Deposit);
    }
}
