//! Budget overrun detection for expense record drafts.

use std::collections::BTreeMap;

use chrono::Datelike;
use fintrack_shared::types::ExpenseTypeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::{Budget, NewExpenseRecord};

/// An expense type whose spending in a record exceeds its monthly budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetOverrun {
    /// Expense type over budget.
    pub expense_type_id: ExpenseTypeId,
    /// Expense type name, when known from the budget rows.
    pub expense_type_name: Option<String>,
    /// Amount the record spends on this type.
    pub spent: Decimal,
    /// Budget for the record's month.
    pub budgeted: Decimal,
}

impl BudgetOverrun {
    /// How far spending exceeds the budget.
    #[must_use]
    pub fn excess(&self) -> Decimal {
        self.spent - self.budgeted
    }
}

/// Groups the record's details by expense type and returns every type whose
/// total exceeds the budget for the record's month.
///
/// Types without a budget that month are not checked. Several budget rows
/// for the same month and type are summed. Results are ordered by expense
/// type ID. Overruns are warnings: they never block saving.
#[must_use]
pub fn find_overruns(record: &NewExpenseRecord, budgets: &[Budget]) -> Vec<BudgetOverrun> {
    let month = record.date.month();

    let mut spent_by_type: BTreeMap<ExpenseTypeId, Decimal> = BTreeMap::new();
    for detail in &record.details {
        *spent_by_type.entry(detail.expense_type_id).or_default() += detail.amount;
    }

    spent_by_type
        .into_iter()
        .filter_map(|(expense_type_id, spent)| {
            let matching: Vec<&Budget> = budgets
                .iter()
                .filter(|b| b.month.number() == month && b.expense_type_id == expense_type_id)
                .collect();
            if matching.is_empty() {
                return None;
            }

            let budgeted: Decimal = matching.iter().map(|b| b.amount).sum();
            (spent > budgeted).then(|| BudgetOverrun {
                expense_type_id,
                expense_type_name: matching.iter().find_map(|b| b.expense_type_name.clone()),
                spent,
                budgeted,
            })
        })
        .collect()
}
