//! Tests for budget overrun detection.

use chrono::NaiveDate;
use fintrack_shared::types::{BudgetId, ExpenseTypeId, FundId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::overrun::find_overruns;
use crate::transactions::{Budget, Month, NewExpenseDetail, NewExpenseRecord};

fn budget(id: i64, month: u32, expense_type: i64, amount: Decimal) -> Budget {
    Budget {
        id: BudgetId::new(id),
        month: Month::try_from(month).unwrap(),
        expense_type_id: ExpenseTypeId::new(expense_type),
        expense_type_name: Some(format!("Type {expense_type}")),
        amount,
    }
}

fn record(month: u32, details: &[(i64, Decimal)]) -> NewExpenseRecord {
    NewExpenseRecord {
        date: NaiveDate::from_ymd_opt(2024, month, 10).unwrap(),
        fund_id: FundId::new(1),
        merchant: None,
        document_type: None,
        notes: None,
        details: details
            .iter()
            .map(|(t, a)| NewExpenseDetail {
                expense_type_id: ExpenseTypeId::new(*t),
                amount: *a,
            })
            .collect(),
    }
}

#[test]
fn test_details_grouped_by_type() {
    let budgets = vec![budget(1, 3, 1, dec!(100)), budget(2, 3, 2, dec!(300))];
    let rec = record(3, &[(1, dec!(60)), (2, dec!(50)), (1, dec!(45))]);

    let overruns = find_overruns(&rec, &budgets);

    assert_eq!(overruns.len(), 1);
    assert_eq!(overruns[0].expense_type_id, ExpenseTypeId::new(1));
    assert_eq!(overruns[0].spent, dec!(105));
    assert_eq!(overruns[0].budgeted, dec!(100));
    assert_eq!(overruns[0].excess(), dec!(5));
    assert_eq!(overruns[0].expense_type_name.as_deref(), Some("Type 1"));
}

#[test]
fn test_spending_equal_to_budget_is_not_overrun() {
    let budgets = vec![budget(1, 3, 1, dec!(100))];
    let rec = record(3, &[(1, dec!(100))]);
    assert!(find_overruns(&rec, &budgets).is_empty());
}

#[test]
fn test_other_months_are_ignored() {
    let budgets = vec![budget(1, 4, 1, dec!(10))];
    let rec = record(3, &[(1, dec!(500))]);
    assert!(find_overruns(&rec, &budgets).is_empty());
}

#[test]
fn test_unbudgeted_types_are_not_checked() {
    let budgets = vec![budget(1, 3, 2, dec!(10))];
    let rec = record(3, &[(1, dec!(500))]);
    assert!(find_overruns(&rec, &budgets).is_empty());
}

#[test]
fn test_duplicate_budget_rows_are_summed() {
    let budgets = vec![budget(1, 3, 1, dec!(60)), budget(2, 3, 1, dec!(60))];
    let rec = record(3, &[(1, dec!(110))]);
    assert!(find_overruns(&rec, &budgets).is_empty());

    let rec = record(3, &[(1, dec!(130))]);
    let overruns = find_overruns(&rec, &budgets);
    assert_eq!(overruns.len(), 1);
    assert_eq!(overruns[0].budgeted, dec!(120));
}

proptest! {
    /// Every reported overrun really exceeds its budget.
    #[test]
    fn test_overruns_always_exceed(
        amounts in prop::collection::vec((1i64..4, 1i64..100_000), 1..10),
        limit in 0i64..200_000,
    ) {
        let budgets: Vec<Budget> = (1..4)
            .map(|t| budget(t, 6, t, Decimal::new(limit, 2)))
            .collect();
        let details: Vec<(i64, Decimal)> = amounts
            .iter()
            .map(|(t, cents)| (*t, Decimal::new(*cents, 2)))
            .collect();
        let rec = record(6, &details);

        for overrun in find_overruns(&rec, &budgets) {
            prop_assert!(overrun.spent > overrun.budgeted);
            prop_assert!(overrun.excess() > Decimal::ZERO);
        }
    }
}
