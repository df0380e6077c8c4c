//! Property-based tests for the comparison engine.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::ComparisonService;
use super::types::{ComparisonInput, VariancePercent, VarianceStatus};

/// Amounts with two decimal places, as the backend stores them.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn input() -> impl Strategy<Value = ComparisonInput> {
    ("[A-Za-z ]{1,16}", amount(), amount())
        .prop_map(|(name, budgeted, actual)| ComparisonInput::new(name, budgeted, actual))
}

proptest! {
    /// Sum of row variances equals total actual minus total budgeted.
    #[test]
    fn test_variance_sum_matches_totals(inputs in prop::collection::vec(input(), 0..40)) {
        let report = ComparisonService::aggregate(&inputs);
        let variance_sum: Decimal = report.rows.iter().map(|r| r.variance).sum();

        prop_assert_eq!(variance_sum, report.summary.total_actual - report.summary.total_budgeted);
        prop_assert_eq!(variance_sum, report.summary.total_variance);
    }

    /// With a positive budget the percentage has the same sign as the variance.
    #[test]
    fn test_percent_sign_matches_variance(
        budgeted in 1i64..1_000_000_000_000,
        actual in 0i64..1_000_000_000_000,
    ) {
        let budgeted = Decimal::new(budgeted, 2);
        let actual = Decimal::new(actual, 2);
        let row = ComparisonService::calculate_row(&ComparisonInput::new("x", budgeted, actual));

        let VariancePercent::Defined(percent) = row.variance_percent else {
            return Err(TestCaseError::fail("percent must be defined for a positive budget"));
        };

        if row.variance > Decimal::ZERO {
            prop_assert!(percent > Decimal::ZERO);
        } else if row.variance < Decimal::ZERO {
            prop_assert!(percent < Decimal::ZERO);
        } else {
            prop_assert!(percent.is_zero());
        }
    }

    /// Status is a warning exactly when the variance is non-negative.
    #[test]
    fn test_status_follows_sign(input in input()) {
        let row = ComparisonService::calculate_row(&input);
        if row.variance >= Decimal::ZERO {
            prop_assert_eq!(row.status, VarianceStatus::AtOrOverBudget);
        } else {
            prop_assert_eq!(row.status, VarianceStatus::UnderBudget);
        }
    }

    /// Aggregation is deterministic and leaves its input untouched.
    #[test]
    fn test_aggregate_is_idempotent(inputs in prop::collection::vec(input(), 0..20)) {
        let snapshot = inputs.clone();
        let first = ComparisonService::aggregate(&inputs);
        let second = ComparisonService::aggregate(&inputs);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&inputs, &snapshot);
    }

    /// A zero budget never divides.
    #[test]
    fn test_zero_budget_policy(actual in amount()) {
        let row = ComparisonService::calculate_row(&ComparisonInput::new("x", Decimal::ZERO, actual));
        if actual.is_zero() {
            prop_assert_eq!(row.variance_percent, VariancePercent::Defined(Decimal::ZERO));
        } else {
            prop_assert_eq!(row.variance_percent, VariancePercent::Unbounded);
        }
    }
}
