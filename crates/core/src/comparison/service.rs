//! Comparison service: variance calculation and aggregation.

use rust_decimal::Decimal;

use super::types::{
    ComparisonInput, ComparisonReport, ComparisonRow, ComparisonSummary, VariancePercent,
    VarianceStatus,
};

/// Budget vs actual aggregation engine.
pub struct ComparisonService;

impl ComparisonService {
    /// Variance percentage of `variance` against `budgeted`.
    ///
    /// - `budgeted != 0`: `variance / budgeted * 100`, unrounded
    /// - `budgeted == 0` and no variance: `0`
    /// - `budgeted == 0` with spending: unbounded
    #[must_use]
    pub fn variance_percent(budgeted: Decimal, variance: Decimal) -> VariancePercent {
        if budgeted.is_zero() {
            if variance.is_zero() {
                VariancePercent::Defined(Decimal::ZERO)
            } else {
                VariancePercent::Unbounded
            }
        } else {
            VariancePercent::Defined(variance / budgeted * Decimal::ONE_HUNDRED)
        }
    }

    /// Builds one display row: `variance = actual - budgeted`.
    #[must_use]
    pub fn calculate_row(input: &ComparisonInput) -> ComparisonRow {
        let variance = input.actual - input.budgeted;

        ComparisonRow {
            expense_type_name: input.expense_type.clone(),
            budgeted: input.budgeted,
            actual: input.actual,
            variance,
            variance_percent: Self::variance_percent(input.budgeted, variance),
            status: VarianceStatus::from_variance(variance),
        }
    }

    /// Sums the rows into report totals.
    #[must_use]
    pub fn summarize(rows: &[ComparisonRow]) -> ComparisonSummary {
        let total_budgeted: Decimal = rows.iter().map(|r| r.budgeted).sum();
        let total_actual: Decimal = rows.iter().map(|r| r.actual).sum();
        let total_variance = total_actual - total_budgeted;

        ComparisonSummary {
            total_budgeted,
            total_actual,
            total_variance,
            variance_percent: Self::variance_percent(total_budgeted, total_variance),
            status: VarianceStatus::from_variance(total_variance),
        }
    }

    /// Turns per-category inputs into a full report. Pure and deterministic.
    #[must_use]
    pub fn aggregate(inputs: &[ComparisonInput]) -> ComparisonReport {
        let rows: Vec<ComparisonRow> = inputs.iter().map(Self::calculate_row).collect();
        let summary = Self::summarize(&rows);
        ComparisonReport { rows, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_under_budget_row() {
        let row = ComparisonService::calculate_row(&ComparisonInput::new(
            "Food & Dining",
            dec!(500),
            dec!(420),
        ));

        assert_eq!(row.variance, dec!(-80));
        assert_eq!(row.variance_percent, VariancePercent::Defined(dec!(-16.0)));
        assert_eq!(row.status, VarianceStatus::UnderBudget);
        assert!(!row.status.is_warning());
    }

    #[test]
    fn test_over_budget_row() {
        let row = ComparisonService::calculate_row(&ComparisonInput::new(
            "Entertainment",
            dec!(200),
            dec!(250),
        ));

        assert_eq!(row.variance, dec!(50));
        assert_eq!(row.variance_percent, VariancePercent::Defined(dec!(25.0)));
        assert_eq!(row.status, VarianceStatus::AtOrOverBudget);
        assert!(row.status.is_warning());
    }

    #[test]
    fn test_exactly_on_budget_is_warning() {
        let row =
            ComparisonService::calculate_row(&ComparisonInput::new("Rent", dec!(100), dec!(100)));

        assert_eq!(row.variance, dec!(0));
        assert_eq!(row.variance_percent, VariancePercent::Defined(dec!(0)));
        assert_eq!(row.status, VarianceStatus::AtOrOverBudget);
    }

    #[test]
    fn test_zero_budget_zero_actual() {
        let row = ComparisonService::calculate_row(&ComparisonInput::new("Gifts", dec!(0), dec!(0)));
        assert_eq!(row.variance_percent, VariancePercent::Defined(dec!(0)));
    }

    #[test]
    fn test_zero_budget_with_spending_is_unbounded() {
        let row =
            ComparisonService::calculate_row(&ComparisonInput::new("Gifts", dec!(0), dec!(35)));
        assert_eq!(row.variance, dec!(35));
        assert_eq!(row.variance_percent, VariancePercent::Unbounded);
        assert_eq!(row.variance_percent.as_decimal(), None);
    }

    #[test]
    fn test_percent_keeps_full_precision() {
        let row =
            ComparisonService::calculate_row(&ComparisonInput::new("Misc", dec!(3), dec!(4)));
        let percent = row.variance_percent.as_decimal().unwrap();
        assert!(percent > dec!(33.333));
        assert_eq!(percent.round_dp(2), dec!(33.33));
    }

    #[test]
    fn test_tiny_variance_on_large_budget_keeps_sign() {
        let under = ComparisonService::calculate_row(&ComparisonInput::new(
            "Rent",
            dec!(1000000.00),
            dec!(999999.99),
        ));
        let over = ComparisonService::calculate_row(&ComparisonInput::new(
            "Rent",
            dec!(1000000.00),
            dec!(1000000.01),
        ));

        assert_eq!(under.variance, dec!(-0.01));
        assert_eq!(under.variance_percent, VariancePercent::Defined(dec!(-0.000001)));
        assert_eq!(over.variance_percent, VariancePercent::Defined(dec!(0.000001)));
    }

    #[test]
    fn test_aggregate_totals() {
        let inputs = vec![
            ComparisonInput::new("Food & Dining", dec!(500), dec!(420)),
            ComparisonInput::new("Transportation", dec!(300), dec!(280)),
            ComparisonInput::new("Entertainment", dec!(200), dec!(250)),
            ComparisonInput::new("Utilities", dec!(400), dec!(380)),
            ComparisonInput::new("Healthcare", dec!(250), dec!(180)),
        ];

        let report = ComparisonService::aggregate(&inputs);

        assert_eq!(report.rows.len(), 5);
        assert_eq!(report.summary.total_budgeted, dec!(1650));
        assert_eq!(report.summary.total_actual, dec!(1510));
        assert_eq!(report.summary.total_variance, dec!(-140));
        assert_eq!(
            report.summary.variance_percent.as_decimal().map(|p| p.round_dp(2)),
            Some(dec!(-8.48))
        );
        assert_eq!(report.summary.status, VarianceStatus::UnderBudget);
        assert_eq!(report.max_amount(), dec!(500));
        // Input order is preserved.
        assert_eq!(report.rows[2].expense_type_name, "Entertainment");
    }

    #[test]
    fn test_empty_input() {
        let report = ComparisonService::aggregate(&[]);

        assert!(report.rows.is_empty());
        assert_eq!(report.summary.total_budgeted, dec!(0));
        assert_eq!(report.summary.total_actual, dec!(0));
        assert_eq!(report.summary.total_variance, dec!(0));
        assert_eq!(
            report.summary.variance_percent,
            VariancePercent::Defined(dec!(0))
        );
        assert_eq!(report.max_amount(), dec!(0));
    }

    #[test]
    fn test_percent_serializes_null_when_unbounded() {
        let json = serde_json::to_string(&VariancePercent::Unbounded).unwrap();
        assert_eq!(json, "null");
        let back: VariancePercent = serde_json::from_str("null").unwrap();
        assert_eq!(back, VariancePercent::Unbounded);
    }
}
