//! Report generation service.

use rust_decimal::Decimal;

use super::types::{DateRange, Movement, MovementKind, MovementReport, MovementSummary};

/// Service for generating movement reports.
pub struct ReportService;

impl ReportService {
    /// Keeps the movements inside `range`, preserving order.
    #[must_use]
    pub fn filter_movements(range: &DateRange, movements: Vec<Movement>) -> Vec<Movement> {
        if range.is_unbounded() {
            return movements;
        }
        movements
            .into_iter()
            .filter(|m| range.contains(m.date))
            .collect()
    }

    /// Computes deposit, expense, and net totals.
    #[must_use]
    pub fn summarize(movements: &[Movement]) -> MovementSummary {
        let total_for = |kind: MovementKind| -> Decimal {
            movements
                .iter()
                .filter(|m| m.kind == kind)
                .map(|m| m.amount)
                .sum()
        };

        let total_deposits = total_for(MovementKind::Deposit);
        let total_expenses = total_for(MovementKind::Expense);

        MovementSummary {
            total_deposits,
            total_expenses,
            net_movement: total_deposits - total_expenses,
        }
    }

    /// Filters `movements` to `range` and totals them.
    ///
    /// The backend is expected to filter already; filtering again keeps the
    /// report correct against backends that ignore the range parameters.
    #[must_use]
    pub fn generate_movement_report(range: DateRange, movements: Vec<Movement>) -> MovementReport {
        let movements = Self::filter_movements(&range, movements);
        let summary = Self::summarize(&movements);

        MovementReport {
            range,
            movements,
            summary,
        }
    }
}
