//! Horizontal bar chart of budgeted against actual spending.

use fintrack_core::comparison::ComparisonReport;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::{Renderer, paint};

/// Bar width used by the CLI.
pub const DEFAULT_WIDTH: usize = 40;

const BUDGET_BAR: char = '░';
const ACTUAL_BAR: char = '█';

/// Length of a bar for `value` when `max` fills `width` cells.
///
/// Negative values and an empty chart draw nothing; any value above zero
/// gets at least one cell so small categories stay visible.
pub fn bar_length(value: Decimal, max: Decimal, width: usize) -> usize {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return 0;
    }
    let cells = (value / max * Decimal::from(width)).round();
    cells.to_usize().unwrap_or(width).clamp(1, width)
}

/// Two bars per expense type: budget on top, actual below, colored by
/// variance status.
pub fn comparison_chart(out: &Renderer, report: &ComparisonReport, width: usize) -> String {
    let max = report.max_amount();
    let label_width = report
        .rows
        .iter()
        .map(|row| row.expense_type_name.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(report.rows.len() * 2 + 1);
    lines.push(format!(
        "{:label_width$}  {BUDGET_BAR} budgeted  {ACTUAL_BAR} actual",
        ""
    ));
    for row in &report.rows {
        let budget: String = std::iter::repeat_n(BUDGET_BAR, bar_length(row.budgeted, max, width))
            .collect();
        let actual: String = std::iter::repeat_n(ACTUAL_BAR, bar_length(row.actual, max, width))
            .collect();

        lines.push(format!(
            "{:label_width$} │{budget} {}",
            row.expense_type_name,
            out.money(row.budgeted)
        ));
        lines.push(format!(
            "{:label_width$} │{} {}",
            "",
            paint(&actual, row.status),
            out.money(row.actual)
        ));
    }
    lines.join("\n")
}
