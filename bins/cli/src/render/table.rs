//! Tables for entity lists and reports.

use std::collections::HashMap;

use fintrack_core::comparison::ComparisonReport;
use fintrack_core::maintenance::{ExpenseType, MonetaryFund};
use fintrack_core::reports::{MovementKind, MovementReport};
use fintrack_core::transactions::{Budget, Deposit, ExpenseRecord, total_deposits};
use fintrack_shared::types::{ExpenseTypeId, FundId};
use tabled::Table;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

use super::{MISSING, Renderer};

const EMPTY: &str = "(no rows)";

/// Renders `rows` under `headers`, right-aligning the columns listed in
/// `numeric`.
fn render(headers: &[&str], rows: Vec<Vec<String>>, numeric: &[usize]) -> String {
    if rows.is_empty() {
        return EMPTY.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(headers.iter().copied());
    for row in rows {
        builder.push_record(row);
    }

    let mut table = Table::from(builder);
    table.with(Style::rounded());
    for &column in numeric {
        table.with(Modify::new(Columns::single(column)).with(Alignment::right()));
    }
    table.to_string()
}

pub fn expense_types(_out: &Renderer, types: &[ExpenseType]) -> String {
    let rows = types
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.code.clone(),
                t.name.clone(),
                t.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    render(&["ID", "Code", "Name", "Description"], rows, &[0])
}

pub fn funds(out: &Renderer, funds: &[MonetaryFund]) -> String {
    let rows = funds
        .iter()
        .map(|f| {
            vec![
                f.id.to_string(),
                f.name.clone(),
                f.kind.label(out.locale()).to_string(),
            ]
        })
        .collect();
    render(&["ID", "Name", "Kind"], rows, &[0])
}

pub fn budgets(out: &Renderer, budgets: &[Budget]) -> String {
    let rows = budgets
        .iter()
        .map(|b| {
            vec![
                b.id.to_string(),
                b.month.name(out.locale()).to_string(),
                b.expense_type_name
                    .clone()
                    .unwrap_or_else(|| format!("#{}", b.expense_type_id)),
                out.money(b.amount),
            ]
        })
        .collect();
    render(&["ID", "Month", "Expense type", "Amount"], rows, &[0, 3])
}

/// Deposit list with a closing total line.
pub fn deposits(out: &Renderer, deposits: &[Deposit]) -> String {
    let rows = deposits
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                out.date(d.date),
                d.fund_name
                    .clone()
                    .unwrap_or_else(|| format!("#{}", d.fund_id)),
                out.money(d.amount),
            ]
        })
        .collect();
    let table = render(&["ID", "Date", "Fund", "Amount"], rows, &[0, 3]);
    format!("{table}\nTotal: {}", out.money(total_deposits(deposits)))
}

/// Expense records, one row per record, details joined into one cell.
pub fn expense_records(
    out: &Renderer,
    records: &[ExpenseRecord],
    type_names: &HashMap<ExpenseTypeId, String>,
    fund_names: &HashMap<FundId, String>,
) -> String {
    let rows = records
        .iter()
        .map(|r| {
            let details = r
                .details
                .iter()
                .map(|d| {
                    let name = type_names
                        .get(&d.expense_type_id)
                        .cloned()
                        .unwrap_or_else(|| format!("#{}", d.expense_type_id));
                    format!("{name} {}", out.money(d.amount))
                })
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                r.id.to_string(),
                out.date(r.date),
                fund_names
                    .get(&r.fund_id)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", r.fund_id)),
                r.merchant.clone().unwrap_or_else(|| MISSING.to_string()),
                r.document_type
                    .map_or_else(|| MISSING.to_string(), |d| d.to_string()),
                details,
                out.money(r.total()),
            ]
        })
        .collect();
    render(
        &["ID", "Date", "Fund", "Merchant", "Document", "Details", "Total"],
        rows,
        &[0, 6],
    )
}

/// Budget vs actual rows followed by a totals row.
pub fn comparison(out: &Renderer, report: &ComparisonReport) -> String {
    if report.rows.is_empty() {
        return EMPTY.to_string();
    }

    let mut rows: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| {
            vec![
                row.expense_type_name.clone(),
                out.money(row.budgeted),
                out.money(row.actual),
                out.signed_money(row.variance),
                out.percent(row.variance_percent),
                status_label(row.status.is_warning()).to_string(),
            ]
        })
        .collect();

    let summary = &report.summary;
    rows.push(vec![
        "Total".to_string(),
        out.money(summary.total_budgeted),
        out.money(summary.total_actual),
        out.signed_money(summary.total_variance),
        out.percent(summary.variance_percent),
        status_label(summary.status.is_warning()).to_string(),
    ]);

    render(
        &["Expense type", "Budgeted", "Actual", "Variance", "%", "Status"],
        rows,
        &[1, 2, 3, 4],
    )
}

const fn status_label(warning: bool) -> &'static str {
    if warning { "over" } else { "under" }
}

/// Movement rows followed by deposit, expense and net totals.
pub fn movements(out: &Renderer, report: &MovementReport) -> String {
    let rows = report
        .movements
        .iter()
        .map(|m| {
            vec![
                out.date(m.date),
                match m.kind {
                    MovementKind::Deposit => "deposit",
                    MovementKind::Expense => "expense",
                }
                .to_string(),
                m.description.clone(),
                out.signed_money(m.kind.signed(m.amount)),
            ]
        })
        .collect();
    let table = render(&["Date", "Type", "Description", "Amount"], rows, &[3]);

    let summary = &report.summary;
    format!(
        "{table}\nDeposits: {}\nExpenses: {}\nNet:      {}",
        out.money(summary.total_deposits),
        out.money(summary.total_expenses),
        out.signed_money(summary.net_movement),
    )
}
