//! Tests for date ranges and movement reports.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::ReportService;
use super::types::{DateRange, Movement, MovementKind};
use super::ReportError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn movement(day: u32, kind: MovementKind, amount: Decimal) -> Movement {
    Movement {
        date: date(2024, 3, day),
        kind,
        description: format!("{kind:?} on {day}"),
        amount,
    }
}

fn sample() -> Vec<Movement> {
    vec![
        movement(1, MovementKind::Deposit, dec!(1000)),
        movement(5, MovementKind::Expense, dec!(120.50)),
        movement(10, MovementKind::Expense, dec!(79.50)),
        movement(20, MovementKind::Deposit, dec!(300)),
    ]
}

#[test]
fn test_unbounded_range_keeps_everything() {
    let report = ReportService::generate_movement_report(DateRange::all(), sample());

    assert_eq!(report.movements.len(), 4);
    assert_eq!(report.summary.total_deposits, dec!(1300));
    assert_eq!(report.summary.total_expenses, dec!(200));
    assert_eq!(report.summary.net_movement, dec!(1100));
}

#[test]
fn test_bounds_are_inclusive() {
    let range = DateRange::new(Some(date(2024, 3, 5)), Some(date(2024, 3, 10)));
    let report = ReportService::generate_movement_report(range, sample());

    assert_eq!(report.movements.len(), 2);
    assert_eq!(report.summary.total_deposits, dec!(0));
    assert_eq!(report.summary.total_expenses, dec!(200));
    assert_eq!(report.summary.net_movement, dec!(-200));
}

#[test]
fn test_open_ended_ranges() {
    let from = DateRange::new(Some(date(2024, 3, 10)), None);
    assert_eq!(ReportService::filter_movements(&from, sample()).len(), 2);

    let until = DateRange::new(None, Some(date(2024, 3, 1)));
    assert_eq!(ReportService::filter_movements(&until, sample()).len(), 1);
}

#[test]
fn test_start_after_all_and_end_before_all_is_empty() {
    let range = DateRange::new(Some(date(2024, 12, 31)), Some(date(2024, 1, 1)));
    assert!(range.is_inverted());

    let report = ReportService::generate_movement_report(range, sample());

    assert!(report.movements.is_empty());
    assert_eq!(report.summary.total_deposits, dec!(0));
    assert_eq!(report.summary.net_movement, dec!(0));
}

#[test]
fn test_parse_blank_bounds() {
    let range = DateRange::parse(Some(""), Some("  ")).unwrap();
    assert!(range.is_unbounded());

    let range = DateRange::parse(Some("2024-03-01"), Some("2024-03-31T00:00:00Z")).unwrap();
    assert_eq!(range.start, Some(date(2024, 3, 1)));
    assert_eq!(range.end, Some(date(2024, 3, 31)));
}

#[test]
fn test_parse_invalid_bound() {
    assert!(matches!(
        DateRange::parse(Some("03/01/2024"), None),
        Err(ReportError::InvalidDate(_))
    ));
}

#[test]
fn test_movement_kind_aliases() {
    let kind: MovementKind = serde_json::from_str("\"Gasto\"").unwrap();
    assert_eq!(kind, MovementKind::Expense);
    let kind: MovementKind = serde_json::from_str("\"deposit\"").unwrap();
    assert_eq!(kind, MovementKind::Deposit);
    assert_eq!(MovementKind::Expense.signed(dec!(5)), dec!(-5));
}

proptest! {
    /// Net movement equals the signed sum of the filtered movements.
    #[test]
    fn test_net_is_signed_sum(
        raw in prop::collection::vec((1u32..29, any::<bool>(), 0i64..10_000_000), 0..30),
        start in 1u32..29,
        len in 0u32..28,
    ) {
        let movements: Vec<Movement> = raw
            .iter()
            .map(|(day, deposit, cents)| {
                let kind = if *deposit { MovementKind::Deposit } else { MovementKind::Expense };
                movement(*day, kind, Decimal::new(*cents, 2))
            })
            .collect();
        let end = (start + len).min(28);
        let range = DateRange::new(Some(date(2024, 3, start)), Some(date(2024, 3, end)));

        let report = ReportService::generate_movement_report(range, movements);
        let signed: Decimal = report.movements.iter().map(|m| m.kind.signed(m.amount)).sum();

        prop_assert_eq!(report.summary.net_movement, signed);
        prop_assert!(report.movements.iter().all(|m| range.contains(m.date)));
    }
}
