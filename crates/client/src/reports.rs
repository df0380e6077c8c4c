//! Report queries: budget comparison, global totals, movements and the
//! dashboard.
//!
//! Every query normalizes the backend's field names here and hands plain
//! `fintrack-core` types to the caller. Aggregation itself is done by
//! `fintrack_core::comparison::ComparisonService`.

use fintrack_core::comparison::{ComparisonReport, ComparisonService, GlobalTotals};
use fintrack_core::dashboard::{Dashboard, RecentTransaction};
use fintrack_core::reports::{DateRange, Movement, MovementReport, ReportService};
use fintrack_shared::format::format_date;
use fintrack_shared::{AppError, AppResult};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::http::{ApiClient, Verb};
use crate::wire::{
    BudgetTotalCard, ComparisonRequest, ExpenseMonthCard, GlobalTotalsWire, MoneyMonthCard,
    MoneyTotalCard, MovementWire, OneOrMany, RawComparisonRow, RecentTransactionWire,
};

const COMPARISON_PATH: &str = "/g/comparison";
const TOTALS_PATH: &str = "/g/total/comparison";

/// Results of the five dashboard requests, each kept separately so one
/// failing card does not blank the others.
#[derive(Debug)]
pub struct DashboardFetch {
    /// Money across all funds.
    pub money_total: AppResult<Decimal>,
    /// Deposits this month.
    pub money_month: AppResult<Decimal>,
    /// Expenses this month.
    pub expense_month: AppResult<Decimal>,
    /// Total budgeted.
    pub budget_total: AppResult<Decimal>,
    /// Latest activity.
    pub recent: AppResult<Vec<RecentTransaction>>,
}

impl DashboardFetch {
    /// Writes every successful card into `dashboard` and returns the errors.
    ///
    /// A card that failed with a transport or server error keeps whatever
    /// `dashboard` held before; any other failure empties it.
    pub fn apply_to(self, dashboard: &mut Dashboard) -> Vec<AppError> {
        let mut errors = Vec::new();
        let mut apply = |slot: &mut Option<Decimal>, result: AppResult<Decimal>, card: &str| {
            match result {
                Ok(value) => *slot = Some(value),
                Err(error) => {
                    log_card_failure(card, &error);
                    if !error.keeps_stale_data() {
                        *slot = None;
                    }
                    errors.push(error);
                }
            }
        };
        apply(&mut dashboard.totals.money_total, self.money_total, "money_total");
        apply(&mut dashboard.totals.money_month, self.money_month, "money_month");
        apply(&mut dashboard.totals.expense_month, self.expense_month, "expense_month");
        apply(&mut dashboard.totals.budget_total, self.budget_total, "budget_total");

        match self.recent {
            Ok(recent) => dashboard.recent = recent,
            Err(error) => {
                log_card_failure("recent", &error);
                if !error.keeps_stale_data() {
                    dashboard.recent.clear();
                }
                errors.push(error);
            }
        }
        errors
    }

    /// Builds a fresh dashboard from the results.
    pub fn into_dashboard(self) -> (Dashboard, Vec<AppError>) {
        let mut dashboard = Dashboard::default();
        let errors = self.apply_to(&mut dashboard);
        (dashboard, errors)
    }
}

fn log_card_failure(card: &str, error: &AppError) {
    tracing::error!(
        card,
        code = error.error_code(),
        %error,
        kept_previous = error.keeps_stale_data(),
        "dashboard card failed"
    );
}

impl ApiClient {
    /// Fetches budget-vs-actual rows for `range`.
    ///
    /// Missing bounds are sent as `null`, which the backend reads as all
    /// time. An inverted range returns no rows without contacting the
    /// backend.
    pub async fn fetch_comparison(&self, range: &DateRange) -> AppResult<Vec<RawComparisonRow>> {
        if range.is_inverted() {
            tracing::debug!(?range, "inverted date range, skipping comparison request");
            return Ok(Vec::new());
        }

        let body = ComparisonRequest {
            start_date: range.start.map(format_date),
            end_date: range.end.map(format_date),
        };
        let rows: Vec<RawComparisonRow> = self
            .send_json(Method::POST, COMPARISON_PATH, &body)
            .await?;
        tracing::debug!(rows = rows.len(), ?range, "comparison fetched");
        Ok(rows)
    }

    /// Fetches the comparison for `range` and aggregates it.
    pub async fn comparison_report(&self, range: &DateRange) -> AppResult<ComparisonReport> {
        let rows = self.fetch_comparison(range).await?;
        Ok(aggregate_rows(rows))
    }

    /// Fetches the all-time comparison used on the dashboard.
    pub async fn fetch_all_comparison(&self) -> AppResult<Vec<RawComparisonRow>> {
        self.get_json(&self.resource_path(Verb::Read, "dashboard/comparison/all"))
            .await
    }

    /// Fetches the all-time comparison and aggregates it.
    pub async fn all_comparison_report(&self) -> AppResult<ComparisonReport> {
        let rows = self.fetch_all_comparison().await?;
        Ok(aggregate_rows(rows))
    }

    /// Fetches the global budget and deposit totals.
    ///
    /// This is a separate request from [`ApiClient::fetch_comparison`]; the
    /// two are not read in one transaction, so a write landing between them
    /// can make them disagree.
    pub async fn fetch_totals(&self) -> AppResult<GlobalTotals> {
        let totals: OneOrMany<GlobalTotalsWire> = self.get_json(TOTALS_PATH).await?;
        Ok(totals
            .into_first()
            .map(GlobalTotals::from)
            .unwrap_or(GlobalTotals {
                global_budget: Decimal::ZERO,
                global_deposit: Decimal::ZERO,
            }))
    }

    /// Fetches deposits and expenses inside `range` and totals them.
    ///
    /// An inverted range yields an empty report without contacting the
    /// backend.
    pub async fn movement_report(&self, range: DateRange) -> AppResult<MovementReport> {
        if range.is_inverted() {
            tracing::debug!(?range, "inverted date range, skipping movement request");
            return Ok(ReportService::generate_movement_report(range, Vec::new()));
        }

        let mut query = Vec::new();
        if let Some(start) = range.start {
            query.push(("startDate", format_date(start)));
        }
        if let Some(end) = range.end {
            query.push(("endDate", format_date(end)));
        }

        let path = self.resource_path(Verb::Read, "movement-reports");
        let rows: Vec<MovementWire> = self.get_json_with_query(&path, &query).await?;
        let movements = rows
            .into_iter()
            .map(Movement::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(ReportService::generate_movement_report(range, movements))
    }

    /// Runs the five dashboard requests concurrently.
    pub async fn fetch_dashboard(&self) -> DashboardFetch {
        let (money_total, money_month, expense_month, budget_total, recent) = tokio::join!(
            self.dashboard_card::<MoneyTotalCard>("dashboard-money-total"),
            self.dashboard_card::<MoneyMonthCard>("dashboard-money-month"),
            self.dashboard_card::<ExpenseMonthCard>("dashboard-expense-month"),
            self.dashboard_card::<BudgetTotalCard>("dashboard-budget-total"),
            self.recent_transactions(),
        );

        DashboardFetch {
            money_total,
            money_month,
            expense_month,
            budget_total,
            recent,
        }
    }

    /// Latest deposits and expenses, newest first.
    pub async fn recent_transactions(&self) -> AppResult<Vec<RecentTransaction>> {
        let path = self.resource_path(Verb::Read, "dashboard-recent-transactions");
        let rows: Vec<RecentTransactionWire> = self.get_json(&path).await?;
        Ok(rows.into_iter().map(RecentTransaction::from).collect())
    }

    async fn dashboard_card<C>(&self, resource: &str) -> AppResult<Decimal>
    where
        C: DeserializeOwned + Into<Decimal>,
    {
        let card: OneOrMany<C> = self.get_json(&self.resource_path(Verb::Read, resource)).await?;
        Ok(card.into_first().map_or(Decimal::ZERO, Into::into))
    }
}

fn aggregate_rows(rows: Vec<RawComparisonRow>) -> ComparisonReport {
    let inputs: Vec<_> = rows.into_iter().map(RawComparisonRow::into_input).collect();
    ComparisonService::aggregate(&inputs)
}
