//! Backend payload shapes.
//!
//! The backend speaks Spanish column names (`TipoGastoID`, `Monto`, ...) on
//! most endpoints and camelCase English on a few. Every response struct
//! accepts both, and amounts may arrive as numbers, numeric strings or
//! `null`. Nothing outside this module sees these shapes.

use std::str::FromStr;

use chrono::NaiveDate;
use fintrack_core::comparison::{ComparisonInput, GlobalTotals};
use fintrack_core::dashboard::{RecentTransaction, TransactionKind};
use fintrack_core::maintenance::{ExpenseType, FundKind, MonetaryFund};
use fintrack_core::reports::{Movement, MovementKind};
use fintrack_core::transactions::{
    Budget, Deposit, DocumentType, ExpenseRecord, ExpenseRecordDetail, Month,
};
use fintrack_shared::format::{date_only, parse_date_only};
use fintrack_shared::types::{
    BudgetId, DepositId, ExpenseDetailId, ExpenseRecordId, ExpenseTypeId, FundId, UserId,
};
use fintrack_shared::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Field helpers ──────────────────────────────────────────────────

/// Parses a backend amount. `null` and blank strings are zero.
pub(crate) fn parse_amount(value: &Value) -> Result<Decimal, String> {
    match value {
        Value::Null => Ok(Decimal::ZERO),
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(raw) if raw.trim().is_empty() => Ok(Decimal::ZERO),
        Value::String(raw) => parse_decimal(raw.trim()),
        other => Err(format!("expected an amount, got {other}")),
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| format!("invalid amount {raw:?}: {e}"))
}

fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let value = Value::deserialize(deserializer)?;
    parse_amount(&value).map_err(serde::de::Error::custom)
}

fn optional_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => parse_amount(&value).map(Some).map_err(serde::de::Error::custom),
    }
}

fn optional_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse_date_only(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Either a bare object or an array of them.
///
/// Several endpoints wrap a single row in a one-element array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    /// Array form.
    Many(Vec<T>),
    /// Bare object form.
    One(T),
}

impl<T> OneOrMany<T> {
    /// First row, if any.
    pub(crate) fn into_first(self) -> Option<T> {
        match self {
            Self::Many(rows) => rows.into_iter().next(),
            Self::One(row) => Some(row),
        }
    }
}

// ── Auth ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserWire {
    #[serde(alias = "UsuarioID", alias = "userId")]
    pub id: UserId,
    #[serde(alias = "Usuario", alias = "NombreUsuario")]
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
    pub user: UserWire,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValidateResponse {
    pub user: UserWire,
}

// ── Maintenance ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct ExpenseTypeWire {
    #[serde(rename = "TipoGastoID", alias = "id")]
    id: ExpenseTypeId,
    #[serde(rename = "Codigo", alias = "code", default)]
    code: Option<String>,
    #[serde(rename = "Nombre", alias = "name")]
    name: String,
    #[serde(rename = "Descripcion", alias = "description", default)]
    description: Option<String>,
}

impl From<ExpenseTypeWire> for ExpenseType {
    fn from(wire: ExpenseTypeWire) -> Self {
        Self {
            id: wire.id,
            code: wire.code.unwrap_or_default(),
            name: wire.name,
            description: wire.description.filter(|d| !d.trim().is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ExpenseTypeBody<'a> {
    #[serde(rename = "Codigo")]
    pub code: &'a str,
    #[serde(rename = "Nombre")]
    pub name: &'a str,
    #[serde(rename = "Descripcion")]
    pub description: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MonetaryFundWire {
    #[serde(rename = "FondoID", alias = "id")]
    id: FundId,
    #[serde(rename = "Nombre", alias = "name")]
    name: String,
    #[serde(rename = "Tipo", alias = "kind", alias = "type")]
    kind: FundKind,
}

impl From<MonetaryFundWire> for MonetaryFund {
    fn from(wire: MonetaryFundWire) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            kind: wire.kind,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MonetaryFundBody<'a> {
    #[serde(rename = "Nombre")]
    pub name: &'a str,
    #[serde(rename = "Tipo")]
    pub kind: FundKind,
}

// ── Transactions ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct BudgetWire {
    #[serde(rename = "PresupuestoID", alias = "id")]
    id: BudgetId,
    #[serde(rename = "Mes", alias = "month")]
    month: u32,
    #[serde(rename = "TipoGastoID", alias = "expenseTypeId")]
    expense_type_id: ExpenseTypeId,
    #[serde(rename = "Nombre", alias = "NombreTipoGasto", alias = "expenseTypeName", default)]
    expense_type_name: Option<String>,
    #[serde(rename = "Monto", alias = "amount", default, deserialize_with = "amount")]
    amount: Decimal,
}

impl TryFrom<BudgetWire> for Budget {
    type Error = AppError;

    fn try_from(wire: BudgetWire) -> AppResult<Self> {
        let month = Month::try_from(wire.month)
            .map_err(|e| AppError::Decode(format!("budget {}: {e}", wire.id)))?;
        Ok(Self {
            id: wire.id,
            month,
            expense_type_id: wire.expense_type_id,
            expense_type_name: wire.expense_type_name,
            amount: wire.amount,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BudgetBody {
    #[serde(rename = "Mes")]
    pub month: u32,
    #[serde(rename = "TipoGastoID")]
    pub expense_type_id: ExpenseTypeId,
    #[serde(rename = "Monto")]
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DepositWire {
    #[serde(rename = "DepositoID", alias = "id")]
    id: DepositId,
    #[serde(rename = "Fecha", alias = "date", with = "date_only")]
    date: NaiveDate,
    #[serde(rename = "FondoID", alias = "fundId")]
    fund_id: FundId,
    #[serde(rename = "Nombre", alias = "NombreFondo", alias = "fundName", default)]
    fund_name: Option<String>,
    #[serde(rename = "Monto", alias = "amount", default, deserialize_with = "amount")]
    amount: Decimal,
    #[serde(rename = "UsuarioID", alias = "userId", default)]
    user_id: Option<UserId>,
}

impl From<DepositWire> for Deposit {
    fn from(wire: DepositWire) -> Self {
        Self {
            id: wire.id,
            date: wire.date,
            fund_id: wire.fund_id,
            fund_name: wire.fund_name,
            amount: wire.amount,
            user_id: wire.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DepositBody {
    #[serde(rename = "Fecha", with = "date_only")]
    pub date: NaiveDate,
    #[serde(rename = "FondoID")]
    pub fund_id: FundId,
    #[serde(rename = "Monto")]
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExpenseRecordWire {
    #[serde(rename = "RegistroGastoID", alias = "id")]
    pub id: ExpenseRecordId,
    #[serde(rename = "Fecha", alias = "date", with = "date_only")]
    date: NaiveDate,
    #[serde(rename = "FondoID", alias = "fundId", alias = "monetaryFund")]
    fund_id: FundId,
    #[serde(rename = "Comercio", alias = "merchant", alias = "storeName", default)]
    merchant: Option<String>,
    #[serde(rename = "TipoDocumento", alias = "documentType", default)]
    document_type: Option<DocumentType>,
    #[serde(rename = "Observaciones", alias = "notes", alias = "comments", default)]
    notes: Option<String>,
    #[serde(rename = "UsuarioID", alias = "userId", default)]
    user_id: Option<UserId>,
}

impl ExpenseRecordWire {
    /// Attaches the record's detail lines.
    pub(crate) fn with_details(self, details: Vec<ExpenseRecordDetail>) -> ExpenseRecord {
        ExpenseRecord {
            id: self.id,
            date: self.date,
            fund_id: self.fund_id,
            merchant: self.merchant,
            document_type: self.document_type,
            notes: self.notes,
            user_id: self.user_id,
            details,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ExpenseRecordBody<'a> {
    #[serde(rename = "Fecha", with = "date_only")]
    pub date: NaiveDate,
    #[serde(rename = "FondoID")]
    pub fund_id: FundId,
    #[serde(rename = "Comercio")]
    pub merchant: Option<&'a str>,
    #[serde(rename = "TipoDocumento")]
    pub document_type: Option<DocumentType>,
    #[serde(rename = "Observaciones")]
    pub notes: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExpenseDetailWire {
    #[serde(rename = "DetalleID", alias = "id")]
    id: ExpenseDetailId,
    #[serde(rename = "RegistroGastoID", alias = "expenseRecordId")]
    expense_record_id: ExpenseRecordId,
    #[serde(rename = "TipoGastoID", alias = "expenseTypeId")]
    expense_type_id: ExpenseTypeId,
    #[serde(rename = "Monto", alias = "amount", default, deserialize_with = "amount")]
    amount: Decimal,
}

impl From<ExpenseDetailWire> for ExpenseRecordDetail {
    fn from(wire: ExpenseDetailWire) -> Self {
        Self {
            id: wire.id,
            expense_record_id: wire.expense_record_id,
            expense_type_id: wire.expense_type_id,
            amount: wire.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ExpenseDetailBody {
    #[serde(rename = "RegistroGastoID")]
    pub expense_record_id: ExpenseRecordId,
    #[serde(rename = "TipoGastoID")]
    pub expense_type_id: ExpenseTypeId,
    #[serde(rename = "Monto")]
    pub amount: Decimal,
}

/// Extracts the id of a freshly created row from a create response.
///
/// Accepts a bare number, an object carrying one of `keys`, `id` or
/// `insertId`, or a one-element array of either.
pub(crate) fn created_id(value: &Value, keys: &[&str]) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Array(rows) => rows.first().and_then(|row| created_id(row, keys)),
        Value::Object(map) => keys
            .iter()
            .copied()
            .chain(["id", "insertId"])
            .find_map(|key| map.get(key))
            .and_then(|v| match v {
                Value::Object(_) | Value::Array(_) => None,
                scalar => created_id(scalar, keys),
            }),
        _ => None,
    }
}

// ── Reports ────────────────────────────────────────────────────────

/// One budget-vs-actual row as the backend sent it.
///
/// Server-computed difference and percentage are not trusted; the
/// difference is kept only to log disagreements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawComparisonRow {
    /// Expense type name.
    #[serde(rename = "TipoGasto", alias = "expenseType")]
    pub expense_type: String,
    /// Budgeted amount.
    #[serde(rename = "Presupuesto", alias = "budgeted", default, deserialize_with = "amount")]
    pub budgeted: Decimal,
    /// Actual spending.
    #[serde(rename = "GastoActual", alias = "actual", default, deserialize_with = "amount")]
    pub actual: Decimal,
    /// Difference as computed by the server, if it sent one.
    #[serde(
        rename = "Diferencia",
        alias = "variance",
        default,
        deserialize_with = "optional_amount"
    )]
    pub server_variance: Option<Decimal>,
}

impl RawComparisonRow {
    /// Converts to engine input, logging when the server's difference
    /// disagrees with `actual - budgeted`.
    #[must_use]
    pub fn into_input(self) -> ComparisonInput {
        if let Some(server) = self.server_variance {
            let local = self.actual - self.budgeted;
            if server != local && server != -local {
                tracing::debug!(
                    expense_type = %self.expense_type,
                    %server,
                    %local,
                    "server difference disagrees with recomputed variance"
                );
            }
        }
        ComparisonInput::new(self.expense_type, self.budgeted, self.actual)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ComparisonRequest {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlobalTotalsWire {
    #[serde(rename = "PresupuestoGlobal", alias = "globalBudget", default, deserialize_with = "amount")]
    global_budget: Decimal,
    #[serde(rename = "DepositoGlobal", alias = "globalDeposit", default, deserialize_with = "amount")]
    global_deposit: Decimal,
}

impl From<GlobalTotalsWire> for GlobalTotals {
    fn from(wire: GlobalTotalsWire) -> Self {
        Self {
            global_budget: wire.global_budget,
            global_deposit: wire.global_deposit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MovementWire {
    date: String,
    #[serde(rename = "type", alias = "kind")]
    kind: MovementKind,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "amount")]
    amount: Decimal,
}

impl TryFrom<MovementWire> for Movement {
    type Error = AppError;

    fn try_from(wire: MovementWire) -> AppResult<Self> {
        let date = parse_date_only(&wire.date).map_err(|e| AppError::Decode(e.to_string()))?;
        Ok(Self {
            date,
            kind: wire.kind,
            description: wire.description.unwrap_or_default(),
            amount: wire.amount,
        })
    }
}

// ── Dashboard ──────────────────────────────────────────────────────

macro_rules! dashboard_card {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Deserialize)]
        pub(crate) struct $name {
            #[serde(rename = $field, alias = "total", default, deserialize_with = "amount")]
            value: Decimal,
        }

        impl From<$name> for Decimal {
            fn from(card: $name) -> Self {
                card.value
            }
        }
    };
}

dashboard_card!(
    /// `GET /dashboard-money-total`.
    MoneyTotalCard,
    "TotalIngresos"
);
dashboard_card!(
    /// `GET /dashboard-money-month`.
    MoneyMonthCard,
    "TotalIngresosDelMes"
);
dashboard_card!(
    /// `GET /dashboard-expense-month`.
    ExpenseMonthCard,
    "TotalGastos"
);
dashboard_card!(
    /// `GET /dashboard-budget-total`.
    BudgetTotalCard,
    "TotalPresupuestado"
);

#[derive(Debug, Deserialize)]
pub(crate) struct RecentTransactionWire {
    #[serde(rename = "TipoTransaccion", alias = "type")]
    kind: TransactionKind,
    #[serde(rename = "Comercio", alias = "merchant", default)]
    merchant: Option<String>,
    #[serde(rename = "NombreGasto", alias = "expenseType", default)]
    expense_type: Option<String>,
    #[serde(rename = "NombreFondo", alias = "fundName", default)]
    fund_name: Option<String>,
    #[serde(rename = "Monto", alias = "amount", default, deserialize_with = "amount")]
    amount: Decimal,
    #[serde(rename = "Fecha", alias = "date", default, deserialize_with = "optional_date")]
    date: Option<NaiveDate>,
}

impl From<RecentTransactionWire> for RecentTransaction {
    fn from(wire: RecentTransactionWire) -> Self {
        let (title, subtitle) = match wire.kind {
            TransactionKind::Expense => (
                wire.merchant.unwrap_or_else(|| "Gasto".to_string()),
                wire.expense_type,
            ),
            TransactionKind::Deposit => ("Depósito".to_string(), wire.fund_name),
        };
        Self {
            kind: wire.kind,
            title,
            subtitle,
            amount: wire.amount,
            date: wire.date,
        }
    }
}
