//! CRUD calls for expense types, funds, budgets, deposits and expense records.
//!
//! Create and update calls take the validated `New*` types from
//! `fintrack-core`, so nothing unvalidated reaches the backend.

use fintrack_core::maintenance::{ExpenseType, MonetaryFund, NewExpenseType, NewMonetaryFund};
use fintrack_core::transactions::{
    Budget, Deposit, ExpenseRecord, ExpenseRecordDetail, NewBudget, NewDeposit, NewExpenseRecord,
};
use fintrack_shared::types::{BudgetId, DepositId, ExpenseRecordId, ExpenseTypeId, FundId};
use fintrack_shared::{AppError, AppResult};
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::{ApiClient, Verb};
use crate::wire::{
    BudgetBody, BudgetWire, DepositBody, DepositWire, ExpenseDetailBody, ExpenseDetailWire,
    ExpenseRecordBody, ExpenseRecordWire, ExpenseTypeBody, ExpenseTypeWire, MonetaryFundBody,
    MonetaryFundWire, created_id,
};

const EXPENSE_TYPES: &str = "expense-types";
const MONETARY_FUNDS: &str = "monetary-funds";
const BUDGETS: &str = "budget";
const DEPOSITS: &str = "deposit-records";
const EXPENSE_RECORDS: &str = "expense-records";
const EXPENSE_DETAILS: &str = "expense-records-details";

impl ApiClient {
    async fn list_rows<W: DeserializeOwned>(&self, resource: &str) -> AppResult<Vec<W>> {
        self.get_json(&self.resource_path(Verb::Read, resource)).await
    }

    async fn delete_item(&self, resource: &str, id: impl std::fmt::Display) -> AppResult<()> {
        let path = self.item_path(Verb::Delete, resource, &id);
        self.send_unit::<()>(Verb::Delete.method(), &path, None).await?;
        tracing::info!(resource, %id, "deleted");
        Ok(())
    }

    // ── Expense types ──────────────────────────────────────────────

    /// Lists expense types.
    pub async fn list_expense_types(&self) -> AppResult<Vec<ExpenseType>> {
        let rows: Vec<ExpenseTypeWire> = self.list_rows(EXPENSE_TYPES).await?;
        Ok(rows.into_iter().map(ExpenseType::from).collect())
    }

    /// Creates an expense type.
    pub async fn create_expense_type(&self, expense_type: &NewExpenseType) -> AppResult<()> {
        let path = self.resource_path(Verb::Insert, EXPENSE_TYPES);
        self.send_unit(Verb::Insert.method(), &path, Some(&expense_type_body(expense_type)))
            .await?;
        tracing::info!(name = %expense_type.name, "expense type created");
        Ok(())
    }

    /// Replaces an expense type's fields.
    pub async fn update_expense_type(
        &self,
        id: ExpenseTypeId,
        expense_type: &NewExpenseType,
    ) -> AppResult<()> {
        let path = self.item_path(Verb::Update, EXPENSE_TYPES, id);
        self.send_unit(Verb::Update.method(), &path, Some(&expense_type_body(expense_type)))
            .await?;
        tracing::info!(%id, "expense type updated");
        Ok(())
    }

    /// Deletes an expense type.
    pub async fn delete_expense_type(&self, id: ExpenseTypeId) -> AppResult<()> {
        self.delete_item(EXPENSE_TYPES, id).await
    }

    // ── Monetary funds ─────────────────────────────────────────────

    /// Lists monetary funds.
    pub async fn list_funds(&self) -> AppResult<Vec<MonetaryFund>> {
        let rows: Vec<MonetaryFundWire> = self.list_rows(MONETARY_FUNDS).await?;
        Ok(rows.into_iter().map(MonetaryFund::from).collect())
    }

    /// Creates a monetary fund.
    pub async fn create_fund(&self, fund: &NewMonetaryFund) -> AppResult<()> {
        let path = self.resource_path(Verb::Insert, MONETARY_FUNDS);
        self.send_unit(Verb::Insert.method(), &path, Some(&fund_body(fund)))
            .await?;
        tracing::info!(name = %fund.name, kind = %fund.kind, "fund created");
        Ok(())
    }

    /// Replaces a monetary fund's fields.
    pub async fn update_fund(&self, id: FundId, fund: &NewMonetaryFund) -> AppResult<()> {
        let path = self.item_path(Verb::Update, MONETARY_FUNDS, id);
        self.send_unit(Verb::Update.method(), &path, Some(&fund_body(fund)))
            .await?;
        tracing::info!(%id, "fund updated");
        Ok(())
    }

    /// Deletes a monetary fund.
    pub async fn delete_fund(&self, id: FundId) -> AppResult<()> {
        self.delete_item(MONETARY_FUNDS, id).await
    }

    // ── Budgets ────────────────────────────────────────────────────

    /// Lists budgets, with expense type names when the backend joins them.
    pub async fn list_budgets(&self) -> AppResult<Vec<Budget>> {
        let rows: Vec<BudgetWire> = self.list_rows(BUDGETS).await?;
        rows.into_iter().map(Budget::try_from).collect()
    }

    /// Creates a budget row.
    pub async fn create_budget(&self, budget: &NewBudget) -> AppResult<()> {
        let path = self.resource_path(Verb::Insert, BUDGETS);
        let body = BudgetBody {
            month: budget.month.number(),
            expense_type_id: budget.expense_type_id,
            amount: budget.amount,
        };
        self.send_unit(Verb::Insert.method(), &path, Some(&body)).await?;
        tracing::info!(
            month = budget.month.number(),
            expense_type = %budget.expense_type_id,
            amount = %budget.amount,
            "budget created"
        );
        Ok(())
    }

    /// Deletes a budget row.
    pub async fn delete_budget(&self, id: BudgetId) -> AppResult<()> {
        self.delete_item(BUDGETS, id).await
    }

    // ── Deposits ───────────────────────────────────────────────────

    /// Lists deposits.
    pub async fn list_deposits(&self) -> AppResult<Vec<Deposit>> {
        let rows: Vec<DepositWire> = self.list_rows(DEPOSITS).await?;
        Ok(rows.into_iter().map(Deposit::from).collect())
    }

    /// Records a deposit.
    pub async fn create_deposit(&self, deposit: &NewDeposit) -> AppResult<()> {
        let path = self.resource_path(Verb::Insert, DEPOSITS);
        let body = DepositBody {
            date: deposit.date,
            fund_id: deposit.fund_id,
            amount: deposit.amount,
        };
        self.send_unit(Verb::Insert.method(), &path, Some(&body)).await?;
        tracing::info!(fund = %deposit.fund_id, amount = %deposit.amount, "deposit created");
        Ok(())
    }

    /// Deletes a deposit.
    pub async fn delete_deposit(&self, id: DepositId) -> AppResult<()> {
        self.delete_item(DEPOSITS, id).await
    }

    // ── Expense records ────────────────────────────────────────────

    /// Lists expense records with their detail lines.
    ///
    /// Details are fetched per record, concurrently.
    pub async fn list_expense_records(&self) -> AppResult<Vec<ExpenseRecord>> {
        let headers: Vec<ExpenseRecordWire> = self.list_rows(EXPENSE_RECORDS).await?;

        let details = try_join_all(headers.iter().map(|h| self.list_expense_details(h.id))).await?;

        Ok(headers
            .into_iter()
            .zip(details)
            .map(|(header, details)| header.with_details(details))
            .collect())
    }

    /// Lists the detail lines of one expense record.
    pub async fn list_expense_details(
        &self,
        record_id: ExpenseRecordId,
    ) -> AppResult<Vec<ExpenseRecordDetail>> {
        let path = self.resource_path(Verb::Read, EXPENSE_DETAILS);
        let rows: Vec<ExpenseDetailWire> = self
            .get_json_with_query(&path, &[("expenseRecordId", record_id.into_inner())])
            .await?;
        Ok(rows.into_iter().map(ExpenseRecordDetail::from).collect())
    }

    /// Saves an expense record: the header first, then one request per detail.
    ///
    /// The writes are not atomic. If a detail fails, the header and any
    /// earlier details stay on the backend and the error is returned.
    pub async fn create_expense_record(
        &self,
        record: &NewExpenseRecord,
    ) -> AppResult<ExpenseRecordId> {
        let path = self.resource_path(Verb::Insert, EXPENSE_RECORDS);
        let header = ExpenseRecordBody {
            date: record.date,
            fund_id: record.fund_id,
            merchant: record.merchant.as_deref(),
            document_type: record.document_type,
            notes: record.notes.as_deref(),
        };
        let created: Value = self.send_json(Verb::Insert.method(), &path, &header).await?;
        let record_id = created_id(&created, &["RegistroGastoID", "expenseRecordId"])
            .map(ExpenseRecordId::new)
            .ok_or_else(|| {
                AppError::Decode(format!("expense record created without an id: {created}"))
            })?;

        let detail_path = self.resource_path(Verb::Insert, EXPENSE_DETAILS);
        for (index, detail) in record.details.iter().enumerate() {
            let body = ExpenseDetailBody {
                expense_record_id: record_id,
                expense_type_id: detail.expense_type_id,
                amount: detail.amount,
            };
            if let Err(error) = self
                .send_unit(Verb::Insert.method(), &detail_path, Some(&body))
                .await
            {
                tracing::error!(
                    record = %record_id,
                    line = index + 1,
                    saved = index,
                    %error,
                    "expense detail failed, record left partially saved"
                );
                return Err(error);
            }
        }

        tracing::info!(
            record = %record_id,
            details = record.details.len(),
            total = %record.total(),
            "expense record created"
        );
        Ok(record_id)
    }

    /// Deletes an expense record.
    pub async fn delete_expense_record(&self, id: ExpenseRecordId) -> AppResult<()> {
        self.delete_item(EXPENSE_RECORDS, id).await
    }
}

fn expense_type_body(expense_type: &NewExpenseType) -> ExpenseTypeBody<'_> {
    ExpenseTypeBody {
        code: &expense_type.code,
        name: &expense_type.name,
        description: &expense_type.description,
    }
}

fn fund_body(fund: &NewMonetaryFund) -> MonetaryFundBody<'_> {
    MonetaryFundBody {
        name: &fund.name,
        kind: fund.kind,
    }
}
