//! Budget, expense record, and deposit data types.

use chrono::NaiveDate;
use fintrack_shared::NumberLocale;
use fintrack_shared::format::month_name;
use fintrack_shared::types::{
    BudgetId, DepositId, ExpenseDetailId, ExpenseRecordId, ExpenseTypeId, FundId, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::{
    ValidationError, non_negative_amount, optional_text, positive_amount, required,
};

/// Calendar month, `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Month(u8);

impl Month {
    /// Month number, `1..=12`.
    #[must_use]
    pub fn number(self) -> u32 {
        u32::from(self.0)
    }

    /// Full month name in the locale's language ("Enero").
    #[must_use]
    pub fn name(self, locale: NumberLocale) -> &'static str {
        month_name(self.number(), locale).unwrap_or("?")
    }
}

impl TryFrom<u32> for Month {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(m @ 1..=12) => Ok(Self(m)),
            _ => Err(ValidationError::InvalidMonth(value)),
        }
    }
}

impl From<Month> for u32 {
    fn from(month: Month) -> Self {
        month.number()
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monthly budget for one expense type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Month the budget applies to.
    pub month: Month,
    /// Expense type ID.
    pub expense_type_id: ExpenseTypeId,
    /// Expense type name, when the backend joins it in.
    pub expense_type_name: Option<String>,
    /// Budgeted amount.
    pub amount: Decimal,
}

/// Kind of supporting document for an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Receipt.
    #[serde(alias = "Receipt", alias = "Recibo", alias = "recibo")]
    Receipt,
    /// Invoice.
    #[serde(alias = "Invoice", alias = "Factura", alias = "factura")]
    Invoice,
    /// Anything else.
    #[serde(alias = "Other", alias = "Otro", alias = "otro")]
    Other,
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "receipt" | "recibo" => Ok(Self::Receipt),
            "invoice" | "factura" => Ok(Self::Invoice),
            "other" | "otro" => Ok(Self::Other),
            _ => Err(format!("Unknown document type: {s}")),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Receipt => "Receipt",
            Self::Invoice => "Invoice",
            Self::Other => "Other",
        })
    }
}

/// One line of an expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecordDetail {
    /// Detail ID.
    pub id: ExpenseDetailId,
    /// Owning record ID.
    pub expense_record_id: ExpenseRecordId,
    /// Expense type ID.
    pub expense_type_id: ExpenseTypeId,
    /// Amount.
    pub amount: Decimal,
}

/// An expense with its detail lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Record ID.
    pub id: ExpenseRecordId,
    /// Expense date.
    pub date: NaiveDate,
    /// Fund the money came from.
    pub fund_id: FundId,
    /// Merchant / store name.
    pub merchant: Option<String>,
    /// Supporting document type.
    pub document_type: Option<DocumentType>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Owner.
    pub user_id: Option<UserId>,
    /// Detail lines.
    pub details: Vec<ExpenseRecordDetail>,
}

impl ExpenseRecord {
    /// Displayed total: the sum of detail amounts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.details.iter().map(|d| d.amount).sum()
    }
}

/// A deposit into a fund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    /// Deposit ID.
    pub id: DepositId,
    /// Deposit date.
    pub date: NaiveDate,
    /// Target fund.
    pub fund_id: FundId,
    /// Fund name, when the backend joins it in.
    pub fund_name: Option<String>,
    /// Amount.
    pub amount: Decimal,
    /// Owner.
    pub user_id: Option<UserId>,
}

/// Sum of deposit amounts.
#[must_use]
pub fn total_deposits(deposits: &[Deposit]) -> Decimal {
    deposits.iter().map(|d| d.amount).sum()
}

// ============================================================================
// Drafts
// ============================================================================

/// Raw input for a budget row.
#[derive(Debug, Clone, Default)]
pub struct BudgetDraft {
    /// Month number.
    pub month: Option<u32>,
    /// Expense type.
    pub expense_type_id: Option<ExpenseTypeId>,
    /// Budgeted amount.
    pub amount: Option<Decimal>,
}

/// A validated budget row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudget {
    /// Month.
    pub month: Month,
    /// Expense type.
    pub expense_type_id: ExpenseTypeId,
    /// Amount, never negative.
    pub amount: Decimal,
}

impl BudgetDraft {
    /// Validates the draft.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for a missing field, a month outside
    /// `1..=12`, or a negative amount.
    pub fn validate(&self) -> Result<NewBudget, ValidationError> {
        let month = Month::try_from(required(self.month, "month")?)?;
        Ok(NewBudget {
            month,
            expense_type_id: required(self.expense_type_id, "expense type")?,
            amount: non_negative_amount(self.amount, "amount")?,
        })
    }
}

/// Raw input for a deposit.
#[derive(Debug, Clone, Default)]
pub struct DepositDraft {
    /// Deposit date.
    pub date: Option<NaiveDate>,
    /// Target fund.
    pub fund_id: Option<FundId>,
    /// Amount.
    pub amount: Option<Decimal>,
}

/// A validated deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeposit {
    /// Date.
    pub date: NaiveDate,
    /// Fund.
    pub fund_id: FundId,
    /// Amount, always positive.
    pub amount: Decimal,
}

impl DepositDraft {
    /// Validates the draft.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for a missing field or non-positive amount.
    pub fn validate(&self) -> Result<NewDeposit, ValidationError> {
        Ok(NewDeposit {
            date: required(self.date, "date")?,
            fund_id: required(self.fund_id, "monetary fund")?,
            amount: positive_amount(self.amount, "amount")?,
        })
    }
}

/// Raw input for one expense detail line.
#[derive(Debug, Clone, Default)]
pub struct ExpenseDetailDraft {
    /// Expense type.
    pub expense_type_id: Option<ExpenseTypeId>,
    /// Amount.
    pub amount: Option<Decimal>,
}

/// A validated expense detail line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpenseDetail {
    /// Expense type.
    pub expense_type_id: ExpenseTypeId,
    /// Amount, always positive.
    pub amount: Decimal,
}

/// Raw input for an expense record.
#[derive(Debug, Clone, Default)]
pub struct ExpenseRecordDraft {
    /// Expense date.
    pub date: Option<NaiveDate>,
    /// Fund.
    pub fund_id: Option<FundId>,
    /// Merchant.
    pub merchant: Option<String>,
    /// Document type.
    pub document_type: Option<DocumentType>,
    /// Notes.
    pub notes: Option<String>,
    /// Detail lines.
    pub details: Vec<ExpenseDetailDraft>,
}

/// A validated expense record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpenseRecord {
    /// Date.
    pub date: NaiveDate,
    /// Fund.
    pub fund_id: FundId,
    /// Merchant.
    pub merchant: Option<String>,
    /// Document type.
    pub document_type: Option<DocumentType>,
    /// Notes.
    pub notes: Option<String>,
    /// At least one detail line.
    pub details: Vec<NewExpenseDetail>,
}

impl NewExpenseRecord {
    /// Sum of detail amounts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.details.iter().map(|d| d.amount).sum()
    }
}

impl ExpenseRecordDraft {
    /// Validates the draft.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when the date or fund is missing, there
    /// are no details, or a detail lacks an expense type or positive amount.
    pub fn validate(&self) -> Result<NewExpenseRecord, ValidationError> {
        let date = required(self.date, "date")?;
        let fund_id = required(self.fund_id, "monetary fund")?;

        if self.details.is_empty() {
            return Err(ValidationError::NoDetails);
        }

        let details = self
            .details
            .iter()
            .enumerate()
            .map(|(idx, detail)| {
                let line = idx + 1;
                let expense_type_id = detail
                    .expense_type_id
                    .ok_or(ValidationError::DetailMissingExpenseType { line })?;
                let amount = detail
                    .amount
                    .filter(|a| *a > Decimal::ZERO)
                    .ok_or(ValidationError::DetailNonPositiveAmount { line })?;
                Ok(NewExpenseDetail {
                    expense_type_id,
                    amount,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(NewExpenseRecord {
            date,
            fund_id,
            merchant: optional_text(self.merchant.as_deref()),
            document_type: self.document_type,
            notes: optional_text(self.notes.as_deref()),
            details,
        })
    }
}
