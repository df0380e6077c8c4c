//! Expense type and monetary fund data types.

use fintrack_shared::NumberLocale;
use fintrack_shared::format::number::Language;
use fintrack_shared::types::{ExpenseTypeId, FundId};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, optional_text, required, required_text};

/// An expense category (e.g. "Food & Dining").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseType {
    /// Expense type ID.
    pub id: ExpenseTypeId,
    /// Short code. Empty when the backend does not assign one.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Kind of monetary fund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundKind {
    /// Bank account.
    BankAccount,
    /// Cash kept for small expenses.
    PettyCash,
}

impl FundKind {
    /// Human label in the locale's language.
    #[must_use]
    pub const fn label(self, locale: NumberLocale) -> &'static str {
        match (self, locale.language) {
            (Self::BankAccount, Language::Es) => "Cuenta bancaria",
            (Self::PettyCash, Language::Es) => "Dinero para gastos menores",
            (Self::BankAccount, Language::De) => "Bankkonto",
            (Self::PettyCash, Language::De) => "Handkasse",
            (Self::BankAccount, Language::En) => "Bank account",
            (Self::PettyCash, Language::En) => "Petty cash",
        }
    }

    /// Wire value (`bank_account` / `petty_cash`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BankAccount => "bank_account",
            Self::PettyCash => "petty_cash",
        }
    }
}

impl std::fmt::Display for FundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FundKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "bank_account" | "bank" => Ok(Self::BankAccount),
            "petty_cash" | "cash" => Ok(Self::PettyCash),
            _ => Err(format!("Unknown fund kind: {s}")),
        }
    }
}

/// A bank account or petty-cash fund that money moves in and out of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryFund {
    /// Fund ID.
    pub id: FundId,
    /// Display name.
    pub name: String,
    /// Fund kind.
    pub kind: FundKind,
}

/// Raw input for creating or editing an expense type.
#[derive(Debug, Clone, Default)]
pub struct ExpenseTypeDraft {
    /// Optional code.
    pub code: Option<String>,
    /// Name (required).
    pub name: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

/// A validated expense type ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpenseType {
    /// Code, possibly empty.
    pub code: String,
    /// Name.
    pub name: String,
    /// Description, possibly empty.
    pub description: String,
}

impl ExpenseTypeDraft {
    /// Validates the draft.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` when the name is blank.
    pub fn validate(&self) -> Result<NewExpenseType, ValidationError> {
        Ok(NewExpenseType {
            code: optional_text(self.code.as_deref()).unwrap_or_default(),
            name: required_text(self.name.as_deref(), "name")?,
            description: optional_text(self.description.as_deref()).unwrap_or_default(),
        })
    }
}

/// Raw input for creating or editing a monetary fund.
#[derive(Debug, Clone, Default)]
pub struct MonetaryFundDraft {
    /// Name (required).
    pub name: Option<String>,
    /// Kind (required).
    pub kind: Option<FundKind>,
}

/// A validated monetary fund ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMonetaryFund {
    /// Name.
    pub name: String,
    /// Kind.
    pub kind: FundKind,
}

impl MonetaryFundDraft {
    /// Validates the draft.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` when the name or kind is missing.
    pub fn validate(&self) -> Result<NewMonetaryFund, ValidationError> {
        Ok(NewMonetaryFund {
            name: required_text(self.name.as_deref(), "name")?,
            kind: required(self.kind, "kind")?,
        })
    }
}
