//! Validation error types.

use fintrack_shared::AppError;
use thiserror::Error;

/// Form validation failures, detected before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Month outside `1..=12`.
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    /// Amount is negative.
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    /// Amount is zero or negative where a positive value is needed.
    #[error("{0} must be greater than zero")]
    NonPositiveAmount(&'static str),

    /// Expense record has no detail lines.
    #[error("At least one expense detail is required")]
    NoDetails,

    /// Detail line without an expense type.
    #[error("Detail {line}: expense type is required")]
    DetailMissingExpenseType {
        /// 1-based line number.
        line: usize,
    },

    /// Detail line with a zero or negative amount.
    #[error("Detail {line}: amount must be greater than zero")]
    DetailNonPositiveAmount {
        /// 1-based line number.
        line: usize,
    },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
