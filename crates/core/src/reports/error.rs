//! Report error types.

use fintrack_shared::format::DateParseError;
use thiserror::Error;

/// Errors that can occur while preparing a report query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A range bound is not a `YYYY-MM-DD` date.
    #[error("Invalid date range bound: {0}")]
    InvalidDate(#[from] DateParseError),
}

impl From<ReportError> for fintrack_shared::AppError {
    fn from(err: ReportError) -> Self {
        Self::Validation(err.to_string())
    }
}
