//! Budget vs actual comparison.
//!
//! Turns per-category `(budgeted, actual)` pairs into display rows and
//! summary totals. Everything here is a pure function of its input.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ComparisonService;
pub use types::{
    ComparisonInput, ComparisonReport, ComparisonRow, ComparisonSummary, GlobalTotals,
    VariancePercent, VarianceStatus,
};
