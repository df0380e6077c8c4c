//! Date ranges and the movement report.
//!
//! A movement report lists every deposit and expense inside an inclusive
//! date range with total deposits, total expenses, and net movement.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
