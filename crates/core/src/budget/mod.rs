//! Budget checks applied while recording expenses.

pub mod overrun;

#[cfg(test)]
mod tests;

pub use overrun::{BudgetOverrun, find_overruns};
