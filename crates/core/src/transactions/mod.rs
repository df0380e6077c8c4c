//! Budgets, expense records, and deposits.

pub mod types;


pub use types::{
    Budget, BudgetDraft, Deposit, DepositDraft, DocumentType, ExpenseDetailDraft, ExpenseRecord,
    ExpenseRecordDetail, ExpenseRecordDraft, Month, NewBudget, NewDeposit, NewExpenseDetail,
    NewExpenseRecord, total_deposits,
};
