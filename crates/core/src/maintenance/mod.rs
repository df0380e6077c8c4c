//! Lookup data maintained by the user: expense types and monetary funds.

pub mod types;

pub use types::{
    ExpenseType, ExpenseTypeDraft, FundKind, MonetaryFund, MonetaryFundDraft, NewExpenseType,
    NewMonetaryFund,
};
