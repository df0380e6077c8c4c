//! Core business logic for FinTrack.
//!
//! This crate contains pure business logic with ZERO web or storage dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `maintenance` - Expense types and monetary funds
//! - `transactions` - Budgets, expense records, and deposits
//! - `validation` - Form validation performed before submission
//! - `comparison` - Budget vs actual aggregation engine
//! - `budget` - Budget overrun checks for expense record drafts
//! - `reports` - Date ranges and movement reports
//! - `dashboard` - Dashboard cards and recent activity

pub mod budget;
pub mod comparison;
pub mod dashboard;
pub mod maintenance;
pub mod reports;
pub mod transactions;
pub mod validation;
