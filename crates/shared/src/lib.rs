//! Shared types, errors, and configuration for FinTrack.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for backend entity references
//! - Locale-aware number, currency, and date formatting
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use format::NumberLocale;
