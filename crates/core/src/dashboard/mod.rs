//! Dashboard cards and recent activity.
//!
//! The dashboard is four headline amounts plus a short feed of the latest
//! deposits and expenses. Each card is fetched independently, so every
//! amount here is optional: `None` means the card has not loaded.

pub mod types;

pub use types::*;
