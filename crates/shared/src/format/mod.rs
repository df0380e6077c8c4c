//! Locale-aware formatting for amounts, percentages, and dates.
//!
//! Amounts always render with exactly two decimals using
//! round-half-away-from-zero; dates are calendar dates with no time-of-day.

pub mod date;
pub mod number;

pub use date::{
    DateParseError, date_only, format_date, format_date_short, month_name, parse_date_only,
};
pub use number::{
    NumberLocale, format_amount, format_currency, format_percent, format_signed_currency,
    format_signed_percent,
};
