//! Number, currency, and percentage formatting.
//!
//! CRITICAL: rounding is pinned to `MidpointAwayFromZero` so output never
//! depends on platform formatting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Language used for month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Spanish.
    Es,
    /// English.
    En,
    /// German.
    De,
}

/// Separators and language for a supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    /// BCP 47 tag.
    pub tag: &'static str,
    /// Thousands separator.
    pub grouping: char,
    /// Decimal separator.
    pub decimal: char,
    /// Language for month names.
    pub language: Language,
}

impl NumberLocale {
    /// Colombian Spanish: `1.234.567,80`.
    pub const ES_CO: Self = Self {
        tag: "es-CO",
        grouping: '.',
        decimal: ',',
        language: Language::Es,
    };

    /// US English: `1,234,567.80`.
    pub const EN_US: Self = Self {
        tag: "en-US",
        grouping: ',',
        decimal: '.',
        language: Language::En,
    };

    /// German: `1.234.567,80`.
    pub const DE_DE: Self = Self {
        tag: "de-DE",
        grouping: '.',
        decimal: ',',
        language: Language::De,
    };
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::ES_CO
    }
}

impl std::fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag)
    }
}

impl std::str::FromStr for NumberLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_lowercase().as_str() {
            "es-co" => Ok(Self::ES_CO),
            "en-us" => Ok(Self::EN_US),
            "de-de" => Ok(Self::DE_DE),
            _ => Err(format!("Unknown locale: {s}")),
        }
    }
}

/// Formats `value` with grouped thousands and exactly `dp` decimals.
fn format_fixed(value: Decimal, dp: u32, locale: NumberLocale) -> (bool, String) {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.*}", dp as usize, rounded.abs());

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = group_digits(int_part, locale.grouping);
    if let Some(frac) = frac_part {
        out.push(locale.decimal);
        out.push_str(frac);
    }
    (negative, out)
}

fn group_digits(int_part: &str, separator: char) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Formats an amount: `1.234.567,80` (es-CO), `-80,00` for negatives.
#[must_use]
pub fn format_amount(value: Decimal, locale: NumberLocale) -> String {
    let (negative, body) = format_fixed(value, 2, locale);
    if negative { format!("-{body}") } else { body }
}

/// Formats an amount with a currency symbol: `$1.234,00`, `-$80,00`.
#[must_use]
pub fn format_currency(value: Decimal, locale: NumberLocale, symbol: &str) -> String {
    let (negative, body) = format_fixed(value, 2, locale);
    if negative {
        format!("-{symbol}{body}")
    } else {
        format!("{symbol}{body}")
    }
}

/// Like [`format_currency`] but always signed: `+$50,00` for values `>= 0`.
#[must_use]
pub fn format_signed_currency(value: Decimal, locale: NumberLocale, symbol: &str) -> String {
    let (negative, body) = format_fixed(value, 2, locale);
    let sign = if negative { '-' } else { '+' };
    format!("{sign}{symbol}{body}")
}

/// Formats a percentage with one decimal: `-16,0%`.
#[must_use]
pub fn format_percent(value: Decimal, locale: NumberLocale) -> String {
    let (negative, body) = format_fixed(value, 1, locale);
    if negative {
        format!("-{body}%")
    } else {
        format!("{body}%")
    }
}

/// Like [`format_percent`] but always signed: `+25,0%`.
#[must_use]
pub fn format_signed_percent(value: Decimal, locale: NumberLocale) -> String {
    let (negative, body) = format_fixed(value, 1, locale);
    let sign = if negative { '-' } else { '+' };
    format!("{sign}{body}%")
}
