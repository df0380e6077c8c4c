//! Turns report and entity values into terminal output.
//!
//! Every printable value goes through [`Renderer::print`], which writes
//! pretty JSON or the human rendering chosen by the caller. Human
//! renderings are plain functions returning `String` so they can be tested
//! without a terminal.

pub mod cards;
pub mod chart;
pub mod table;

use chrono::NaiveDate;
use colored::Colorize;
use fintrack_core::comparison::{VariancePercent, VarianceStatus};
use fintrack_shared::NumberLocale;
use fintrack_shared::format::{
    format_currency, format_date_short, format_signed_currency, format_signed_percent,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Shown where a value could not be loaded.
pub const MISSING: &str = "-";

/// Output settings for one run.
#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    locale: NumberLocale,
    symbol: String,
}

impl Renderer {
    pub fn new(format: OutputFormat, locale: NumberLocale, symbol: impl Into<String>) -> Self {
        Self {
            format,
            locale,
            symbol: symbol.into(),
        }
    }

    pub const fn locale(&self) -> NumberLocale {
        self.locale
    }

    pub const fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Prints `value` as JSON, or as whatever `human` renders it to.
    pub fn print<T, F>(&self, value: &T, human: F) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&Self, &T) -> String,
    {
        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Table => human(self, value),
        };
        println!("{rendered}");
        Ok(())
    }

    /// Prints a status line. Suppressed in JSON mode so stdout stays
    /// parseable.
    pub fn note(&self, message: impl std::fmt::Display) {
        if !self.is_json() {
            println!("{message}");
        }
    }

    /// Prints a warning to stderr.
    pub fn warn(&self, message: impl std::fmt::Display) {
        eprintln!("{} {message}", "warning:".yellow().bold());
    }

    pub fn money(&self, value: Decimal) -> String {
        format_currency(value, self.locale, &self.symbol)
    }

    pub fn signed_money(&self, value: Decimal) -> String {
        format_signed_currency(value, self.locale, &self.symbol)
    }

    pub fn optional_money(&self, value: Option<Decimal>) -> String {
        value.map_or_else(|| MISSING.to_string(), |v| self.money(v))
    }

    /// Signed percentage, `N/A` for spending against a zero budget.
    pub fn percent(&self, value: VariancePercent) -> String {
        value
            .as_decimal()
            .map_or_else(|| "N/A".to_string(), |p| format_signed_percent(p, self.locale))
    }

    pub fn date(&self, date: NaiveDate) -> String {
        format_date_short(date, self.locale)
    }
}

/// Red for at-or-over budget, green for under budget.
pub fn paint(text: &str, status: VarianceStatus) -> String {
    if status.is_warning() {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    pub(crate) fn renderer() -> Renderer {
        Renderer::new(OutputFormat::Table, NumberLocale::ES_CO, "$")
    }

    #[test]
    fn test_money_formats() {
        let out = renderer();
        assert_eq!(out.money(dec!(1234567.8)), "$1.234.567,80");
        assert_eq!(out.money(dec!(-80)), "-$80,00");
        assert_eq!(out.signed_money(dec!(50)), "+$50,00");
        assert_eq!(out.optional_money(None), MISSING);
    }

    #[test]
    fn test_percent_handles_unbounded() {
        let out = renderer();
        assert_eq!(out.percent(VariancePercent::Defined(dec!(-16))), "-16,0%");
        assert_eq!(out.percent(VariancePercent::Defined(dec!(25))), "+25,0%");
        assert_eq!(out.percent(VariancePercent::Unbounded), "N/A");
        assert_eq!(
            out.percent(VariancePercent::Defined(dec!(-8.4848484848))),
            "-8,5%"
        );
    }

    #[test]
    fn test_date_is_short_localized() {
        let out = Renderer::new(OutputFormat::Table, NumberLocale::EN_US, "$");
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(out.date(date), "Mar 5, 2024");
    }

    #[test]
    fn test_paint_keeps_text() {
        assert!(paint("+$50,00", VarianceStatus::AtOrOverBudget).contains("+$50,00"));
        assert!(paint("-$80,00", VarianceStatus::UnderBudget).contains("-$80,00"));
    }
}
