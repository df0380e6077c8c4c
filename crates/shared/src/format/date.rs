//! Date-only handling.
//!
//! Persisted dates are calendar dates. Any time-of-day or UTC offset in the
//! input is discarded without timezone conversion, so `2024-03-05T23:30:00-05:00`
//! stays on March 5th.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use super::number::{Language, NumberLocale};

/// Input that does not start with a `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid date: {0}")]
pub struct DateParseError(pub String);

/// Parses the calendar date at the start of `input`.
///
/// Accepts `2024-03-05`, `2024-03-05T00:00:00.000Z`, `2024-03-05 10:00:00`, and
/// offset timestamps.
///
/// # Errors
///
/// Returns `DateParseError` if the first ten characters are not a valid date
/// or are followed by anything other than a time component.
pub fn parse_date_only(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();
    let (head, rest) = match trimmed.get(..10) {
        Some(head) => (head, &trimmed[10..]),
        None => return Err(DateParseError(input.to_string())),
    };

    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return Err(DateParseError(input.to_string()));
    }

    NaiveDate::parse_from_str(head, "%Y-%m-%d").map_err(|_| DateParseError(input.to_string()))
}

/// Formats a date as ISO `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

const ES_MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DE_MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

const ES_MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

const EN_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DE_MONTHS_SHORT: [&str; 12] = [
    "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
    "Dez.",
];

/// Full month name for `month` in `1..=12`, or `None` outside that range.
#[must_use]
pub fn month_name(month: u32, locale: NumberLocale) -> Option<&'static str> {
    let idx = usize::try_from(month.checked_sub(1)?).ok()?;
    let names = match locale.language {
        Language::Es => &ES_MONTHS,
        Language::En => &EN_MONTHS,
        Language::De => &DE_MONTHS,
    };
    names.get(idx).copied()
}

/// Short human date: `5 mar 2024` (es), `Mar 5, 2024` (en), `5. März 2024` (de).
#[must_use]
pub fn format_date_short(date: NaiveDate, locale: NumberLocale) -> String {
    let idx = date.month0() as usize;
    match locale.language {
        Language::Es => format!("{} {} {}", date.day(), ES_MONTHS_SHORT[idx], date.year()),
        Language::En => format!("{} {}, {}", EN_MONTHS_SHORT[idx], date.day(), date.year()),
        Language::De => format!("{}. {} {}", date.day(), DE_MONTHS_SHORT[idx], date.year()),
    }
}

/// Serde adapter for date-only fields that may arrive as full timestamps.
pub mod date_only {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes as `YYYY-MM-DD`.
    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    /// Deserializes the calendar date prefix of a string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date_only(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[rstest]
    #[case("2024-03-05", d(2024, 3, 5))]
    #[case("2024-03-05T00:00:00.000Z", d(2024, 3, 5))]
    #[case("2024-03-05T23:30:00-05:00", d(2024, 3, 5))]
    #[case("2024-03-05T00:30:00+09:00", d(2024, 3, 5))]
    #[case("2024-03-05 10:00:00", d(2024, 3, 5))]
    #[case("  2024-12-31  ", d(2024, 12, 31))]
    fn test_parse_date_only_drops_time(#[case] input: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_date_only(input), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("2024-3-5")]
    #[case("2024-02-30")]
    #[case("2024-03-05X")]
    #[case("05/03/2024")]
    fn test_parse_date_only_rejects(#[case] input: &str) {
        assert!(parse_date_only(input).is_err());
    }

    #[test]
    fn test_format_date_iso() {
        assert_eq!(format_date(d(2024, 1, 9)), "2024-01-09");
    }

    #[test]
    fn test_format_date_short() {
        assert_eq!(format_date_short(d(2024, 3, 5), NumberLocale::ES_CO), "5 mar 2024");
        assert_eq!(format_date_short(d(2024, 3, 5), NumberLocale::EN_US), "Mar 5, 2024");
        assert_eq!(format_date_short(d(2024, 3, 5), NumberLocale::DE_DE), "5. März 2024");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1, NumberLocale::ES_CO), Some("Enero"));
        assert_eq!(month_name(12, NumberLocale::ES_CO), Some("Diciembre"));
        assert_eq!(month_name(9, NumberLocale::EN_US), Some("September"));
        assert_eq!(month_name(0, NumberLocale::ES_CO), None);
        assert_eq!(month_name(13, NumberLocale::ES_CO), None);
    }

    #[test]
    fn test_serde_adapter() {
        #[derive(serde::Deserialize, serde::Serialize)]
        struct Row {
            #[serde(with = "date_only")]
            date: NaiveDate,
        }

        let row: Row = serde_json::from_str(r#"{"date":"2024-03-05T05:00:00.000Z"}"#).unwrap();
        assert_eq!(row.date, d(2024, 3, 5));
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"date":"2024-03-05"}"#);
    }
}
