//! Client-side form validation.
//!
//! Drafts hold raw, possibly incomplete form input. Each draft's `validate`
//! turns it into a `New*` value that is safe to submit, or blocks submission
//! with a `ValidationError`.

pub mod error;

pub use error::ValidationError;

use rust_decimal::Decimal;

/// Returns the trimmed value, or `MissingField` when blank.
pub(crate) fn required_text(
    value: Option<&str>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Trims optional text, mapping blank to `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

pub(crate) fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

pub(crate) fn positive_amount(
    value: Option<Decimal>,
    field: &'static str,
) -> Result<Decimal, ValidationError> {
    let amount = required(value, field)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(field));
    }
    Ok(amount)
}

pub(crate) fn non_negative_amount(
    value: Option<Decimal>,
    field: &'static str,
) -> Result<Decimal, ValidationError> {
    let amount = required(value, field)?;
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount(field));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_shared::AppError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text(Some("  Food "), "name"), Ok("Food".into()));
        assert_eq!(
            required_text(Some("   "), "name"),
            Err(ValidationError::MissingField("name"))
        );
        assert_eq!(
            required_text(None, "name"),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(optional_text(Some(" ")), None);
        assert_eq!(optional_text(Some(" x ")), Some("x".into()));
    }

    #[test]
    fn test_amount_rules() {
        assert_eq!(positive_amount(Some(dec!(1)), "amount"), Ok(dec!(1)));
        assert_eq!(
            positive_amount(Some(dec!(0)), "amount"),
            Err(ValidationError::NonPositiveAmount("amount"))
        );
        assert_eq!(non_negative_amount(Some(dec!(0)), "amount"), Ok(dec!(0)));
        assert_eq!(
            non_negative_amount(Some(dec!(-1)), "amount"),
            Err(ValidationError::NegativeAmount("amount"))
        );
    }

    #[test]
    fn test_converts_to_app_error() {
        let err: AppError = ValidationError::NoDetails.into();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: At least one expense detail is required"
        );
    }
}
