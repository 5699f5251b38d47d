//! Structural checks on raw form input.
//!
//! Every rule runs even after an earlier one fails, so callers get the full
//! list of problems in one pass.

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::core::time::Clock;
use crate::currency::parse_currency;

pub const MAX_NAME_CHARS: usize = 255;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("invalid hex color regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    MissingField,
    TooLong,
    InvalidAmount,
    InvalidDate,
    InvalidColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: &'static str,
    pub kind: ValidationErrorKind,
    pub message: &'static str,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ordered collection of rule failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        field: &'static str,
        kind: ValidationErrorKind,
        message: &'static str,
    ) {
        self.0.push(ValidationError {
            field,
            kind,
            message,
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Kinds in the order they were recorded.
    pub fn kinds(&self) -> Vec<ValidationErrorKind> {
        self.0.iter().map(|error| error.kind).collect()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.has_errors() {
            Err(self)
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of checking one expense or income form.
///
/// `amount_cents` is 0 and `date` is today when the matching field failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTransaction {
    pub amount_cents: i64,
    pub date: NaiveDate,
    pub errors: ValidationErrors,
}

impl ValidatedTransaction {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(i64, NaiveDate), ValidationErrors> {
        if self.errors.has_errors() {
            Err(self.errors)
        } else {
            Ok((self.amount_cents, self.date))
        }
    }
}

struct NameMessages {
    missing: &'static str,
    too_long: &'static str,
}

const TRANSACTION_NAME: NameMessages = NameMessages {
    missing: "Name is required",
    too_long: "Name must be 255 characters or less",
};

const CATEGORY_NAME: NameMessages = NameMessages {
    missing: "Category name is required",
    too_long: "Category name must be 255 characters or less",
};

fn check_name(name: &str, messages: &NameMessages, errors: &mut ValidationErrors) {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        errors.push("name", ValidationErrorKind::MissingField, messages.missing);
    } else if trimmed.chars().count() > MAX_NAME_CHARS {
        errors.push("name", ValidationErrorKind::TooLong, messages.too_long);
    }
}

/// Strict `YYYY-MM-DD`: four, two and two ASCII digits naming a real date.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(index, byte)| index == 4 || index == 7 || byte.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Checks an expense form: name, amount text and optional date text.
pub fn validate_transaction(
    name: &str,
    amount: &str,
    date: &str,
    clock: &dyn Clock,
) -> ValidatedTransaction {
    let mut errors = ValidationErrors::new();
    let today = clock.today();

    check_name(name, &TRANSACTION_NAME, &mut errors);

    let mut amount_cents = 0;
    if amount.trim().is_empty() {
        errors.push(
            "amount",
            ValidationErrorKind::MissingField,
            "Amount is required",
        );
    } else {
        match parse_currency(amount) {
            Ok(cents) => amount_cents = cents,
            Err(err) => {
                debug!(error = %err, "amount rejected");
                errors.push(
                    "amount",
                    ValidationErrorKind::InvalidAmount,
                    "Amount must be a positive number",
                );
            }
        }
    }

    let trimmed_date = date.trim();
    let date = if trimmed_date.is_empty() {
        today
    } else {
        parse_iso_date(trimmed_date).unwrap_or_else(|| {
            errors.push(
                "date",
                ValidationErrorKind::InvalidDate,
                "Invalid date format (use YYYY-MM-DD)",
            );
            today
        })
    };

    ValidatedTransaction {
        amount_cents,
        date,
        errors,
    }
}

/// Income forms follow the same rules as expenses.
pub fn validate_income(
    name: &str,
    amount: &str,
    date: &str,
    clock: &dyn Clock,
) -> ValidatedTransaction {
    validate_transaction(name, amount, date, clock)
}

pub fn validate_category(name: &str, color: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check_name(name, &CATEGORY_NAME, &mut errors);

    let color = color.trim();
    if !color.is_empty() && !HEX_COLOR.is_match(color) {
        errors.push(
            "color",
            ValidationErrorKind::InvalidColor,
            "Color must be in hex format (e.g., #FF5733)",
        );
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::on_date(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap())
    }

    #[test]
    fn accepts_a_complete_form() {
        let outcome = validate_transaction("Groceries", "$1,234.56", "2026-01-05", &clock());
        assert!(outcome.is_valid());
        assert_eq!(
            outcome.into_result().unwrap(),
            (123456, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
        );
    }

    #[test]
    fn collects_every_failure_in_field_order() {
        let outcome = validate_transaction("   ", "abc", "2026/01/05", &clock());
        assert_eq!(
            outcome.errors.kinds(),
            vec![
                ValidationErrorKind::MissingField,
                ValidationErrorKind::InvalidAmount,
                ValidationErrorKind::InvalidDate,
            ]
        );
        assert_eq!(outcome.amount_cents, 0);
        assert_eq!(outcome.date, clock().today());
        assert_eq!(
            outcome.errors.to_string(),
            "name: Name is required; amount: Amount must be a positive number; \
             date: Invalid date format (use YYYY-MM-DD)"
        );
    }

    #[test]
    fn blank_amount_is_missing_not_invalid() {
        let outcome = validate_transaction("Rent", "  ", "", &clock());
        assert_eq!(outcome.errors.kinds(), vec![ValidationErrorKind::MissingField]);
    }

    #[test]
    fn negative_and_zero_amounts_are_invalid() {
        for amount in ["-5", "0", "0.001"] {
            let outcome = validate_transaction("Rent", amount, "", &clock());
            assert_eq!(
                outcome.errors.kinds(),
                vec![ValidationErrorKind::InvalidAmount],
                "amount {amount:?}"
            );
        }
    }

    #[test]
    fn blank_date_defaults_to_today() {
        let outcome = validate_income("Salary", "5000", "  ", &clock());
        assert!(outcome.is_valid());
        assert_eq!(outcome.date, NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
    }

    #[test]
    fn dates_must_be_strict_and_real() {
        assert!(parse_iso_date("2026-02-28").is_some());
        assert!(parse_iso_date("2026-2-28").is_none());
        assert!(parse_iso_date("2026-02-30").is_none());
        assert!(parse_iso_date("+2026-02-28").is_none());
        assert!(parse_iso_date("2026-02-28T00:00").is_none());
    }

    #[test]
    fn name_length_counts_characters_after_trim() {
        let exact = "é".repeat(MAX_NAME_CHARS);
        assert!(validate_transaction(&format!("  {exact}  "), "1", "", &clock()).is_valid());

        let over = "x".repeat(MAX_NAME_CHARS + 1);
        let outcome = validate_transaction(&over, "1", "", &clock());
        assert_eq!(outcome.errors.kinds(), vec![ValidationErrorKind::TooLong]);
    }

    #[test]
    fn category_color_is_optional_but_strict() {
        assert!(validate_category("Food", "").is_empty());
        assert!(validate_category("Food", "#a1B2c3").is_empty());
        assert_eq!(
            validate_category("Food", "#FFF").kinds(),
            vec![ValidationErrorKind::InvalidColor]
        );
        assert_eq!(
            validate_category("Food", "FF5733").kinds(),
            vec![ValidationErrorKind::InvalidColor]
        );
    }

    #[test]
    fn hex_color_pattern_compiles_and_anchors() {
        assert!(HEX_COLOR.is_match("#FF5733"));
        assert!(!HEX_COLOR.is_match(" #FF5733"));
        assert!(!HEX_COLOR.is_match("#FF57331"));
    }

    #[test]
    fn category_messages_name_the_category() {
        let errors = validate_category("", "");
        let messages: Vec<&str> = errors.iter().map(|error| error.message).collect();
        assert_eq!(messages, vec!["Category name is required"]);
    }
}
