//! Conversion between human-entered currency text and integer cents.
//!
//! Cents are the only unit that is stored or summed. Parsing goes through
//! [`rust_decimal::Decimal`] so no binary floating point is ever involved;
//! fractional cents are rounded half away from zero (`12.345` → `1235`,
//! `12.335` → `1234`).

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CURRENCY_SYMBOL: char = '$';
const GROUPING_SEPARATOR: char = ',';
const CENTS_PER_UNIT: i64 = 100;

/// Reasons a currency string could not be turned into cents.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("amount cannot be empty")]
    EmptyAmount,
    #[error("invalid amount format")]
    InvalidFormat,
    #[error("amount must be positive")]
    NonPositiveAmount,
}

/// Parses text such as `"$1,000.50"` into cents (`100050`).
///
/// Surrounding whitespace is trimmed and every `$` and `,` is removed before
/// parsing. The remaining text must be a plain base-10 decimal with an
/// optional sign; exponents and special values are rejected. Amounts that are
/// zero, negative, or round to zero cents fail with
/// [`CurrencyError::NonPositiveAmount`].
pub fn parse_currency(text: &str) -> Result<i64, CurrencyError> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|ch| *ch != CURRENCY_SYMBOL && *ch != GROUPING_SEPARATOR)
        .collect();
    if cleaned.is_empty() {
        return Err(CurrencyError::EmptyAmount);
    }

    let value = parse_decimal(&cleaned).ok_or(CurrencyError::InvalidFormat)?;
    if value <= Decimal::ZERO {
        return Err(CurrencyError::NonPositiveAmount);
    }

    let cents = value
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(CurrencyError::InvalidFormat)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(CurrencyError::InvalidFormat)?;
    if cents <= 0 {
        return Err(CurrencyError::NonPositiveAmount);
    }
    Ok(cents)
}

/// Renders cents as `$1,234.56`, with a leading `-` for negative values.
///
/// Total over `i64`, including `i64::MIN`.
pub fn format_currency(cents: i64) -> String {
    let magnitude = cents.unsigned_abs();
    let units = magnitude / CENTS_PER_UNIT as u64;
    let fraction = magnitude % CENTS_PER_UNIT as u64;
    let sign = if cents < 0 { "-" } else { "" };
    format!(
        "{}{}{}.{:02}",
        sign,
        CURRENCY_SYMBOL,
        group_digits(&units.to_string(), GROUPING_SEPARATOR),
        fraction
    )
}

/// Exact cent value paired with its display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub cents: i64,
    pub display: String,
}

impl Amount {
    pub fn from_cents(cents: i64) -> Self {
        Self {
            cents,
            display: format_currency(cents),
        }
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }
}

impl From<i64> for Amount {
    fn from(cents: i64) -> Self {
        Self::from_cents(cents)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Accepts `[+-]digits[.digits]`, `[+-].digits` and `[+-]digits.`.
fn parse_decimal(text: &str) -> Option<Decimal> {
    let (negative, body) = match text.strip_prefix(|ch: char| ch == '+' || ch == '-') {
        Some(rest) => (text.starts_with('-'), rest),
        None => (false, text),
    };
    let (whole, fraction) = match body.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (body, ""),
    };
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) || (whole.is_empty() && fraction.is_empty()) {
        return None;
    }

    let canonical = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if whole.is_empty() { "0" } else { whole },
        if fraction.is_empty() { "0" } else { fraction }
    );
    Decimal::from_str(&canonical).ok()
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
