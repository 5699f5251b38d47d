use ledger_core::{format_currency, parse_currency, Amount, CurrencyError};

#[test]
fn formatted_values_parse_back_to_the_same_cents() {
    let mut samples = vec![1, 9, 10, 99, 100, 101, 999, 1_000, 99_999, 100_000, 123_456_789];
    samples.extend((0..18).map(|exp| 10_i64.pow(exp) + 7));
    samples.push(i64::MAX);
    for cents in samples {
        let text = format_currency(cents);
        assert_eq!(parse_currency(&text), Ok(cents), "round trip of {text}");
    }
}

#[test]
fn zero_does_not_round_trip() {
    assert_eq!(format_currency(0), "$0.00");
    assert_eq!(
        parse_currency(&format_currency(0)),
        Err(CurrencyError::NonPositiveAmount)
    );
}

#[test]
fn groups_thousands() {
    assert_eq!(format_currency(100_000_000), "$1,000,000.00");
    assert_eq!(format_currency(500_000), "$5,000.00");
    assert_eq!(format_currency(-1_234), "-$12.34");
}

#[test]
fn rounds_half_away_from_zero() {
    assert_eq!(parse_currency("12.345"), Ok(1_235));
    assert_eq!(parse_currency("12.335"), Ok(1_234));
    assert_eq!(parse_currency("0.005"), Ok(1));
}

#[test]
fn distinguishes_failure_reasons() {
    assert_eq!(parse_currency(""), Err(CurrencyError::EmptyAmount));
    assert_eq!(parse_currency("$,"), Err(CurrencyError::EmptyAmount));
    assert_eq!(parse_currency("-5"), Err(CurrencyError::NonPositiveAmount));
    assert_eq!(parse_currency("abc"), Err(CurrencyError::InvalidFormat));
    assert_eq!(parse_currency("1e3"), Err(CurrencyError::InvalidFormat));
}

#[test]
fn amount_pairs_cents_with_display() {
    let amount = Amount::from_cents(-50_000);
    assert!(amount.is_negative());
    assert_eq!(amount.to_string(), "-$500.00");
}
