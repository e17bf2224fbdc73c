//! Canonical decimal text.
//!
//! Every decimal that leaves the system as text goes through [`to_canonical_string`],
//! so equal values always render byte-identically regardless of their stored scale:
//!
//! - zero renders as `0`
//! - values with a non-positive exponent and an adjusted exponent of at least -6
//!   render positionally (`12.5`, `0.008`, `5`)
//! - everything else renders in scientific form (`1E+1`, `1.5E+3`, `1E-7`)

use rust_decimal::Decimal;

use crate::error::{NumericError, NumericResult};

/// Smallest adjusted exponent still rendered positionally.
const MIN_POSITIONAL_EXPONENT: i64 = -6;

/// Renders `value` in canonical text form.
#[must_use]
pub fn to_canonical_string(value: Decimal) -> String {
    let normalized = value.normalize();
    if normalized.is_zero() {
        return "0".to_string();
    }

    let mut digits = normalized.mantissa().unsigned_abs().to_string();
    let mut exponent = -i64::from(normalized.scale());
    // normalize() leaves trailing zeros on integers; fold them into the exponent.
    while digits.len() > 1 && digits.ends_with('0') {
        digits.pop();
        exponent += 1;
    }

    let sign = if normalized.is_sign_negative() { "-" } else { "" };
    let digit_count = len_i64(&digits);
    let adjusted = exponent + digit_count - 1;

    if exponent <= 0 && adjusted >= MIN_POSITIONAL_EXPONENT {
        let point = digit_count + exponent;
        let body = if exponent == 0 {
            digits
        } else if point > 0 {
            let (int_part, frac_part) = digits.split_at(usize_from(point));
            format!("{int_part}.{frac_part}")
        } else {
            format!("0.{}{digits}", "0".repeat(usize_from(-point)))
        };
        return format!("{sign}{body}");
    }

    let (lead, rest) = digits.split_at(1);
    let coefficient = if rest.is_empty() {
        lead.to_string()
    } else {
        format!("{lead}.{rest}")
    };
    let exp_sign = if adjusted >= 0 { '+' } else { '-' };
    format!("{sign}{coefficient}E{exp_sign}{}", adjusted.unsigned_abs())
}

/// Parses plain (`12.5`) or scientific (`1.5E+3`, `1e-7`) decimal text.
///
/// # Errors
///
/// Returns [`NumericError::InvalidNumber`] if the text is not a decimal number, or
/// [`NumericError::OutOfRange`] if it cannot be represented exactly.
pub fn parse_decimal(text: &str) -> NumericResult<Decimal> {
    let trimmed = text.trim();
    let invalid = || NumericError::InvalidNumber(text.to_string());

    let (coefficient, exponent) = match trimmed.find(['e', 'E']) {
        Some(pos) => {
            let exponent = trimmed[pos + 1..].parse::<i32>().map_err(|_| invalid())?;
            (&trimmed[..pos], exponent)
        }
        None => (trimmed, 0),
    };

    if coefficient.is_empty()
        || !coefficient
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
    {
        return Err(invalid());
    }

    let coefficient = Decimal::from_str_exact(coefficient).map_err(|_| invalid())?;
    scale_by_power_of_ten(coefficient, exponent)
        .ok_or_else(|| NumericError::OutOfRange(text.to_string()))
}

/// Largest power of ten a representable decimal can be shifted by: 28 digits of scale
/// plus 29 digits of mantissa.
const MAX_EXPONENT_SHIFT: u32 = 57;

/// Multiplies `value` by `10^exponent` without rounding.
fn scale_by_power_of_ten(value: Decimal, exponent: i32) -> Option<Decimal> {
    if value.is_zero() {
        return Some(Decimal::ZERO);
    }
    if exponent.unsigned_abs() > MAX_EXPONENT_SHIFT {
        return None;
    }
    if exponent >= 0 {
        return (0..exponent).try_fold(value, |acc, _| acc.checked_mul(Decimal::TEN));
    }

    let new_scale = value.scale().checked_add(exponent.unsigned_abs())?;
    let mut shifted = value;
    shifted.set_scale(new_scale).ok()?;
    Some(shifted)
}

fn len_i64(digits: &str) -> i64 {
    // At most 29 digits fit in the 96-bit mantissa.
    i64::try_from(digits.len()).unwrap_or(i64::MAX)
}

fn usize_from(value: i64) -> usize {
    usize::try_from(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), "0")]
    #[case(dec!(0.000), "0")]
    #[case(dec!(1), "1")]
    #[case(dec!(10), "1E+1")]
    #[case(dec!(10.00), "1E+1")]
    #[case(dec!(500), "5E+2")]
    #[case(dec!(1000), "1E+3")]
    #[case(dec!(1500), "1.5E+3")]
    #[case(dec!(5), "5")]
    #[case(dec!(12.5), "12.5")]
    #[case(dec!(0.8), "0.8")]
    #[case(dec!(0.008), "0.008")]
    #[case(dec!(0.0125), "0.0125")]
    #[case(dec!(500.01), "500.01")]
    #[case(dec!(0.000001), "0.000001")]
    #[case(dec!(0.0000001), "1E-7")]
    #[case(dec!(0.00000015), "1.5E-7")]
    #[case(dec!(-10), "-1E+1")]
    #[case(dec!(-0.5), "-0.5")]
    #[case(dec!(-2), "-2")]
    fn test_canonical_string(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(to_canonical_string(value), expected);
    }

    #[test]
    fn test_equal_values_render_identically() {
        assert_eq!(
            to_canonical_string(dec!(2.00)),
            to_canonical_string(dec!(2.0000))
        );
        assert_eq!(to_canonical_string(dec!(2.00)), "2");
    }

    #[rstest]
    #[case("0", dec!(0))]
    #[case("1E+1", dec!(10))]
    #[case("1e1", dec!(10))]
    #[case("5E+2", dec!(500))]
    #[case("1.5E+3", dec!(1500))]
    #[case("1E-7", dec!(0.0000001))]
    #[case("0.0125", dec!(0.0125))]
    #[case("-1E+1", dec!(-10))]
    #[case(" 2.0 ", dec!(2))]
    #[case("0E+2000000000", dec!(0))]
    #[case("0E-30", dec!(0))]
    #[case("-0.00E-2000000000", dec!(0))]
    fn test_parse_decimal(#[case] text: &str, #[case] expected: Decimal) {
        assert_eq!(parse_decimal(text).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("E+1")]
    #[case("invalid input string")]
    #[case("1E")]
    #[case("1E+x")]
    #[case("NaN")]
    #[case("0x10")]
    fn test_parse_decimal_rejects_garbage(#[case] text: &str) {
        assert!(matches!(
            parse_decimal(text),
            Err(NumericError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_parse_decimal_out_of_range() {
        assert!(matches!(
            parse_decimal("1E+40"),
            Err(NumericError::OutOfRange(_))
        ));
        assert!(matches!(
            parse_decimal("1E-40"),
            Err(NumericError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_decimal_huge_exponent_fails_fast() {
        let started = std::time::Instant::now();
        assert!(matches!(
            parse_decimal("1E+2000000000"),
            Err(NumericError::OutOfRange(_))
        ));
        assert!(matches!(
            parse_decimal("1E-2000000000"),
            Err(NumericError::OutOfRange(_))
        ));
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_parse_keeps_precision() {
        let parsed = parse_decimal("2.0000").unwrap();
        assert_eq!(parsed.scale(), 4);
    }
}
