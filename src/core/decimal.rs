//! Exact-precision decimal arithmetic for money, quantities, and rates.
//!
//! Values enter the codec as digit strings, are parsed once into
//! [`rust_decimal::Decimal`], and leave as exactly formatted strings.
//! Binary floating point is never used on this path.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::config::Charset;
use super::error::{EdifactError, preview};

/// Parse a decimal digit string: optional sign, digits, optional `.` digits.
pub fn parse(text: &str) -> Result<Decimal, EdifactError> {
    if !matches_decimal_pattern(text) {
        return Err(EdifactError::InvalidDecimal(preview(text)));
    }
    Decimal::from_str(text).map_err(|_| EdifactError::InvalidDecimal(preview(text)))
}

fn matches_decimal_pattern(text: &str) -> bool {
    let rest = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    !int_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.is_none_or(|f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()))
}

/// Number of fractional digits a precision template prescribes
/// ("0.01" → 2, "1" → 0).
pub fn template_scale(template: &str) -> u32 {
    template
        .split_once('.')
        .map(|(_, frac)| frac.len() as u32)
        .unwrap_or(0)
}

/// Round half-away-from-zero to the template's scale.
pub fn round(value: Decimal, template: &str) -> Decimal {
    round_at(value, template_scale(template))
}

fn round_at(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed-scale addition.
pub fn add(a: Decimal, b: Decimal, scale: u32) -> Decimal {
    round_at(a + b, scale)
}

/// Fixed-scale multiplication.
pub fn mul(a: Decimal, b: Decimal, scale: u32) -> Decimal {
    round_at(a * b, scale)
}

/// Fixed-scale division. Divisors with absolute value below 1e-7 fail
/// with [`EdifactError::DivisionByZero`].
pub fn div(a: Decimal, b: Decimal, scale: u32) -> Result<Decimal, EdifactError> {
    if b.abs() < dec!(0.0000001) {
        return Err(EdifactError::DivisionByZero);
    }
    Ok(round_at(a / b, scale))
}

/// Compare at a scale: equal when the difference is below half a unit
/// in the last place of that scale.
pub fn compare(a: Decimal, b: Decimal, scale: u32) -> Ordering {
    if (a - b).abs() < half_unit(scale) {
        Ordering::Equal
    } else {
        a.cmp(&b)
    }
}

fn half_unit(scale: u32) -> Decimal {
    Decimal::new(5, scale + 1)
}

/// True iff the value carries no more precision than the template
/// allows: rounding to the template scale moves it by less than half a
/// unit at that scale. `validate_precision("1.005", "0.01")` is false.
pub fn validate_precision(value: Decimal, template: &str) -> bool {
    let scale = template_scale(template);
    (value - round_at(value, scale)).abs() < half_unit(scale)
}

/// Format with exactly `scale` fractional digits and a `.` mark.
pub fn format(value: Decimal, scale: u32) -> String {
    format!("{:.*}", scale as usize, round_at(value, scale))
}

/// Format for a repertoire: UNOA/UNOB replace the decimal point with a
/// comma, UNOC keeps the point.
pub fn format_for_charset(value: Decimal, charset: Charset, scale: u32) -> String {
    let text = format(value, scale);
    if charset.decimal_comma() {
        text.replace('.', ",")
    } else {
        text
    }
}
