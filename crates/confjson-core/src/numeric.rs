//! Numeric width policy.
//!
//! JSON has a single number type, so the width of a configuration number is carried
//! by the *shape* of its literal:
//!
//! - floats are always written with a decimal point (`4.0`, never `4`);
//! - integers are never written with one.
//!
//! On the way back, [`classify_literal`] reads the raw literal text and picks the
//! narrowest width that reproduces it exactly. The rule order is load-bearing and
//! must not be rearranged:
//!
//! 1. literal contains `.` → `Float64`
//! 2. literal parses as `i32` *and* the canonical form of that `i32` equals the
//!    literal → `Integer32`
//! 3. otherwise → `Integer64`
//!
//! Rule 2's text comparison is what sends `007`, `-0` and anything beyond the `i32`
//! range to `Integer64`.

use crate::error::{DecodeError, EncodeError};
use crate::value::ConfigValue;
use serde_json::Number;

/// Format a float as a JSON literal that always contains a decimal point.
///
/// Uses the shortest representation that parses back to the same `f64`, in plain
/// positional notation (no exponent), and appends `.0` to whole numbers.
pub fn format_float(f: f64) -> Result<String, EncodeError> {
    if !f.is_finite() {
        return Err(EncodeError::NonFiniteFloat(f));
    }
    let mut s = f.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    Ok(s)
}

/// Build the document number for a float, keeping the literal from [`format_float`] verbatim.
pub fn float_number(f: f64) -> Result<Number, EncodeError> {
    let literal = format_float(f)?;
    literal
        .parse::<Number>()
        .map_err(|_| EncodeError::InvalidLiteral(literal))
}

/// Decode a raw numeric literal into a width-tagged value.
pub fn classify_literal(literal: &str) -> Result<ConfigValue, DecodeError> {
    let invalid = || DecodeError::InvalidNumber(literal.to_string());

    if literal.contains('.') {
        return match literal.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(ConfigValue::Float64(f)),
            _ => Err(invalid()),
        };
    }

    if let Ok(n) = literal.parse::<i32>() {
        if n.to_string() == literal {
            return Ok(ConfigValue::Integer32(n));
        }
    }

    if let Ok(n) = literal.parse::<i64>() {
        return Ok(ConfigValue::Integer64(n));
    }

    integral_exponent(literal)
        .map(ConfigValue::Integer64)
        .ok_or_else(invalid)
}

/// Accept exponent-form literals such as `1e5` when they denote an integral `i64`.
fn integral_exponent(literal: &str) -> Option<i64> {
    if !literal.contains(['e', 'E']) {
        return None;
    }
    let f = literal.parse::<f64>().ok()?;
    // i64::MAX is not representable as f64; 2^63 is the first value out of range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_point_selects_float() {
        assert_eq!(classify_literal("4.0").unwrap(), ConfigValue::Float64(4.0));
        assert_eq!(classify_literal("-0.5").unwrap(), ConfigValue::Float64(-0.5));
        assert_eq!(classify_literal("1.5e3").unwrap(), ConfigValue::Float64(1500.0));
    }

    #[test]
    fn canonical_i32_selects_int32() {
        assert_eq!(classify_literal("10").unwrap(), ConfigValue::Integer32(10));
        assert_eq!(
            classify_literal("-2147483648").unwrap(),
            ConfigValue::Integer32(i32::MIN)
        );
        assert_eq!(
            classify_literal("2147483647").unwrap(),
            ConfigValue::Integer32(i32::MAX)
        );
    }

    #[test]
    fn out_of_range_selects_int64() {
        assert_eq!(
            classify_literal("2147483648").unwrap(),
            ConfigValue::Integer64(2_147_483_648)
        );
        assert_eq!(
            classify_literal("-9223372036854775808").unwrap(),
            ConfigValue::Integer64(i64::MIN)
        );
    }

    #[test]
    fn non_canonical_text_selects_int64() {
        assert_eq!(classify_literal("007").unwrap(), ConfigValue::Integer64(7));
        assert_eq!(classify_literal("-0").unwrap(), ConfigValue::Integer64(0));
    }

    #[test]
    fn integral_exponent_selects_int64() {
        assert_eq!(classify_literal("1e5").unwrap(), ConfigValue::Integer64(100_000));
        assert_eq!(classify_literal("2E3").unwrap(), ConfigValue::Integer64(2_000));
    }

    #[test]
    fn unrepresentable_literals_fail() {
        for lit in ["15e-1", "1e30", "9223372036854775808", "abc", "", "1.0e999"] {
            assert!(
                matches!(classify_literal(lit), Err(DecodeError::InvalidNumber(_))),
                "{lit} should be rejected"
            );
        }
    }

    #[test]
    fn floats_always_carry_a_decimal_point() {
        assert_eq!(format_float(4.0).unwrap(), "4.0");
        assert_eq!(format_float(-3.25).unwrap(), "-3.25");
        assert_eq!(format_float(1e20).unwrap(), "100000000000000000000.0");
        assert_eq!(format_float(1e-7).unwrap(), "0.0000001");
    }

    #[test]
    fn formatted_floats_classify_back_as_float() {
        for f in [0.0, 4.0, 0.1, -7.5, 1e20, 123456789.125, f64::MAX, f64::MIN_POSITIVE] {
            let lit = format_float(f).unwrap();
            assert_eq!(classify_literal(&lit).unwrap(), ConfigValue::Float64(f));
        }
    }

    #[test]
    fn float_number_keeps_literal_text() {
        assert_eq!(float_number(2.0).unwrap().to_string(), "2.0");
        assert_eq!(float_number(0.25).unwrap().to_string(), "0.25");
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        assert!(matches!(
            format_float(f64::NAN),
            Err(EncodeError::NonFiniteFloat(_))
        ));
        assert!(format_float(f64::INFINITY).is_err());
    }
}
