use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Reals at or beyond this magnitude are written in exponent notation.
const EXPONENT_UPPER: f64 = 1e16;
/// Non-zero reals below this magnitude are written in exponent notation.
const EXPONENT_LOWER: f64 = 1e-4;

/// Converts an `i64` to the nearest `f64`.
///
/// Magnitudes beyond `2^53` lose their low bits, the same rounding Python's
/// `float(int)` applies.
///
/// ## Example
/// ```
/// use puf::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// assert_eq!(i64_to_f64(1_700_000_000_123_456_789), 1.700_000_000_123_456_8e18);
/// ```
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Safely converts a `usize` to `i64`.
///
/// ## Errors
/// Returns `Overflow` on platforms where the length does not fit.
pub fn usize_to_i64_checked(value: usize, line: usize) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::Overflow { line })
}

/// Converts an integral `f64` to `i64`, rejecting fractional values.
///
/// ## Errors
/// - `TypeError` for NaN and infinities.
/// - `LiteralTooLarge` if the value is outside the `i64` range.
/// - `RealIsFractional` if the value has a fractional part.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::TypeError { details: format!("Cannot convert non-finite value {value} to an integer"),
                                             line });
    }
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Err(RuntimeError::LiteralTooLarge { line });
    }
    if value.fract() != 0.0 {
        return Err(RuntimeError::RealIsFractional { line });
    }
    Ok(value as i64)
}

/// Converts an `f64` to `i64` by truncating toward zero, as `int(x)` does.
///
/// ## Errors
/// - `InvalidArgument` for NaN and infinities.
/// - `Overflow` if the truncated value is outside the `i64` range.
///
/// ## Example
/// ```
/// use puf::util::num::f64_to_i64_truncated;
///
/// assert_eq!(f64_to_i64_truncated(3.9, 1).unwrap(), 3);
/// assert_eq!(f64_to_i64_truncated(-3.9, 1).unwrap(), -3);
/// assert!(f64_to_i64_truncated(f64::NAN, 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_truncated(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::InvalidArgument { details: format!("cannot convert {} to an integer",
                                                                     format_real(value)),
                                                   line });
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(RuntimeError::Overflow { line });
    }
    Ok(truncated as i64)
}

/// Resolves a possibly negative sequence index against a length.
///
/// Negative indices count from the end, so `-1` is the last element.
///
/// ## Errors
/// Returns `IndexOutOfBounds` when the resolved index falls outside
/// `0..len`.
///
/// ## Example
/// ```
/// use puf::util::num::resolve_index;
///
/// assert_eq!(resolve_index(-1, 3, 1).unwrap(), 2);
/// assert_eq!(resolve_index(0, 3, 1).unwrap(), 0);
/// assert!(resolve_index(3, 3, 1).is_err());
/// ```
pub fn resolve_index(index: i64, len: usize, line: usize) -> EvalResult<usize> {
    let length = usize_to_i64_checked(len, line)?;
    let resolved = if index < 0 { index + length } else { index };

    if (0..length).contains(&resolved) {
        usize::try_from(resolved).map_err(|_| RuntimeError::Overflow { line })
    } else {
        Err(RuntimeError::IndexOutOfBounds { len,
                                             found: index,
                                             line })
    }
}

/// Formats a real the way Python's `str(float)` does.
///
/// Integral values keep a trailing `.0`, very large and very small
/// magnitudes switch to exponent notation with a signed, two digit exponent,
/// and the special values print as `inf`, `-inf` and `nan`.
///
/// ## Example
/// ```
/// use puf::util::num::format_real;
///
/// assert_eq!(format_real(1000.0), "1000.0");
/// assert_eq!(format_real(3.14), "3.14");
/// assert_eq!(format_real(1e16), "1e+16");
/// assert_eq!(format_real(1.5e-7), "1.5e-07");
/// assert_eq!(format_real(f64::NEG_INFINITY), "-inf");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= EXPONENT_UPPER || (magnitude != 0.0 && magnitude < EXPONENT_LOWER) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = exponent.strip_prefix('-')
                                             .map_or(("+", exponent), |rest| ("-", rest));
                format!("{mantissa}e{sign}{digits:0>2}")
            },
            None => formatted,
        };
    }

    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
