//! Unit-suffixed duration lexer (`3h4m5s`, `1.5m`, `-250ms`).
//!
//! Accepts a signed sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit suffix. The result is a signed count of
//! nanoseconds. Error messages keep the `time: ` prefix and wording that API
//! clients already match on (`unknown unit`, `invalid duration`,
//! `missing unit`).

/// Nanoseconds per unit.
pub const NANOSECOND: u64 = 1;
pub const MICROSECOND: u64 = 1_000 * NANOSECOND;
pub const MILLISECOND: u64 = 1_000 * MICROSECOND;
pub const SECOND: u64 = 1_000 * MILLISECOND;
pub const MINUTE: u64 = 60 * SECOND;
pub const HOUR: u64 = 60 * MINUTE;

/// Magnitude of the most negative representable duration.
const LIMIT: u64 = 1 << 63;

/// Errors produced by [`parse_duration`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    /// Empty input, stray characters, or a value outside the `i64` nanosecond range.
    #[error("time: invalid duration {0:?}")]
    Invalid(String),

    #[error("time: missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("time: unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },
}

/// Map a unit suffix to its length in nanoseconds.
fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        // U+00B5 micro sign and U+03BC greek small mu.
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Consume a run of ASCII digits.
///
/// Returns the value, the remaining input, and whether any digit was read.
/// `None` means the run does not fit in 63 bits.
fn leading_int(s: &str) -> Option<(u64, &str, bool)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    for b in s[..digits].bytes() {
        if value > LIMIT / 10 {
            return None;
        }
        value = value * 10 + u64::from(b - b'0');
        if value > LIMIT {
            return None;
        }
    }
    Some((value, &s[digits..], digits > 0))
}

/// Consume the digits after a decimal point.
///
/// Returns the digits read as an integer, the power of ten they are scaled
/// by, and the remaining input. Digits beyond 63 bits of precision are
/// consumed but ignored.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    let mut scale = 1.0_f64;
    let mut overflow = false;
    for b in s[..digits].bytes() {
        if overflow {
            continue;
        }
        if value > (LIMIT - 1) / 10 {
            overflow = true;
            continue;
        }
        let next = value * 10 + u64::from(b - b'0');
        if next > LIMIT {
            overflow = true;
            continue;
        }
        value = next;
        scale *= 10.0;
    }
    (value, scale, &s[digits..])
}

/// Parse a duration string such as `"300ms"`, `"-1.5h"` or `"2h45m"` into
/// signed nanoseconds.
///
/// Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare
/// `"0"` is the only number accepted without a unit.
pub fn parse_duration(input: &str) -> Result<i64, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());

    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let first = rest.as_bytes()[0];
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, after_int, has_int) = leading_int(rest).ok_or_else(invalid)?;
        rest = after_int;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, digits_scale, remaining) = leading_fraction(after_dot);
            has_fraction = remaining.len() != after_dot.len();
            fraction = digits;
            scale = digits_scale;
            rest = remaining;
        }
        if !has_int && !has_fraction {
            return Err(invalid());
        }

        let unit_len = rest
            .bytes()
            .position(|b| b == b'.' || b.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let (unit, tail) = rest.split_at(unit_len);
        rest = tail;

        let per_unit = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        if whole > LIMIT / per_unit {
            return Err(invalid());
        }
        let mut value = whole * per_unit;
        if fraction > 0 {
            value = value.saturating_add((fraction as f64 * (per_unit as f64 / scale)) as u64);
            if value > LIMIT {
                return Err(invalid());
            }
        }

        total = total.saturating_add(value);
        if total > LIMIT {
            return Err(invalid());
        }
    }

    if negative {
        // `LIMIT` itself maps onto `i64::MIN`.
        return Ok((total as i64).wrapping_neg());
    }
    if total > LIMIT - 1 {
        return Err(invalid());
    }
    Ok(total as i64)
}
