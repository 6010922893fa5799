//! Whole-content numeric conversions.
//!
//! Grammar: `[+-]? digit* ('.' digit*)?`, the fraction only for floats. The
//! entire input has to match; the first byte that does not is reported. An
//! input without digits (empty, or a lone sign) converts to zero.

use crate::{Result, StringError};

/// Length of an optional leading sign and whether it was a minus.
fn sign(bytes: &[u8]) -> (usize, bool) {
    match bytes.first() {
        Some(b'-') => (1, true),
        Some(b'+') => (1, false),
        _ => (0, false),
    }
}

fn invalid(bytes: &[u8], position: usize) -> StringError {
    StringError::InvalidNumericLiteral {
        position,
        byte: bytes.get(position).copied().unwrap_or(0),
    }
}

pub(crate) fn parse_integer(bytes: &[u8]) -> Result<i64> {
    let (mut i, negative) = sign(bytes);
    let mut value: i64 = 0;
    while let Some(&b) = bytes.get(i).filter(|b| b.is_ascii_digit()) {
        let digit = i64::from(b - b'0');
        // Accumulating on the negative side reaches `i64::MIN`.
        value = value
            .checked_mul(10)
            .and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            })
            .ok_or_else(|| invalid(bytes, i))?;
        i += 1;
    }
    if i != bytes.len() {
        return Err(invalid(bytes, i));
    }
    Ok(value)
}

pub(crate) fn parse_float(bytes: &[u8]) -> Result<f64> {
    let (sign_len, _) = sign(bytes);
    let mut i = sign_len;
    let mut digits = 0;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
        digits += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
            digits += 1;
        }
    }
    if i != bytes.len() {
        return Err(invalid(bytes, i));
    }
    if digits == 0 {
        return Ok(0.0);
    }
    // The literal is validated ASCII; core's conversion rounds correctly.
    core::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| invalid(bytes, 0))
}
