//! Number literal scanning and decoding.
//!
//! Numbers are accumulated as raw text first — scanning stops at
//! whitespace, any macro character, or end of input, and the terminating
//! character is pushed back — then the whole token is matched against the
//! lexical rules, in order:
//!
//! 1. plain integers (`42`, `-7`, `12N`), promoted to big integers on
//!    overflow or an `N` suffix;
//! 2. radix integers (`0377` octal, `0xFF` hex, `2r1010` base 2..36);
//! 3. ratios (`22/7`), reduced to lowest terms;
//! 4. floats (`3.14`, `1e10`, `2.5e-3`), with `M` forcing an
//!    arbitrary-precision decimal.
//!
//! A token that matches none of the rules is an invalid number; a token
//! that looks octal but carries the digits 8 or 9 is claimed and rejected
//! rather than reinterpreted.

use num_bigint::{BigInt, Sign};

use edn_util::num::{BigDecimal, Ratio, Reduced};
use edn_util::{ReaderError, Result};

use crate::classify;
use crate::source::CharSource;

/// A decoded number literal.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    /// A fixed-width integer.
    Int(i64),
    /// An arbitrary-precision integer (`N` suffix or overflow).
    BigInt(BigInt),
    /// A ratio in lowest terms.
    Ratio(Ratio),
    /// A 64-bit float.
    Float(f64),
    /// An arbitrary-precision decimal (`M` suffix).
    Decimal(BigDecimal),
}

/// Reads a number literal whose first character has already been consumed.
///
/// Accumulates until whitespace, a macro character, or end of input; the
/// terminator is pushed back. The accumulated text must match one of the
/// number rules or the read fails with `Invalid number format <text>.`.
pub fn read_number(src: &mut dyn CharSource, initch: char) -> Result<Number> {
    let mut text = String::new();
    let mut ch = Some(initch);

    loop {
        match ch {
            None => break,
            Some(c) if classify::is_whitespace(c) || classify::is_macro(c) => {
                src.unread(c);
                break;
            }
            Some(c) => {
                text.push(c);
                ch = src.read()?;
            }
        }
    }

    match match_number(&text)? {
        Some(number) => Ok(number),
        None => Err(invalid_number(&text)),
    }
}

/// Matches complete number text against the lexical rules, in order.
///
/// Returns `Ok(None)` when no rule matches. Rule-specific rejections
/// (octal digits out of range, zero denominators) fail outright.
pub fn match_number(text: &str) -> Result<Option<Number>> {
    if let Some(number) = match_integer(text)? {
        return Ok(Some(number));
    }
    if let Some(number) = match_ratio(text)? {
        return Ok(Some(number));
    }
    Ok(match_float(text))
}

fn invalid_number(text: &str) -> ReaderError {
    ReaderError::lexical(format!("Invalid number format {}.", text))
}

fn match_integer(text: &str) -> Result<Option<Number>> {
    let (negative, body) = split_sign(text);
    let (body, force_big) = match body.strip_suffix('N') {
        Some(stripped) => (stripped, true),
        None => (body, false),
    };
    if body.is_empty() {
        return Ok(None);
    }

    if body == "0" {
        return Ok(Some(if force_big {
            Number::BigInt(BigInt::from(0))
        } else {
            Number::Int(0)
        }));
    }

    let (radix, digits) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        (16, hex)
    } else if let Some(oct) = body.strip_prefix('0') {
        // A leading zero means octal. Tokens like 08 are numeric-looking
        // but irrecoverable: they are claimed here and rejected, never
        // reinterpreted as floats.
        if oct.is_empty() || !oct.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(None);
        }
        if !oct.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return Err(invalid_number(text));
        }
        (8, oct)
    } else if let Some((radix, digits)) = split_radix(body) {
        if !(2..=36).contains(&radix) {
            return Ok(None);
        }
        if !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Ok(None);
        }
        (radix, digits)
    } else {
        if !body.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(None);
        }
        (10, body)
    };

    if digits.is_empty() {
        return Ok(None);
    }
    Ok(decode_int(digits, radix, negative, force_big))
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

/// Splits `NrDDD` / `NRDDD` radix notation: one or two leading decimal
/// digits (first nonzero) naming the base, then the digit run.
fn split_radix(body: &str) -> Option<(u32, &str)> {
    let bytes = body.as_bytes();
    if bytes.is_empty() || !bytes[0].is_ascii_digit() || bytes[0] == b'0' {
        return None;
    }
    let marker = if bytes.len() >= 2 && (bytes[1] == b'r' || bytes[1] == b'R') {
        1
    } else if bytes.len() >= 3
        && bytes[1].is_ascii_digit()
        && (bytes[2] == b'r' || bytes[2] == b'R')
    {
        2
    } else {
        return None;
    };
    let radix = body[..marker].parse().ok()?;
    Some((radix, &body[marker + 1..]))
}

fn decode_int(digits: &str, radix: u32, negative: bool, force_big: bool) -> Option<Number> {
    if force_big {
        return decode_big(digits, radix, negative).map(Number::BigInt);
    }
    let parsed = if negative {
        i64::from_str_radix(&format!("-{}", digits), radix)
    } else {
        i64::from_str_radix(digits, radix)
    };
    match parsed {
        Ok(value) => Some(Number::Int(value)),
        // from_str_radix fails on overflow and on digits invalid for the
        // base; the big decode distinguishes the two.
        Err(_) => decode_big(digits, radix, negative).map(Number::BigInt),
    }
}

fn decode_big(digits: &str, radix: u32, negative: bool) -> Option<BigInt> {
    let big = BigInt::parse_bytes(digits.as_bytes(), radix)?;
    Some(if negative { -big } else { big })
}

fn match_ratio(text: &str) -> Result<Option<Number>> {
    let Some(slash) = text.find('/') else {
        return Ok(None);
    };
    let (num_part, den_part) = (&text[..slash], &text[slash + 1..]);

    let num_digits = num_part.strip_prefix(['+', '-']).unwrap_or(num_part);
    if num_digits.is_empty() || !num_digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    if den_part.is_empty() || !den_part.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }

    let Ok(numerator) = num_part.parse::<BigInt>() else {
        return Ok(None);
    };
    let Ok(denominator) = den_part.parse::<BigInt>() else {
        return Ok(None);
    };
    if denominator.sign() == Sign::NoSign {
        return Err(ReaderError::lexical("Divide by zero"));
    }

    Ok(Some(match Ratio::reduce(numerator, denominator) {
        Reduced::Int(value) => narrow_big(value),
        Reduced::Ratio(ratio) => Number::Ratio(ratio),
    }))
}

fn narrow_big(value: BigInt) -> Number {
    match i64::try_from(&value) {
        Ok(small) => Number::Int(small),
        Err(_) => Number::BigInt(value),
    }
}

fn match_float(text: &str) -> Option<Number> {
    let (body, decimal) = match text.strip_suffix('M') {
        Some(stripped) => (stripped, true),
        None => (text, false),
    };
    if !is_float_shape(body) {
        return None;
    }
    if decimal {
        BigDecimal::parse(body).map(Number::Decimal)
    } else {
        body.parse::<f64>().ok().map(Number::Float)
    }
}

/// `[+-]?digits[.digits][(e|E)[+-]digits]`
fn is_float_shape(body: &str) -> bool {
    let unsigned = body.strip_prefix(['+', '-']).unwrap_or(body);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
        None => (unsigned, None),
    };
    let (int_part, frac_part) = match mantissa.find('.') {
        Some(i) => (&mantissa[..i], Some(&mantissa[i + 1..])),
        None => (mantissa, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if let Some(frac) = frac_part {
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    if let Some(exp) = exponent {
        let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    true
}
