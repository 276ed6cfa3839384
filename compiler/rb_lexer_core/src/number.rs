//! Numeric literal decoding.
//!
//! [`read_number`] scans a literal starting at a decimal digit, following
//! the literal grammar:
//!
//! ```text
//! INTEGER  [1-9]([0-9_]*[0-9])?
//!          0([0-7_]*[0-7])?
//!          0[xX][0-9a-fA-F]([0-9a-fA-F_]*[0-9a-fA-F])?
//!          0[dD][0-9]([0-9_]*[0-9])?
//!          0[bB][01]([01_]*[01])?
//!          0[oO][0-7]([0-7_]*[0-7])?
//! FLOAT    (0|[1-9]([0-9_]*[0-9])?)[.][0-9_]*[0-9]([eE][+-]?[0-9]([0-9_]*[0-9])?)
//! ```
//!
//! Malformed input never fails: the scan stops where the literal stops
//! making sense, the digits read so far become the value, and the problem
//! is pushed as a [`LiteralIssue`]. A `.` not followed by a digit and an
//! exponent marker not followed by digits are left unconsumed.
//!
//! [`parse_integer`] is the lenient `Integer()`-style parser used on
//! runtime strings.

use num_bigint::BigInt;

use crate::bignum;
use crate::classify::{digit_value, is_decimal_digit, is_whitespace};
use crate::{Cursor, IssueKind, LiteralIssue};

/// Decoded value of a numeric literal.
#[derive(Clone, Debug, PartialEq)]
pub enum NumericValue {
    Integer(i64),
    /// Integer that does not fit `i64`.
    Big(BigInt),
    Float(f64),
}

impl NumericValue {
    /// `Integer` if `value` fits `i64`, else `Big`.
    pub fn from_big(value: BigInt) -> Self {
        match i64::try_from(&value) {
            Ok(small) => NumericValue::Integer(small),
            Err(_) => NumericValue::Big(value),
        }
    }
}

/// A scanned literal: its value, its length in bytes, and what went wrong.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberLiteral {
    pub value: NumericValue,
    pub len: u32,
    pub issues: Vec<LiteralIssue>,
}

/// Scan the literal at the start of `text`, which must begin with a decimal
/// digit. Issue offsets are relative to `text`.
pub fn scan_number(text: &str) -> NumberLiteral {
    let mut cursor = Cursor::new(text);
    let mut issues = Vec::new();
    let value = read_number(&mut cursor, &mut issues);
    NumberLiteral {
        value,
        len: cursor.pos(),
        issues,
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Prev {
    None,
    Digit,
    Underscore,
}

/// Read a numeric literal at the cursor (a decimal digit).
pub fn read_number(cursor: &mut Cursor<'_>, issues: &mut Vec<LiteralIssue>) -> NumericValue {
    debug_assert!(is_decimal_digit(cursor.current()));
    let start = cursor.pos();
    let first = cursor.advance();
    if first != '0' {
        return read_decimal(cursor, first, start, issues);
    }

    match cursor.current() {
        'x' | 'X' => {
            cursor.advance();
            read_integer(cursor, 16, Prev::None, start, issues)
        }
        'b' | 'B' => {
            cursor.advance();
            read_integer(cursor, 2, Prev::None, start, issues)
        }
        'o' | 'O' => {
            cursor.advance();
            read_integer(cursor, 8, Prev::None, start, issues)
        }
        'd' | 'D' => {
            cursor.advance();
            read_integer(cursor, 10, Prev::None, start, issues)
        }
        'e' | 'E' => match exponent_sign(cursor, issues) {
            Some(sign) => read_exponent(cursor, sign, start, issues),
            None => NumericValue::Integer(0),
        },
        '.' if is_decimal_digit(cursor.peek()) => {
            cursor.advance();
            read_fraction(cursor, start, issues)
        }
        // The leading `0` already counts as a digit.
        '0'..='7' | '_' => read_integer(cursor, 8, Prev::Digit, start, issues),
        '8' | '9' => {
            let pos = cursor.pos();
            issues.push(LiteralIssue::new(IssueKind::IllegalOctalDigit, pos, pos + 1));
            read_integer(cursor, 10, Prev::Digit, start, issues)
        }
        _ => NumericValue::Integer(0),
    }
}

/// Integer digits in `base` (at most 16). The cursor is past any prefix.
fn read_integer(
    cursor: &mut Cursor<'_>,
    base: u32,
    mut prev: Prev,
    start: u32,
    issues: &mut Vec<LiteralIssue>,
) -> NumericValue {
    let digits_start = cursor.pos();
    let mut value = Some(0i64);

    loop {
        let c = cursor.current();
        if let Some(digit) = digit_value(c).filter(|&d| d < base) {
            cursor.advance();
            prev = Prev::Digit;
            value = accumulate(value, base, digit);
            continue;
        }

        match prev {
            Prev::Underscore => issues.push(issue_here(IssueKind::TrailingUnderscore, start, cursor)),
            Prev::None => issues.push(issue_here(IssueKind::NumericLiteralWithoutDigits, start, cursor)),
            Prev::Digit if c == '_' => {
                cursor.advance();
                prev = Prev::Underscore;
                continue;
            }
            Prev::Digit => {}
        }

        if c == '.' && is_decimal_digit(cursor.peek()) {
            let pos = cursor.pos();
            issues.push(LiteralIssue::new(IssueKind::NoFloatingLiteral, pos, pos + 1));
        }
        return finish_integer(value, cursor.slice_from(digits_start), base);
    }
}

/// Decimal literal whose first digit (not `0`) was already consumed.
fn read_decimal(
    cursor: &mut Cursor<'_>,
    first: char,
    start: u32,
    issues: &mut Vec<LiteralIssue>,
) -> NumericValue {
    let mut value = digit_value(first).map(i64::from);
    let mut prev = Prev::Digit;

    loop {
        let c = cursor.current();
        if is_decimal_digit(c) {
            cursor.advance();
            prev = Prev::Digit;
            value = accumulate(value, 10, digit_value(c).unwrap_or(0));
        } else if prev == Prev::Underscore {
            issues.push(issue_here(IssueKind::TrailingUnderscore, start, cursor));
            return finish_integer(value, cursor.slice_from(start), 10);
        } else if matches!(c, 'e' | 'E') {
            match exponent_sign(cursor, issues) {
                Some(sign) => return read_exponent(cursor, sign, start, issues),
                None => return finish_integer(value, cursor.slice_from(start), 10),
            }
        } else if c == '_' {
            cursor.advance();
            prev = Prev::Underscore;
        } else {
            if c == '.' && is_decimal_digit(cursor.peek()) {
                cursor.advance();
                return read_fraction(cursor, start, issues);
            }
            return finish_integer(value, cursor.slice_from(start), 10);
        }
    }
}

/// Digits after the decimal point (the cursor is on the first one).
fn read_fraction(cursor: &mut Cursor<'_>, start: u32, issues: &mut Vec<LiteralIssue>) -> NumericValue {
    let mut prev = Prev::None;
    loop {
        let c = cursor.current();
        if is_decimal_digit(c) {
            cursor.advance();
            prev = Prev::Digit;
            continue;
        }
        if matches!(c, 'e' | 'E') {
            if let Some(sign) = exponent_sign(cursor, issues) {
                return read_exponent(cursor, sign, start, issues);
            }
        }
        if prev == Prev::Underscore {
            issues.push(issue_here(IssueKind::TrailingUnderscore, start, cursor));
        } else if c == '_' {
            cursor.advance();
            prev = Prev::Underscore;
            continue;
        }
        return decode_float(cursor, start, issues, false);
    }
}

/// With the cursor on `e`/`E`: consume the marker and its sign if digits
/// follow, returning the sign. Otherwise report the dangling marker and
/// consume nothing.
fn exponent_sign(cursor: &mut Cursor<'_>, issues: &mut Vec<LiteralIssue>) -> Option<i32> {
    let (sign, skip) = match cursor.peek() {
        '-' => (-1, 2),
        '+' => (1, 2),
        _ => (1, 1),
    };
    if is_decimal_digit(cursor.peek_nth(skip)) {
        cursor.advance_n(skip);
        return Some(sign);
    }

    let kind = match cursor.peek() {
        '-' => IssueKind::TrailingMinus,
        '+' => IssueKind::TrailingPlus,
        _ => IssueKind::TrailingE,
    };
    let pos = cursor.pos();
    #[allow(clippy::cast_possible_truncation, reason = "skip is 1 or 2")]
    let width = skip as u32;
    issues.push(LiteralIssue::new(kind, pos, pos + width));
    None
}

/// Exponent digits; the cursor is on the first one.
fn read_exponent(
    cursor: &mut Cursor<'_>,
    sign: i32,
    start: u32,
    issues: &mut Vec<LiteralIssue>,
) -> NumericValue {
    let mut exponent: i32 = 0;
    let mut prev = Prev::None;
    loop {
        let c = cursor.current();
        if let Some(digit) = c.to_digit(10) {
            cursor.advance();
            prev = Prev::Digit;
            // Anything this large is already zero or infinity.
            if exponent < 10_000 {
                #[allow(clippy::cast_possible_wrap, reason = "digit is below 10")]
                let digit = digit as i32;
                exponent = exponent * 10 + digit;
            }
            continue;
        }

        if prev != Prev::Digit {
            issues.push(issue_here(IssueKind::TrailingUnderscore, start, cursor));
        } else if c == '_' {
            cursor.advance();
            prev = Prev::Underscore;
            continue;
        }

        exponent *= sign;
        let reported = exponent <= -1021 || exponent >= 1025;
        if reported {
            issues.push(issue_here(IssueKind::FloatOutOfRange, start, cursor));
        }
        return decode_float(cursor, start, issues, reported);
    }
}

fn issue_here(kind: IssueKind, start: u32, cursor: &Cursor<'_>) -> LiteralIssue {
    LiteralIssue::new(kind, start, cursor.pos())
}

#[inline]
fn accumulate(value: Option<i64>, base: u32, digit: u32) -> Option<i64> {
    value?
        .checked_mul(i64::from(base))?
        .checked_add(i64::from(digit))
}

/// `value` if the digits fit `i64`, else the digits re-parsed as a bignum.
fn finish_integer(value: Option<i64>, digits: &str, base: u32) -> NumericValue {
    match value {
        Some(small) => NumericValue::Integer(small),
        None => NumericValue::Big(BigInt::from(bignum::parse_digits(digits, base))),
    }
}

/// Parse the float text from `start` to the cursor with separators
/// removed. Text the float parser rejects is treated as overflow.
///
/// A result clamped to infinity, or to zero from non-zero digits, is
/// out of range unless `reported` says that was already flagged.
fn decode_float(
    cursor: &Cursor<'_>,
    start: u32,
    issues: &mut Vec<LiteralIssue>,
    reported: bool,
) -> NumericValue {
    let text = cursor.slice_from(start);
    let plain: String = text.chars().filter(|&c| c != '_').collect();
    let value: f64 = plain.parse().unwrap_or(f64::INFINITY);

    let mantissa = plain.split(['e', 'E']).next().unwrap_or_default();
    let underflow = value == 0.0 && mantissa.chars().any(|c| matches!(c, '1'..='9'));
    if !reported && (value.is_infinite() || underflow) {
        issues.push(issue_here(IssueKind::FloatOutOfRange, start, cursor));
    }
    NumericValue::Float(value)
}

// ─── Integer() parsing ──────────────────────────────────────────────────

/// Lenient integer parsing of runtime strings.
///
/// Accepts `\s* [+-]? prefix? digits` where digits may be separated by
/// single underscores. `base == 0` means "take the base from the prefix"
/// (`0x`, `0b`, `0o`, `0d`, leading `0` for octal, decimal otherwise); an
/// explicit base only skips a prefix naming that same base. Parsing stops at
/// the first character that does not continue the number; no digits at all
/// yields 0.
pub fn parse_integer(text: &str, base: u32) -> NumericValue {
    let mut cursor = Cursor::new(text);
    cursor.eat_while(is_whitespace);

    let negative = match cursor.current() {
        '-' => {
            cursor.advance();
            true
        }
        '+' => {
            cursor.advance();
            false
        }
        _ => false,
    };

    let mut base = base;
    if cursor.eat('0') {
        let prefix_base = match cursor.current() {
            'x' | 'X' => 16,
            'b' | 'B' => 2,
            'd' | 'D' => 10,
            'o' | 'O' => 8,
            _ => 0,
        };
        if prefix_base != 0 {
            if base == 0 || base == prefix_base {
                base = prefix_base;
                cursor.advance();
            }
        } else if base == 0 {
            base = 8;
        }
    } else if base == 0 {
        base = 10;
    }

    let mut digits = String::new();
    let mut underscore_allowed = false;
    while !cursor.is_eof() {
        let c = cursor.current();
        if c == '_' {
            if !underscore_allowed {
                break;
            }
            underscore_allowed = false;
        } else if digit_value(c).is_some_and(|d| d < base) {
            digits.push(c);
            underscore_allowed = true;
        } else {
            break;
        }
        cursor.advance();
    }

    if digits.is_empty() {
        return NumericValue::Integer(0);
    }

    let magnitude = BigInt::from(bignum::parse_digits(&digits, base));
    NumericValue::from_big(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests;
