//! Backslash escape decoding.
//!
//! Every reader here starts with the cursor on the backslash and leaves it
//! after the escape. Malformed escapes push a [`LiteralIssue`] covering the
//! escape and decode to a placeholder (`?`, or nothing for an empty
//! `\u{}`), so the caller always gets content to continue with.
//!
//! A line terminator right after the backslash is a line continuation; the
//! string scanners handle it before calling in here. Inside an escape (after
//! `\M-`, `\C-`, `\c`) a CRLF reads as a single `\n`.

use crate::classify::is_hex_digit;
use crate::{Cursor, IssueKind, LiteralIssue};

const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// Result of a non-Unicode escape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EscapeValue {
    /// A computed byte (`\x80`, `\M-a`, `\n`, ...).
    Byte(u8),
    /// A character escaped for its own sake (`\"`, `\Σ`).
    Char(char),
}

impl EscapeValue {
    /// Append the value as UTF-8 / a raw byte. Returns true if a byte
    /// outside ASCII was written raw.
    pub fn write_to(self, out: &mut Vec<u8>) -> bool {
        match self {
            EscapeValue::Byte(byte) => {
                out.push(byte);
                !byte.is_ascii()
            }
            EscapeValue::Char(c) => {
                push_char(out, c);
                false
            }
        }
    }
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

/// Consume one character, reading CRLF as `\n`. `None` at end of input.
fn next_normalized(cursor: &mut Cursor<'_>) -> Option<char> {
    if cursor.is_eof() {
        return None;
    }
    if cursor.eat_str("\r\n") {
        return Some('\n');
    }
    Some(cursor.advance())
}

fn invalid(start: u32, cursor: &Cursor<'_>, issues: &mut Vec<LiteralIssue>) -> EscapeValue {
    issues.push(LiteralIssue::new(IssueKind::InvalidEscape, start, cursor.pos()));
    EscapeValue::Byte(b'?')
}

/// The low byte of a character code, as the meta and control escapes see it.
#[allow(clippy::cast_possible_truncation, reason = "masked to the low byte")]
fn low_byte(c: char) -> u8 {
    (u32::from(c) & 0xFF) as u8
}

fn escape_byte(value: EscapeValue) -> u8 {
    match value {
        EscapeValue::Byte(byte) => byte,
        EscapeValue::Char(c) => low_byte(c),
    }
}

/// Read a single escape other than `\u`:
///
/// `\\ \n \t \r \f \v \a \e \b \s`, `\xH[H]`, `\N[N[N]]` (octal),
/// `\M-x` (meta), `\C-x` / `\cx` (control), composable as in `\M-\C-x`.
/// Any other escaped character stands for itself.
pub fn read_escape(cursor: &mut Cursor<'_>, issues: &mut Vec<LiteralIssue>) -> EscapeValue {
    let start = cursor.pos();
    debug_assert_eq!(cursor.current(), '\\');
    cursor.advance();

    if cursor.is_eof() {
        return invalid(start, cursor, issues);
    }
    let c = cursor.advance();
    let byte = match c {
        '\\' => b'\\',
        'n' => b'\n',
        't' => b'\t',
        'r' => b'\r',
        'f' => 0x0C,
        'v' => 0x0B,
        'a' => 0x07,
        'e' => 0x1B,
        'b' => 0x08,
        's' => b' ',
        'x' => return read_hex(cursor, start, issues),
        'M' => {
            if !cursor.eat('-') {
                return invalid(start, cursor, issues);
            }
            if cursor.current() == '\\' {
                return EscapeValue::Byte(escape_byte(read_escape(cursor, issues)) | 0x80);
            }
            match next_normalized(cursor) {
                Some(c) => low_byte(c) | 0x80,
                None => return invalid(start, cursor, issues),
            }
        }
        'C' | 'c' => {
            if c == 'C' && !cursor.eat('-') {
                return invalid(start, cursor, issues);
            }
            if cursor.current() == '\\' {
                return EscapeValue::Byte(escape_byte(read_escape(cursor, issues)) & 0x9F);
            }
            match next_normalized(cursor) {
                Some('?') => 0x7F,
                Some(c) => low_byte(c) & 0x9F,
                None => return invalid(start, cursor, issues),
            }
        }
        '0'..='7' => read_octal(cursor, c),
        other => return EscapeValue::Char(other),
    };
    EscapeValue::Byte(byte)
}

/// Up to two more octal digits after `first`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "three octal digits are masked to a byte, as the runtime does"
)]
fn read_octal(cursor: &mut Cursor<'_>, first: char) -> u8 {
    let mut value = first.to_digit(8).unwrap_or(0);
    for _ in 0..2 {
        match cursor.current().to_digit(8) {
            Some(digit) => {
                cursor.advance();
                value = (value << 3) | digit;
            }
            None => break,
        }
    }
    (value & 0xFF) as u8
}

/// One or two hex digits after `\x`.
#[allow(clippy::cast_possible_truncation, reason = "two hex digits fit a byte")]
fn read_hex(cursor: &mut Cursor<'_>, start: u32, issues: &mut Vec<LiteralIssue>) -> EscapeValue {
    let Some(high) = cursor.current().to_digit(16) else {
        return invalid(start, cursor, issues);
    };
    cursor.advance();
    let mut value = high;
    if let Some(low) = cursor.current().to_digit(16) {
        cursor.advance();
        value = (value << 4) | low;
    }
    EscapeValue::Byte(value as u8)
}

/// Hex digits of one `\u{...}` code point. Returns the value (`?` when above
/// the Unicode range) and whether any digit was read.
fn read_code_point(cursor: &mut Cursor<'_>, issues: &mut Vec<LiteralIssue>) -> (u32, bool) {
    let start = cursor.pos();
    let mut value = 0u32;
    let mut count = 0;
    while let Some(digit) = cursor.current().to_digit(16) {
        // Seven digits are enough to know the value is out of range.
        if count < 7 {
            value = (value << 4) | digit;
        }
        count += 1;
        cursor.advance();
    }
    if value > MAX_CODE_POINT {
        issues.push(LiteralIssue::new(IssueKind::TooLargeCodePoint, start, cursor.pos()));
        value = u32::from('?');
    }
    (value, count > 0)
}

/// Exactly four hex digits after `\u`. Nothing is consumed when fewer
/// follow.
fn read_code_point4(cursor: &mut Cursor<'_>) -> Option<u32> {
    let digits = cursor.rest().get(..4)?;
    if !digits.chars().all(is_hex_digit) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    cursor.advance_n(4);
    Some(value)
}

/// Character for `code`, `?` (plus an issue) for surrogates.
fn code_point_char(code: u32, start: u32, cursor: &Cursor<'_>, issues: &mut Vec<LiteralIssue>) -> char {
    char::from_u32(code).unwrap_or_else(|| {
        issues.push(LiteralIssue::new(IssueKind::InvalidUnicodeEscape, start, cursor.pos()));
        '?'
    })
}

/// `\uHHHH` or a single-code-point `\u{H...}`, as in character literals.
///
/// An empty `\u{}` gives `'\0'`; a missing `}` is reported and the code
/// point read so far is kept.
pub fn read_unicode_char(cursor: &mut Cursor<'_>, issues: &mut Vec<LiteralIssue>) -> char {
    let start = cursor.pos();
    debug_assert!(cursor.starts_with("\\u"));
    cursor.advance_n(2);

    if !cursor.eat('{') {
        return match read_code_point4(cursor) {
            Some(code) => code_point_char(code, start, cursor, issues),
            None => {
                issues.push(LiteralIssue::new(IssueKind::InvalidEscape, start, cursor.pos()));
                '?'
            }
        };
    }

    let (code, read_any) = read_code_point(cursor, issues);
    let mut empty = !read_any;
    if !cursor.eat('}') {
        issues.push(LiteralIssue::new(IssueKind::UnterminatedUnicodeEscape, start, cursor.pos()));
        empty = false;
    }
    if empty {
        issues.push(LiteralIssue::new(IssueKind::InvalidUnicodeEscape, start, cursor.pos()));
    }
    code_point_char(code, start, cursor, issues)
}

/// `\u{H H ...}`: a space-separated list of code points, each appended to
/// `out` as UTF-8. Returns true if any code point is outside ASCII.
pub fn read_unicode_list(
    cursor: &mut Cursor<'_>,
    out: &mut Vec<u8>,
    issues: &mut Vec<LiteralIssue>,
) -> bool {
    let start = cursor.pos();
    debug_assert!(cursor.starts_with("\\u{"));
    cursor.advance_n(3);

    let mut non_ascii = false;
    let mut empty;
    loop {
        let (code, read_any) = read_code_point(cursor, issues);
        empty = !read_any;
        if read_any {
            push_char(out, code_point_char(code, start, cursor, issues));
            non_ascii |= code > 0x7F;
        }
        if cursor.eat('}') {
            break;
        }
        if !cursor.eat(' ') {
            issues.push(LiteralIssue::new(IssueKind::UnterminatedUnicodeEscape, start, cursor.pos()));
            empty = false;
            break;
        }
    }
    if empty {
        issues.push(LiteralIssue::new(IssueKind::InvalidUnicodeEscape, start, cursor.pos()));
    }
    non_ascii
}

/// Decode the escape at the cursor into `out`, for strings that expand
/// escapes. Returns true if a non-ASCII byte was written raw (as opposed to
/// a UTF-8 encoded character).
pub fn decode_escape(
    cursor: &mut Cursor<'_>,
    out: &mut Vec<u8>,
    issues: &mut Vec<LiteralIssue>,
) -> bool {
    if cursor.starts_with("\\u{") {
        read_unicode_list(cursor, out, issues);
        false
    } else if cursor.starts_with("\\u") {
        push_char(out, read_unicode_char(cursor, issues));
        false
    } else {
        read_escape(cursor, issues).write_to(out)
    }
}

/// Copy the escape at the cursor into regex source `out` unchanged, after
/// checking it is well formed.
///
/// A regex engine decodes escapes itself, so the text is kept; only the
/// numeric forms are validated here, and malformed `\M`/`\C` prefixes are
/// dropped. Returns true if a `\u` escape names a non-ASCII code point.
pub fn copy_regex_escape(
    cursor: &mut Cursor<'_>,
    out: &mut Vec<u8>,
    issues: &mut Vec<LiteralIssue>,
) -> bool {
    let start = cursor.pos();
    debug_assert_eq!(cursor.current(), '\\');
    cursor.advance();

    if cursor.is_eof() {
        invalid(start, cursor, issues);
        return false;
    }

    match cursor.current() {
        'u' => {
            cursor.reset_to(start);
            let mut scratch = Vec::new();
            let non_ascii = decode_unicode_escape(cursor, &mut scratch, issues);
            out.extend_from_slice(cursor.slice_from(start).as_bytes());
            non_ascii
        }
        'x' => {
            cursor.advance();
            read_hex(cursor, start, issues);
            out.extend_from_slice(cursor.slice_from(start).as_bytes());
            false
        }
        c @ '0'..='7' => {
            cursor.advance();
            read_octal(cursor, c);
            out.extend_from_slice(cursor.slice_from(start).as_bytes());
            false
        }
        prefix @ ('M' | 'C') => {
            cursor.advance();
            if !cursor.eat('-') {
                invalid(start, cursor, issues);
                return false;
            }
            out.extend_from_slice(if prefix == 'M' { b"\\M-" } else { b"\\C-" });
            copy_regex_composite(cursor, out, issues)
        }
        'c' => {
            cursor.advance();
            out.extend_from_slice(b"\\c");
            copy_regex_composite(cursor, out, issues)
        }
        _ => {
            let c = cursor.advance();
            out.push(b'\\');
            push_char(out, c);
            false
        }
    }
}

/// `\u` forms with the cursor on the backslash.
fn decode_unicode_escape(
    cursor: &mut Cursor<'_>,
    out: &mut Vec<u8>,
    issues: &mut Vec<LiteralIssue>,
) -> bool {
    if cursor.starts_with("\\u{") {
        read_unicode_list(cursor, out, issues)
    } else {
        let c = read_unicode_char(cursor, issues);
        push_char(out, c);
        !c.is_ascii()
    }
}

/// The target of `\M-`, `\C-` or `\c` inside a regex.
fn copy_regex_composite(
    cursor: &mut Cursor<'_>,
    out: &mut Vec<u8>,
    issues: &mut Vec<LiteralIssue>,
) -> bool {
    let start = cursor.pos();
    if cursor.current() == '\\' {
        return copy_regex_escape(cursor, out, issues);
    }
    match next_normalized(cursor) {
        Some(c) => push_char(out, c),
        None => {
            invalid(start, cursor, issues);
        }
    }
    false
}

/// Escape sequence that decodes back to exactly `c`.
///
/// Named escapes where one exists, `\xHH` for other ASCII, `\u{H...}`
/// beyond ASCII.
pub fn encode_escape(c: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '\x0C' => "\\f".to_string(),
        '\x0B' => "\\v".to_string(),
        '\x07' => "\\a".to_string(),
        '\x1B' => "\\e".to_string(),
        '\x08' => "\\b".to_string(),
        ' ' => "\\s".to_string(),
        c if c.is_ascii() => format!("\\x{:02X}", u32::from(c)),
        c => format!("\\u{{{:X}}}", u32::from(c)),
    }
}
