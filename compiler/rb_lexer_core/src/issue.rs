//! Problems found while decoding a literal.
//!
//! Decoders never fail: they substitute a placeholder, push a
//! [`LiteralIssue`] and keep going. The scanner turns issues into
//! diagnostics and decides their severity.

/// What went wrong inside a literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IssueKind {
    // === Numbers ===
    /// `1_`, `1__2`.
    TrailingUnderscore,
    /// `0x`, `0b_`.
    NumericLiteralWithoutDigits,
    /// `08`.
    IllegalOctalDigit,
    /// `0x1.5`, `00.0`.
    NoFloatingLiteral,
    /// `1e`.
    TrailingE,
    /// `1e+`.
    TrailingPlus,
    /// `1e-`.
    TrailingMinus,
    /// Decimal exponent outside the range the runtime accepts.
    FloatOutOfRange,

    // === Escapes ===
    /// `\x` without digits, `\M` without `-`, escape at end of input.
    InvalidEscape,
    /// `\u{` without the closing brace.
    UnterminatedUnicodeEscape,
    /// `\u{}`.
    InvalidUnicodeEscape,
    /// Code point above `0x10FFFF`.
    TooLargeCodePoint,
}

/// An issue and the byte range it covers, in cursor offsets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LiteralIssue {
    pub kind: IssueKind,
    pub start: u32,
    pub end: u32,
}

impl LiteralIssue {
    #[inline]
    pub fn new(kind: IssueKind, start: u32, end: u32) -> Self {
        LiteralIssue { kind, start, end }
    }
}
