//! Lexical problems.
//!
//! Nothing here is an `Err`: every problem becomes a diagnostic, the scanner
//! substitutes a placeholder and keeps going. Each kind maps to one stable
//! [`ErrorCode`]; its `Display` text is the diagnostic message.

use rb_diagnostic::{ErrorCode, Severity, SeverityPolicy};
use rb_lexer_core::IssueKind;

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    // === Unterminated constructs ===
    #[error("unterminated string meets end of file")]
    UnterminatedString,
    #[error("can't find string \"{label}\" anywhere before EOF")]
    UnterminatedHereDoc { label: String },
    #[error("unterminated here document identifier")]
    UnterminatedHereDocIdentifier,
    #[error("embedded document meets end of file")]
    UnterminatedEmbeddedDocument,

    // === Escapes ===
    #[error("invalid escape character syntax")]
    InvalidEscapeCharacter,
    #[error("unterminated Unicode escape")]
    UnterminatedUnicodeEscape,
    #[error("invalid Unicode escape")]
    InvalidUnicodeEscape,
    #[error("invalid Unicode codepoint (too large)")]
    TooLargeUnicodeCodePoint,

    // === Numbers ===
    #[error("trailing `_' in number")]
    TrailingUnderscoreInNumber,
    #[error("numeric literal without digits")]
    NumericLiteralWithoutDigits,
    #[error("illegal octal digit")]
    IllegalOctalDigit,
    #[error("no .<digit> floating literal anymore; put 0 before dot")]
    NoFloatingLiteral,
    #[error("trailing `e' in number")]
    TrailingEInNumber,
    #[error("trailing `+' in number")]
    TrailingPlusInNumber,
    #[error("trailing `-' in number")]
    TrailingMinusInNumber,
    #[error("float out of range")]
    FloatOutOfRange,

    // === Literals and names ===
    #[error("unknown type of %string")]
    UnknownQuotedStringType,
    #[error("unknown regexp option: {option}")]
    UnknownRegexOption { option: char },
    #[error("invalid character in expression: {found:?}")]
    InvalidCharacterInExpression { found: char },
    #[error("`@{digit}' is not allowed as an instance variable name")]
    InvalidInstanceVariableName { digit: char },
    #[error("`@@{digit}' is not allowed as a class variable name")]
    InvalidClassVariableName { digit: char },
    #[error("`${name}' is not allowed as a global variable name")]
    InvalidGlobalVariableName { name: String },
    #[error("`${number}' is too big for a match group reference")]
    MatchGroupReferenceOverflow { number: String },
    #[error("incomplete character syntax")]
    IncompleteCharacter,
    #[error("invalid character syntax; use ?\\{escape}")]
    InvalidCharacterSyntax { escape: char },

    // === Ambiguity warnings ===
    #[error("ambiguous first argument; put parentheses or even spaces")]
    AmbiguousFirstArgument,
    #[error("`*' interpreted as argument prefix")]
    StarInterpretedAsSplat,
    #[error("`&' interpreted as argument prefix")]
    AmpersandInterpretedAsBlock,

    // === Limits ===
    #[error("literal nesting too deep (limit {limit})")]
    NestingTooDeep { limit: u32 },
    #[error("byte order mark ignored")]
    ByteOrderMarkIgnored,
}

impl LexErrorKind {
    /// The stable code this kind is reported under.
    pub fn code(&self) -> ErrorCode {
        match self {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::UnterminatedHereDoc { .. } => ErrorCode::E0002,
            LexErrorKind::UnterminatedHereDocIdentifier => ErrorCode::E0003,
            LexErrorKind::UnterminatedEmbeddedDocument => ErrorCode::E0004,
            LexErrorKind::InvalidEscapeCharacter => ErrorCode::E0005,
            LexErrorKind::UnterminatedUnicodeEscape => ErrorCode::E0006,
            LexErrorKind::InvalidUnicodeEscape => ErrorCode::E0007,
            LexErrorKind::TooLargeUnicodeCodePoint => ErrorCode::E0008,
            LexErrorKind::TrailingUnderscoreInNumber => ErrorCode::E0009,
            LexErrorKind::NumericLiteralWithoutDigits => ErrorCode::E0010,
            LexErrorKind::IllegalOctalDigit => ErrorCode::E0011,
            LexErrorKind::NoFloatingLiteral => ErrorCode::E0012,
            LexErrorKind::TrailingEInNumber => ErrorCode::E0013,
            LexErrorKind::TrailingPlusInNumber => ErrorCode::E0014,
            LexErrorKind::TrailingMinusInNumber => ErrorCode::E0015,
            LexErrorKind::FloatOutOfRange => ErrorCode::E0016,
            LexErrorKind::UnknownQuotedStringType => ErrorCode::E0017,
            LexErrorKind::UnknownRegexOption { .. } => ErrorCode::E0018,
            LexErrorKind::InvalidCharacterInExpression { .. } => ErrorCode::E0019,
            LexErrorKind::InvalidInstanceVariableName { .. } => ErrorCode::E0020,
            LexErrorKind::InvalidClassVariableName { .. } => ErrorCode::E0021,
            LexErrorKind::InvalidGlobalVariableName { .. } => ErrorCode::E0022,
            LexErrorKind::MatchGroupReferenceOverflow { .. } => ErrorCode::E0023,
            LexErrorKind::IncompleteCharacter => ErrorCode::E0024,
            LexErrorKind::InvalidCharacterSyntax { .. } => ErrorCode::E0025,
            LexErrorKind::AmbiguousFirstArgument => ErrorCode::E0026,
            LexErrorKind::StarInterpretedAsSplat => ErrorCode::E0027,
            LexErrorKind::AmpersandInterpretedAsBlock => ErrorCode::E0028,
            LexErrorKind::NestingTooDeep { .. } => ErrorCode::E0029,
            LexErrorKind::ByteOrderMarkIgnored => ErrorCode::E0030,
        }
    }

    /// Severity when neither the call site nor the configuration says
    /// otherwise.
    #[inline]
    pub fn default_severity(&self) -> Severity {
        SeverityPolicy::default_severity(self.code())
    }
}

impl From<IssueKind> for LexErrorKind {
    fn from(kind: IssueKind) -> Self {
        match kind {
            IssueKind::TrailingUnderscore => LexErrorKind::TrailingUnderscoreInNumber,
            IssueKind::NumericLiteralWithoutDigits => LexErrorKind::NumericLiteralWithoutDigits,
            IssueKind::IllegalOctalDigit => LexErrorKind::IllegalOctalDigit,
            IssueKind::NoFloatingLiteral => LexErrorKind::NoFloatingLiteral,
            IssueKind::TrailingE => LexErrorKind::TrailingEInNumber,
            IssueKind::TrailingPlus => LexErrorKind::TrailingPlusInNumber,
            IssueKind::TrailingMinus => LexErrorKind::TrailingMinusInNumber,
            IssueKind::FloatOutOfRange => LexErrorKind::FloatOutOfRange,
            IssueKind::InvalidEscape => LexErrorKind::InvalidEscapeCharacter,
            IssueKind::UnterminatedUnicodeEscape => LexErrorKind::UnterminatedUnicodeEscape,
            IssueKind::InvalidUnicodeEscape => LexErrorKind::InvalidUnicodeEscape,
            IssueKind::TooLargeCodePoint => LexErrorKind::TooLargeUnicodeCodePoint,
        }
    }
}
