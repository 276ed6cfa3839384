use std::fmt;

/// Error codes for all scanner diagnostics.
///
/// Format: E#### in the `E0xxx` (lexical) range. Codes are stable; new
/// problems get new numbers, retired ones are never reused.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    // Unterminated constructs
    /// String, symbol, regex, word list or shell string missing its closer
    E0001,
    /// Heredoc body without a terminating label line
    E0002,
    /// Quoted heredoc label missing its closing quote
    E0003,
    /// `=begin` block without `=end`
    E0004,

    // Escapes
    /// Invalid escape sequence
    E0005,
    /// `\u{` without closing `}`
    E0006,
    /// Empty or malformed Unicode escape
    E0007,
    /// Unicode code point above U+10FFFF
    E0008,

    // Numbers
    /// Trailing or doubled underscore in numeric literal
    E0009,
    /// Numeric prefix with no digits
    E0010,
    /// Digit 8 or 9 in an octal literal
    E0011,
    /// `.` followed by digits that cannot form a float literal
    E0012,
    /// Exponent marker without digits
    E0013,
    /// `e+` without digits
    E0014,
    /// `e-` without digits
    E0015,
    /// Float literal out of range
    E0016,

    // Literals and names
    /// Unknown `%` literal type
    E0017,
    /// Unknown regex option letter
    E0018,
    /// Character not valid in an expression
    E0019,
    /// `@` followed by a digit
    E0020,
    /// `@@` followed by a digit
    E0021,
    /// Malformed global variable name
    E0022,
    /// `$n` match reference too large
    E0023,
    /// `?` at end of input
    E0024,
    /// `?` followed by whitespace
    E0025,

    // Ambiguity warnings
    /// Ambiguous first argument (`foo -1`, `foo /x/`)
    E0026,
    /// `*` interpreted as splat
    E0027,
    /// `&` interpreted as block argument
    E0028,

    // Resource limits and input
    /// Nesting of literals and interpolations too deep
    E0029,
    /// UTF-8 byte order mark skipped
    E0030,
}

impl ErrorCode {
    /// All codes, in numeric order.
    pub const ALL: [ErrorCode; 30] = [
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        ErrorCode::E0009,
        ErrorCode::E0010,
        ErrorCode::E0011,
        ErrorCode::E0012,
        ErrorCode::E0013,
        ErrorCode::E0014,
        ErrorCode::E0015,
        ErrorCode::E0016,
        ErrorCode::E0017,
        ErrorCode::E0018,
        ErrorCode::E0019,
        ErrorCode::E0020,
        ErrorCode::E0021,
        ErrorCode::E0022,
        ErrorCode::E0023,
        ErrorCode::E0024,
        ErrorCode::E0025,
        ErrorCode::E0026,
        ErrorCode::E0027,
        ErrorCode::E0028,
        ErrorCode::E0029,
        ErrorCode::E0030,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E0009 => "E0009",
            ErrorCode::E0010 => "E0010",
            ErrorCode::E0011 => "E0011",
            ErrorCode::E0012 => "E0012",
            ErrorCode::E0013 => "E0013",
            ErrorCode::E0014 => "E0014",
            ErrorCode::E0015 => "E0015",
            ErrorCode::E0016 => "E0016",
            ErrorCode::E0017 => "E0017",
            ErrorCode::E0018 => "E0018",
            ErrorCode::E0019 => "E0019",
            ErrorCode::E0020 => "E0020",
            ErrorCode::E0021 => "E0021",
            ErrorCode::E0022 => "E0022",
            ErrorCode::E0023 => "E0023",
            ErrorCode::E0024 => "E0024",
            ErrorCode::E0025 => "E0025",
            ErrorCode::E0026 => "E0026",
            ErrorCode::E0027 => "E0027",
            ErrorCode::E0028 => "E0028",
            ErrorCode::E0029 => "E0029",
            ErrorCode::E0030 => "E0030",
        }
    }

    /// One-line description used when a report carries no message of its own.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string meets end of file",
            ErrorCode::E0002 => "can't find heredoc terminator anywhere before end of file",
            ErrorCode::E0003 => "unterminated heredoc identifier",
            ErrorCode::E0004 => "embedded document meets end of file",
            ErrorCode::E0005 => "invalid escape character syntax",
            ErrorCode::E0006 => "unterminated Unicode escape",
            ErrorCode::E0007 => "invalid Unicode escape",
            ErrorCode::E0008 => "invalid Unicode codepoint (too large)",
            ErrorCode::E0009 => "trailing `_' in number",
            ErrorCode::E0010 => "numeric literal without digits",
            ErrorCode::E0011 => "illegal octal digit",
            ErrorCode::E0012 => "no .<digit> floating literal anymore; put 0 before dot",
            ErrorCode::E0013 => "trailing `e' in number",
            ErrorCode::E0014 => "trailing `+' in number",
            ErrorCode::E0015 => "trailing `-' in number",
            ErrorCode::E0016 => "float out of range",
            ErrorCode::E0017 => "unknown type of %string",
            ErrorCode::E0018 => "unknown regexp option",
            ErrorCode::E0019 => "invalid character in expression",
            ErrorCode::E0020 => "invalid instance variable name",
            ErrorCode::E0021 => "invalid class variable name",
            ErrorCode::E0022 => "invalid global variable name",
            ErrorCode::E0023 => "match group reference too big",
            ErrorCode::E0024 => "incomplete character syntax",
            ErrorCode::E0025 => "invalid character syntax; use ?\\s",
            ErrorCode::E0026 => "ambiguous first argument; put parentheses or even spaces",
            ErrorCode::E0027 => "`*' interpreted as argument prefix",
            ErrorCode::E0028 => "`&' interpreted as argument prefix",
            ErrorCode::E0029 => "literal nesting too deep",
            ErrorCode::E0030 => "byte order mark ignored",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests;
