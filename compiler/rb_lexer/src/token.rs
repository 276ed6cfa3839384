//! Token model.
//!
//! A [`Token`] is a [`TokenKind`], an optional [`TokenValue`] and the
//! [`SourceSpan`] it covers. Tokens are created by one scanner step and never
//! change afterwards.

mod category;

use std::fmt;

use num_bigint::BigInt;
use rb_ir::{SourceEncoding, SourceSpan};

pub use category::{TokenCategory, TokenTriggers};

/// Token kinds.
///
/// Context decides between several kinds for the same text: `/` is either
/// `Slash` or `RegexBegin`, `[` is `LeftBracket` or `LeftIndexingBracket`,
/// and so on. Trivia kinds only appear when the scanner runs in trivia mode.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // === Keywords ===
    Alias,
    And,
    Begin,
    /// `BEGIN`
    BeginUpper,
    Break,
    Case,
    Class,
    Def,
    /// `defined?`
    Defined,
    /// `do` with no special context.
    Do,
    /// `do` closing a `while`/`until`/`for` condition.
    LoopDo,
    /// `do` starting a block passed to a command call.
    BlockDo,
    /// `do` starting a lambda body.
    LambdaDo,
    Else,
    Elsif,
    End,
    /// `END`
    EndUpper,
    Ensure,
    False,
    For,
    If,
    /// `if` used as a statement modifier.
    IfMod,
    In,
    Module,
    Next,
    Nil,
    Not,
    Or,
    Redo,
    Rescue,
    RescueMod,
    Retry,
    Return,
    /// `self`
    SelfKw,
    Super,
    Then,
    True,
    Undef,
    Unless,
    UnlessMod,
    Until,
    UntilMod,
    When,
    While,
    WhileMod,
    Yield,
    /// `__LINE__`
    Line,
    /// `__FILE__`
    File,
    /// `__ENCODING__`
    EncodingKw,

    // === Identifiers ===
    Identifier,
    /// Method name ending in `!` or `?`.
    FunctionIdentifier,
    ConstantIdentifier,
    /// `name:` in argument position.
    Label,
    GlobalVariable,
    InstanceVariable,
    ClassVariable,
    /// `$1`, `$&`, `` $` ``, `$'`, `$+`.
    MatchReference,

    // === Literals ===
    Integer,
    BigInteger,
    Float,
    /// `?a`
    Character,
    StringBegin,
    StringContent,
    StringEnd,
    /// `#{`
    StringEmbeddedCodeBegin,
    /// `}` closing an interpolation.
    StringEmbeddedCodeEnd,
    /// `#` before `$var` or `@var` inside a string.
    StringEmbeddedVariableBegin,
    ShellStringBegin,
    SymbolBegin,
    /// `%W(`
    WordsBegin,
    /// `%w(`
    VerbatimWordsBegin,
    WordSeparator,
    RegexBegin,
    RegexEnd,
    VerbatimHeredocBegin,
    VerbatimHeredocEnd,

    // === Operators ===
    Assignment,
    /// `+=`, `<<=`, `||=`, ...; the value names the operator.
    OpAssignment,
    Equal,
    StrictEqual,
    NotEqual,
    Match,
    NotMatch,
    Cmp,
    LessOrEqual,
    GreaterOrEqual,
    Less,
    Greater,
    Lshft,
    Rshft,
    Plus,
    Minus,
    /// `*` as a splat.
    Star,
    /// `*` as multiplication.
    Asterisk,
    Pow,
    Slash,
    Percent,
    Ampersand,
    /// `&` as a block argument prefix.
    BlockReference,
    Pipe,
    Caret,
    Tilde,
    Bang,
    UnaryPlus,
    UnaryMinus,
    /// `-` directly before a numeric literal.
    NumberNegation,
    And2,
    Or2,

    // === Punctuation ===
    Dot,
    DoubleDot,
    TripleDot,
    /// `::` after an expression.
    SeparatingDoubleColon,
    /// `::` starting a constant path.
    LeadingDoubleColon,
    Colon,
    QuestionMark,
    Comma,
    Semicolon,
    DoubleArrow,
    /// `->`
    Lambda,
    LeftParenthesis,
    /// `(` after a space in argument position: `foo (1)`.
    LeftArgParenthesis,
    /// `(` starting an expression.
    LeftExprParenthesis,
    RightParenthesis,
    /// `[` starting an array literal.
    LeftBracket,
    /// `[` indexing the preceding expression.
    LeftIndexingBracket,
    RightBracket,
    /// `{` starting a hash literal.
    LeftBrace,
    /// `{` starting a block.
    LeftBlockBrace,
    /// `{` starting a block after a parenthesised argument list.
    LeftBlockArgBrace,
    /// `{` starting a lambda body.
    LeftLambdaBrace,
    RightBrace,
    Backslash,
    Backtick,
    Dollar,
    At,

    // === Operator method names ===
    /// `[]`
    ItemReference,
    /// `[]=`
    ItemAssign,
    /// `+@`
    UnaryPlusOp,
    /// `-@`
    UnaryMinusOp,
    /// `~@`
    UnaryTildeOp,
    /// `!@`
    UnaryBangOp,

    // === Layout and trivia ===
    /// Significant line end.
    NewLine,
    Whitespace,
    /// Line end that does not terminate a statement.
    EndOfLine,
    SingleLineComment,
    MultiLineComment,
    /// The `__END__` line; the data after it is left unscanned.
    EndOfFileData,

    // === Errors ===
    InvalidCharacter,

    EndOfFile,
}

impl TokenKind {
    /// Stable display name.
    #[expect(
        clippy::too_many_lines,
        reason = "exhaustive TokenKind → display name dispatch"
    )]
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Alias => "alias",
            TokenKind::And => "and",
            TokenKind::Begin => "begin",
            TokenKind::BeginUpper => "BEGIN",
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Class => "class",
            TokenKind::Def => "def",
            TokenKind::Defined => "defined?",
            TokenKind::Do => "do",
            TokenKind::LoopDo => "do (loop)",
            TokenKind::BlockDo => "do (block)",
            TokenKind::LambdaDo => "do (lambda)",
            TokenKind::Else => "else",
            TokenKind::Elsif => "elsif",
            TokenKind::End => "end",
            TokenKind::EndUpper => "END",
            TokenKind::Ensure => "ensure",
            TokenKind::False => "false",
            TokenKind::For => "for",
            TokenKind::If => "if",
            TokenKind::IfMod => "if (modifier)",
            TokenKind::In => "in",
            TokenKind::Module => "module",
            TokenKind::Next => "next",
            TokenKind::Nil => "nil",
            TokenKind::Not => "not",
            TokenKind::Or => "or",
            TokenKind::Redo => "redo",
            TokenKind::Rescue => "rescue",
            TokenKind::RescueMod => "rescue (modifier)",
            TokenKind::Retry => "retry",
            TokenKind::Return => "return",
            TokenKind::SelfKw => "self",
            TokenKind::Super => "super",
            TokenKind::Then => "then",
            TokenKind::True => "true",
            TokenKind::Undef => "undef",
            TokenKind::Unless => "unless",
            TokenKind::UnlessMod => "unless (modifier)",
            TokenKind::Until => "until",
            TokenKind::UntilMod => "until (modifier)",
            TokenKind::When => "when",
            TokenKind::While => "while",
            TokenKind::WhileMod => "while (modifier)",
            TokenKind::Yield => "yield",
            TokenKind::Line => "__LINE__",
            TokenKind::File => "__FILE__",
            TokenKind::EncodingKw => "__ENCODING__",

            TokenKind::Identifier => "identifier",
            TokenKind::FunctionIdentifier => "method name",
            TokenKind::ConstantIdentifier => "constant",
            TokenKind::Label => "label",
            TokenKind::GlobalVariable => "global variable",
            TokenKind::InstanceVariable => "instance variable",
            TokenKind::ClassVariable => "class variable",
            TokenKind::MatchReference => "match reference",

            TokenKind::Integer => "integer",
            TokenKind::BigInteger => "big integer",
            TokenKind::Float => "float",
            TokenKind::Character => "character",
            TokenKind::StringBegin => "string begin",
            TokenKind::StringContent => "string content",
            TokenKind::StringEnd => "string end",
            TokenKind::StringEmbeddedCodeBegin => "#{",
            TokenKind::StringEmbeddedCodeEnd => "} (interpolation)",
            TokenKind::StringEmbeddedVariableBegin => "#",
            TokenKind::ShellStringBegin => "shell string begin",
            TokenKind::SymbolBegin => "symbol begin",
            TokenKind::WordsBegin => "%W",
            TokenKind::VerbatimWordsBegin => "%w",
            TokenKind::WordSeparator => "word separator",
            TokenKind::RegexBegin => "regex begin",
            TokenKind::RegexEnd => "regex end",
            TokenKind::VerbatimHeredocBegin => "heredoc begin",
            TokenKind::VerbatimHeredocEnd => "heredoc end",

            TokenKind::Assignment => "=",
            TokenKind::OpAssignment => "op-assign",
            TokenKind::Equal => "==",
            TokenKind::StrictEqual => "===",
            TokenKind::NotEqual => "!=",
            TokenKind::Match => "=~",
            TokenKind::NotMatch => "!~",
            TokenKind::Cmp => "<=>",
            TokenKind::LessOrEqual => "<=",
            TokenKind::GreaterOrEqual => ">=",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Lshft => "<<",
            TokenKind::Rshft => ">>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "* (splat)",
            TokenKind::Asterisk => "*",
            TokenKind::Pow => "**",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Ampersand => "&",
            TokenKind::BlockReference => "& (block)",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::Bang => "!",
            TokenKind::UnaryPlus => "+ (unary)",
            TokenKind::UnaryMinus => "- (unary)",
            TokenKind::NumberNegation => "- (number)",
            TokenKind::And2 => "&&",
            TokenKind::Or2 => "||",

            TokenKind::Dot => ".",
            TokenKind::DoubleDot => "..",
            TokenKind::TripleDot => "...",
            TokenKind::SeparatingDoubleColon => "::",
            TokenKind::LeadingDoubleColon => ":: (leading)",
            TokenKind::Colon => ":",
            TokenKind::QuestionMark => "?",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::DoubleArrow => "=>",
            TokenKind::Lambda => "->",
            TokenKind::LeftParenthesis => "(",
            TokenKind::LeftArgParenthesis => "( (argument)",
            TokenKind::LeftExprParenthesis => "( (expression)",
            TokenKind::RightParenthesis => ")",
            TokenKind::LeftBracket => "[",
            TokenKind::LeftIndexingBracket => "[ (index)",
            TokenKind::RightBracket => "]",
            TokenKind::LeftBrace => "{",
            TokenKind::LeftBlockBrace => "{ (block)",
            TokenKind::LeftBlockArgBrace => "{ (block after arguments)",
            TokenKind::LeftLambdaBrace => "{ (lambda)",
            TokenKind::RightBrace => "}",
            TokenKind::Backslash => "\\",
            TokenKind::Backtick => "`",
            TokenKind::Dollar => "$",
            TokenKind::At => "@",

            TokenKind::ItemReference => "[]",
            TokenKind::ItemAssign => "[]=",
            TokenKind::UnaryPlusOp => "+@",
            TokenKind::UnaryMinusOp => "-@",
            TokenKind::UnaryTildeOp => "~@",
            TokenKind::UnaryBangOp => "!@",

            TokenKind::NewLine => "newline",
            TokenKind::Whitespace => "whitespace",
            TokenKind::EndOfLine => "end of line",
            TokenKind::SingleLineComment => "comment",
            TokenKind::MultiLineComment => "embedded document",
            TokenKind::EndOfFileData => "__END__",

            TokenKind::InvalidCharacter => "invalid character",
            TokenKind::EndOfFile => "end of file",
        }
    }

    /// Tokens only emitted in trivia mode.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::EndOfLine
                | TokenKind::SingleLineComment
                | TokenKind::MultiLineComment
                | TokenKind::EndOfFileData
        )
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Alias
                | TokenKind::And
                | TokenKind::Begin
                | TokenKind::BeginUpper
                | TokenKind::Break
                | TokenKind::Case
                | TokenKind::Class
                | TokenKind::Def
                | TokenKind::Defined
                | TokenKind::Do
                | TokenKind::LoopDo
                | TokenKind::BlockDo
                | TokenKind::LambdaDo
                | TokenKind::Else
                | TokenKind::Elsif
                | TokenKind::End
                | TokenKind::EndUpper
                | TokenKind::Ensure
                | TokenKind::False
                | TokenKind::For
                | TokenKind::If
                | TokenKind::IfMod
                | TokenKind::In
                | TokenKind::Module
                | TokenKind::Next
                | TokenKind::Nil
                | TokenKind::Not
                | TokenKind::Or
                | TokenKind::Redo
                | TokenKind::Rescue
                | TokenKind::RescueMod
                | TokenKind::Retry
                | TokenKind::Return
                | TokenKind::SelfKw
                | TokenKind::Super
                | TokenKind::Then
                | TokenKind::True
                | TokenKind::Undef
                | TokenKind::Unless
                | TokenKind::UnlessMod
                | TokenKind::Until
                | TokenKind::UntilMod
                | TokenKind::When
                | TokenKind::While
                | TokenKind::WhileMod
                | TokenKind::Yield
                | TokenKind::Line
                | TokenKind::File
                | TokenKind::EncodingKw
        )
    }

    /// Tokens after which the parser may start a new statement.
    pub(crate) fn enters_command_mode(self) -> bool {
        matches!(
            self,
            TokenKind::NewLine
                | TokenKind::Semicolon
                | TokenKind::Do
                | TokenKind::LoopDo
                | TokenKind::BlockDo
                | TokenKind::LambdaDo
                | TokenKind::LeftBlockBrace
                | TokenKind::LeftBlockArgBrace
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// Options trailing a regex literal.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct RegexOptions: u16 {
        /// `i`
        const IGNORE_CASE = 1;
        /// `x`
        const EXTENDED = 1 << 1;
        /// `m`
        const MULTILINE = 1 << 2;
        /// `o`
        const ONCE = 1 << 3;
        /// `n`
        const FIXED = 1 << 4;
        /// `e`
        const EUC = 1 << 5;
        /// `s`
        const SJIS = 1 << 6;
        /// `u`
        const UTF8 = 1 << 7;
    }
}

impl RegexOptions {
    /// The encoding options; at most one is set.
    pub const ENCODING_MASK: RegexOptions = RegexOptions::FIXED
        .union(RegexOptions::EUC)
        .union(RegexOptions::SJIS)
        .union(RegexOptions::UTF8);

    /// Option for an option letter, `None` if the letter is not an option.
    pub fn from_letter(c: char) -> Option<RegexOptions> {
        Some(match c {
            'i' => RegexOptions::IGNORE_CASE,
            'x' => RegexOptions::EXTENDED,
            'm' => RegexOptions::MULTILINE,
            'o' => RegexOptions::ONCE,
            'n' => RegexOptions::FIXED,
            'e' => RegexOptions::EUC,
            's' => RegexOptions::SJIS,
            'u' => RegexOptions::UTF8,
            _ => return None,
        })
    }
}

/// Operator of an `OpAssignment` token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Star => "*",
            BinaryOp::Slash => "/",
            BinaryOp::Percent => "%",
            BinaryOp::Pow => "**",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

/// Decoded string content.
///
/// Content is `Text` whenever it is valid UTF-8 and the encoding can carry
/// it; escapes producing raw bytes outside ASCII make it `Bytes`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StringContent {
    Text(String),
    Bytes(Vec<u8>),
}

impl StringContent {
    /// Content built from decoded bytes under `encoding`.
    pub fn from_bytes(bytes: Vec<u8>, encoding: SourceEncoding) -> Self {
        if !encoding.is_unicode() && !bytes.is_ascii() {
            return StringContent::Bytes(bytes);
        }
        match String::from_utf8(bytes) {
            Ok(text) => StringContent::Text(text),
            Err(err) => StringContent::Bytes(err.into_bytes()),
        }
    }

    /// The content as text, `None` for raw bytes.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StringContent::Text(text) => Some(text),
            StringContent::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            StringContent::Text(text) => text.as_bytes(),
            StringContent::Bytes(bytes) => bytes,
        }
    }
}

/// Payload of a token.
#[derive(Clone, PartialEq, Debug)]
pub enum TokenValue {
    Integer(i64),
    BigInteger(BigInt),
    Float(f64),
    String {
        content: StringContent,
        encoding: SourceEncoding,
    },
    /// Identifier, variable or label name; keyword text after `def`.
    Name(String),
    RegexOptions(RegexOptions),
    OpAssign(BinaryOp),
}

impl TokenValue {
    pub(crate) fn text(text: impl Into<String>, encoding: SourceEncoding) -> Self {
        TokenValue::String {
            content: StringContent::Text(text.into()),
            encoding,
        }
    }

    /// String content as text, if this is a textual string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::String { content, .. } => content.as_text(),
            TokenValue::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// A token.
#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<TokenValue>,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(kind: TokenKind, value: Option<TokenValue>, span: SourceSpan) -> Self {
        Token { kind, value, span }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }

    /// Name carried by identifier-like tokens.
    pub fn name(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::Name(name)) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}
