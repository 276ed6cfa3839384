//! Token classification for editors: a coarse category for highlighting
//! and the triggers that drive brace matching and completion.

use super::TokenKind;

/// Coarse class of a token, for syntax highlighting.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenCategory {
    Keyword,
    Operator,
    /// `,` `;` `.` `::` and separators inside literals.
    Delimiter,
    /// Brackets, braces, parentheses and interpolation bounds.
    Grouping,
    StringLiteral,
    NumericLiteral,
    Identifier,
    Comment,
    LineComment,
    Whitespace,
    EndOfStream,
    Error,
}

bitflags::bitflags! {
    /// Editor actions a token can start.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenTriggers: u8 {
        /// Has a matching partner (`(`/`)`, `def`/`end`, ...).
        const MATCH_BRACES = 1;
        /// Member completion may follow (`.`, `::`).
        const MEMBER_SELECT = 1 << 1;
        const PARAMETER_START = 1 << 2;
        const PARAMETER_NEXT = 1 << 3;
        const PARAMETER_END = 1 << 4;
    }
}

impl TokenKind {
    #[expect(
        clippy::too_many_lines,
        reason = "exhaustive TokenKind → category dispatch"
    )]
    pub fn category(self) -> TokenCategory {
        match self {
            // === Keywords ===
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
            | TokenKind::EncodingKw => TokenCategory::Keyword,

            // === Names ===
            TokenKind::Identifier
            | TokenKind::FunctionIdentifier
            | TokenKind::ConstantIdentifier
            | TokenKind::Label
            | TokenKind::GlobalVariable
            | TokenKind::InstanceVariable
            | TokenKind::ClassVariable
            | TokenKind::MatchReference
            | TokenKind::SymbolBegin => TokenCategory::Identifier,

            // === Literals ===
            TokenKind::Integer | TokenKind::BigInteger | TokenKind::Float => {
                TokenCategory::NumericLiteral
            }
            TokenKind::Character
            | TokenKind::StringBegin
            | TokenKind::StringContent
            | TokenKind::StringEnd
            | TokenKind::ShellStringBegin
            | TokenKind::WordsBegin
            | TokenKind::VerbatimWordsBegin
            | TokenKind::RegexBegin
            | TokenKind::RegexEnd
            | TokenKind::VerbatimHeredocBegin
            | TokenKind::VerbatimHeredocEnd => TokenCategory::StringLiteral,

            // === Operators ===
            TokenKind::Assignment
            | TokenKind::OpAssignment
            | TokenKind::Equal
            | TokenKind::StrictEqual
            | TokenKind::NotEqual
            | TokenKind::Match
            | TokenKind::NotMatch
            | TokenKind::Cmp
            | TokenKind::LessOrEqual
            | TokenKind::GreaterOrEqual
            | TokenKind::Less
            | TokenKind::Greater
            | TokenKind::Lshft
            | TokenKind::Rshft
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Asterisk
            | TokenKind::Pow
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::Ampersand
            | TokenKind::BlockReference
            | TokenKind::Caret
            | TokenKind::Tilde
            | TokenKind::Bang
            | TokenKind::UnaryPlus
            | TokenKind::UnaryMinus
            | TokenKind::NumberNegation
            | TokenKind::And2
            | TokenKind::Or2
            | TokenKind::DoubleDot
            | TokenKind::TripleDot
            | TokenKind::Colon
            | TokenKind::QuestionMark
            | TokenKind::DoubleArrow
            | TokenKind::Lambda
            | TokenKind::Backtick
            | TokenKind::ItemReference
            | TokenKind::ItemAssign
            | TokenKind::UnaryPlusOp
            | TokenKind::UnaryMinusOp
            | TokenKind::UnaryTildeOp
            | TokenKind::UnaryBangOp => TokenCategory::Operator,

            // === Punctuation ===
            TokenKind::Dot
            | TokenKind::SeparatingDoubleColon
            | TokenKind::LeadingDoubleColon
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::WordSeparator
            | TokenKind::StringEmbeddedVariableBegin => TokenCategory::Delimiter,
            TokenKind::LeftParenthesis
            | TokenKind::LeftArgParenthesis
            | TokenKind::LeftExprParenthesis
            | TokenKind::RightParenthesis
            | TokenKind::LeftBracket
            | TokenKind::LeftIndexingBracket
            | TokenKind::RightBracket
            | TokenKind::LeftBrace
            | TokenKind::LeftBlockBrace
            | TokenKind::LeftBlockArgBrace
            | TokenKind::LeftLambdaBrace
            | TokenKind::RightBrace
            | TokenKind::Pipe
            | TokenKind::StringEmbeddedCodeBegin
            | TokenKind::StringEmbeddedCodeEnd => TokenCategory::Grouping,

            // === Layout and trivia ===
            TokenKind::NewLine | TokenKind::EndOfLine | TokenKind::Whitespace => {
                TokenCategory::Whitespace
            }
            TokenKind::SingleLineComment => TokenCategory::LineComment,
            // Data after `__END__` is not code.
            TokenKind::MultiLineComment | TokenKind::EndOfFileData => TokenCategory::Comment,
            TokenKind::EndOfFile => TokenCategory::EndOfStream,

            TokenKind::Backslash | TokenKind::Dollar | TokenKind::At | TokenKind::InvalidCharacter => {
                TokenCategory::Error
            }
        }
    }

    pub fn triggers(self) -> TokenTriggers {
        match self {
            TokenKind::Def
            | TokenKind::Class
            | TokenKind::Module
            | TokenKind::End
            | TokenKind::Begin
            | TokenKind::BeginUpper
            | TokenKind::EndUpper
            | TokenKind::Do
            | TokenKind::LoopDo
            | TokenKind::BlockDo
            | TokenKind::LambdaDo
            | TokenKind::LeftBracket
            | TokenKind::LeftIndexingBracket
            | TokenKind::RightBracket
            | TokenKind::LeftBrace
            | TokenKind::LeftBlockBrace
            | TokenKind::LeftBlockArgBrace
            | TokenKind::LeftLambdaBrace
            | TokenKind::RightBrace
            | TokenKind::Pipe
            | TokenKind::StringEmbeddedCodeBegin
            | TokenKind::StringEmbeddedCodeEnd
            | TokenKind::LeftExprParenthesis => TokenTriggers::MATCH_BRACES,
            TokenKind::LeftParenthesis | TokenKind::LeftArgParenthesis => {
                TokenTriggers::MATCH_BRACES | TokenTriggers::PARAMETER_START
            }
            TokenKind::RightParenthesis => TokenTriggers::MATCH_BRACES | TokenTriggers::PARAMETER_END,
            TokenKind::Comma => TokenTriggers::PARAMETER_NEXT,
            TokenKind::Dot | TokenKind::SeparatingDoubleColon | TokenKind::LeadingDoubleColon => {
                TokenTriggers::MEMBER_SELECT
            }
            _ => TokenTriggers::empty(),
        }
    }
}
