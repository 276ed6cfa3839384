//! Reserved words.
//!
//! Each keyword carries the lexical state the scanner moves to after it and,
//! for `if`, `unless`, `while`, `until` and `rescue`, the token used when the
//! word modifies a preceding statement (`x if y`).
//!
//! The lookup uses the word's length as a first-pass filter (keywords range
//! from 2 to 12 chars), then matches against the keywords of that length.
//! `defined?` is looked up with its `?`, which the identifier reader has
//! already attached.

use crate::{LexicalState, TokenKind};

/// A reserved word.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct Keyword {
    pub kind: TokenKind,
    /// Token used outside expression-start states.
    pub modifier: Option<TokenKind>,
    /// State after the keyword.
    pub state: LexicalState,
}

const fn kw(kind: TokenKind, state: LexicalState) -> Keyword {
    Keyword {
        kind,
        modifier: None,
        state,
    }
}

const fn modifier(kind: TokenKind, modifier: TokenKind, state: LexicalState) -> Keyword {
    Keyword {
        kind,
        modifier: Some(modifier),
        state,
    }
}

/// Look up a reserved word.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<Keyword> {
    use LexicalState::{Arg, Beg, Class, End, Fname, Mid};

    let bytes = text.as_bytes();
    let len = bytes.len();

    // Guard: all keywords are 2-12 chars and start with a letter or `_`
    if !(2..=12).contains(&len) {
        return None;
    }
    let first = bytes[0];
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }

    let keyword = match len {
        2 => match text {
            "do" => kw(TokenKind::Do, Beg),
            "if" => modifier(TokenKind::If, TokenKind::IfMod, Beg),
            "in" => kw(TokenKind::In, Beg),
            "or" => kw(TokenKind::Or, Beg),
            _ => return None,
        },
        3 => match text {
            "and" => kw(TokenKind::And, Beg),
            "def" => kw(TokenKind::Def, Fname),
            "end" => kw(TokenKind::End, End),
            "END" => kw(TokenKind::EndUpper, End),
            "for" => kw(TokenKind::For, Beg),
            "nil" => kw(TokenKind::Nil, End),
            "not" => kw(TokenKind::Not, Arg),
            _ => return None,
        },
        4 => match text {
            "case" => kw(TokenKind::Case, Beg),
            "else" => kw(TokenKind::Else, Beg),
            "next" => kw(TokenKind::Next, Mid),
            "redo" => kw(TokenKind::Redo, End),
            "self" => kw(TokenKind::SelfKw, End),
            "then" => kw(TokenKind::Then, Beg),
            "true" => kw(TokenKind::True, End),
            "when" => kw(TokenKind::When, Beg),
            _ => return None,
        },
        5 => match text {
            "alias" => kw(TokenKind::Alias, Fname),
            "begin" => kw(TokenKind::Begin, Beg),
            "BEGIN" => kw(TokenKind::BeginUpper, End),
            "break" => kw(TokenKind::Break, Mid),
            "class" => kw(TokenKind::Class, Class),
            "elsif" => kw(TokenKind::Elsif, Beg),
            "false" => kw(TokenKind::False, End),
            "retry" => kw(TokenKind::Retry, End),
            "super" => kw(TokenKind::Super, Arg),
            "undef" => kw(TokenKind::Undef, Fname),
            "until" => modifier(TokenKind::Until, TokenKind::UntilMod, Beg),
            "while" => modifier(TokenKind::While, TokenKind::WhileMod, Beg),
            "yield" => kw(TokenKind::Yield, Arg),
            _ => return None,
        },
        6 => match text {
            "ensure" => kw(TokenKind::Ensure, Beg),
            "module" => kw(TokenKind::Module, Beg),
            "rescue" => modifier(TokenKind::Rescue, TokenKind::RescueMod, Mid),
            "return" => kw(TokenKind::Return, Mid),
            "unless" => modifier(TokenKind::Unless, TokenKind::UnlessMod, Beg),
            _ => return None,
        },
        8 => match text {
            "defined?" => kw(TokenKind::Defined, Arg),
            "__FILE__" => kw(TokenKind::File, End),
            "__LINE__" => kw(TokenKind::Line, End),
            _ => return None,
        },
        12 => match text {
            "__ENCODING__" => kw(TokenKind::EncodingKw, End),
            _ => return None,
        },
        _ => return None,
    };
    Some(keyword)
}
