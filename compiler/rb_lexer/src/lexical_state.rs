//! Lexical state.
//!
//! The state records what kind of token the parser expects next, which is
//! what resolves ambiguous characters: after a value (`x /`) a slash
//! divides, at the start of an expression (`(/`) it opens a regex.

use std::fmt;

/// Where in an expression the scanner is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LexicalState {
    /// Start of an expression.
    #[default]
    Beg,
    /// After a complete value.
    End,
    /// After a method name that may take arguments.
    Arg,
    /// After a command name (a method call without parentheses).
    CmdArg,
    /// After a closing `]` or `}`.
    EndArg,
    /// After `return`, `break`, `next`, `rescue`.
    Mid,
    /// Expecting a method name (after `def`, `alias`, `undef`, `:`).
    Fname,
    /// After a method name in a definition, or a closing `)`.
    EndFn,
    /// After `.` or `::`.
    Dot,
    /// After `class`.
    Class,
    /// Expecting a value (after `?`).
    Value,
}

impl LexicalState {
    /// States that start an expression: `Beg`, `Mid`, `Class`, `Value`.
    #[inline]
    pub fn is_begin(self) -> bool {
        matches!(
            self,
            LexicalState::Beg | LexicalState::Mid | LexicalState::Class | LexicalState::Value
        )
    }

    /// States after a complete value: `End`, `EndArg`, `EndFn`.
    #[inline]
    pub fn is_end(self) -> bool {
        matches!(
            self,
            LexicalState::End | LexicalState::EndArg | LexicalState::EndFn
        )
    }

    /// States after a method name that may take arguments.
    #[inline]
    pub fn is_arg(self) -> bool {
        matches!(self, LexicalState::Arg | LexicalState::CmdArg)
    }

    /// `Fname` or `Dot`: the next token names a method.
    #[inline]
    pub(crate) fn is_method_name_position(self) -> bool {
        matches!(self, LexicalState::Fname | LexicalState::Dot)
    }
}

impl fmt::Display for LexicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LexicalState::Beg => "EXPR_BEG",
            LexicalState::End => "EXPR_END",
            LexicalState::Arg => "EXPR_ARG",
            LexicalState::CmdArg => "EXPR_CMDARG",
            LexicalState::EndArg => "EXPR_ENDARG",
            LexicalState::Mid => "EXPR_MID",
            LexicalState::Fname => "EXPR_FNAME",
            LexicalState::EndFn => "EXPR_ENDFN",
            LexicalState::Dot => "EXPR_DOT",
            LexicalState::Class => "EXPR_CLASS",
            LexicalState::Value => "EXPR_VALUE",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_partition_the_states() {
        use LexicalState::{Arg, Beg, Class, CmdArg, Dot, End, EndArg, EndFn, Fname, Mid, Value};
        for state in [Beg, End, Arg, CmdArg, EndArg, Mid, Fname, EndFn, Dot, Class, Value] {
            let groups = [state.is_begin(), state.is_end(), state.is_arg()];
            assert!(groups.iter().filter(|&&g| g).count() <= 1, "{state}");
        }
        assert!(Value.is_begin());
        assert!(EndFn.is_end());
        assert!(CmdArg.is_arg());
        assert!(!Fname.is_begin() && !Fname.is_end() && !Fname.is_arg());
        assert_eq!(LexicalState::default(), Beg);
    }
}
