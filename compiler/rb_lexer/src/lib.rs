//! Context-sensitive scanner for a Ruby-family scripting language.
//!
//! The same characters lex differently depending on what came before: `/`
//! divides or starts a regex, `<<` shifts or opens a heredoc, `do` closes a
//! loop condition or starts a block. The [`Scanner`] tracks that context in
//! a [`ScanState`] (lexical state, nesting stack, pending heredocs, parser
//! bracketing) and produces one [`Token`] at a time.
//!
//! - [`lex`] scans a whole source into a `Vec<Token>`
//! - [`Scanner::next_token`] pulls tokens one at a time; the parser can
//!   steer the scanner through the feedback methods on [`Scanner`]
//! - [`Scanner::incremental`], [`Scanner::capture`] and [`Scanner::resume`]
//!   scan a source chunk by chunk with the same result as one pass
//!
//! Problems never stop a scan. They are reported to a
//! [`DiagnosticSink`](rb_diagnostic::DiagnosticSink) and the scanner
//! continues with placeholder values.

mod config;
mod keywords;
mod lex_error;
mod lexical_state;
pub mod nesting;
mod scan_state;
mod scanner;
mod token;

pub use config::{LexerConfig, DEFAULT_MAX_NESTING_DEPTH};
pub use lex_error::LexErrorKind;
pub use lexical_state::LexicalState;
pub use nesting::{HeredocIndent, HeredocRequest, NestingFrame, NestingStack, StringFlags};
pub use scan_state::{BitStack, ResumeError, ScanState, Snapshot};
pub use scanner::{Scanner, Tokens};
pub use token::{
    BinaryOp, RegexOptions, StringContent, Token, TokenCategory, TokenKind, TokenTriggers, TokenValue,
};

use rb_diagnostic::DiagnosticSink;

/// Scan `source` to the end. The last token is always `EndOfFile`.
pub fn lex<S: DiagnosticSink>(source: &str, config: &LexerConfig, sink: S) -> Vec<Token> {
    Scanner::new(source, config.clone(), sink).into_iter().collect()
}
