//! Resumable scanner state.
//!
//! [`ScanState`] is everything the scanner carries from one token to the
//! next. It owns all of its data, so a [`Snapshot`] of it can be stored,
//! cloned, compared and (with the `cache` feature) serialized, then handed
//! back to [`Scanner::resume`](crate::Scanner::resume) together with the
//! next chunk of text.

use rb_ir::{Position, SourceEncoding};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::nesting::{HeredocRequest, NestingStack};
use crate::{LexerConfig, LexicalState};

/// A stack of booleans packed into a `u64`; the top is the lowest bit.
///
/// The parser pushes onto these when it enters argument lists and loop
/// conditions so the scanner can tell what a `do` belongs to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct BitStack(u64);

impl BitStack {
    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.0 = (self.0 << 1) | u64::from(bit);
    }

    #[inline]
    pub fn pop(&mut self) {
        self.0 >>= 1;
    }

    /// Pop, keeping the top set if either of the two top bits was set.
    #[inline]
    pub fn or_pop(&mut self) {
        self.0 = (self.0 >> 1) | (self.0 & 1);
    }

    #[inline]
    pub fn top(self) -> bool {
        self.0 & 1 == 1
    }
}

/// Complete mutable state of a scan.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanState {
    pub(crate) lex_state: LexicalState,
    /// The next identifier is a command name.
    pub(crate) command_mode: bool,
    /// The previous token was whitespace.
    pub(crate) whitespace_seen: bool,
    pub(crate) nesting: NestingStack,
    /// Heredoc openers on the current line, in source order.
    pub(crate) heredocs: SmallVec<[HeredocRequest; 2]>,
    /// A line end interrupted by heredoc bodies still has to be classified.
    pub(crate) pending_newline: bool,
    /// The next token is the variable after `#@` / `#$` in a string.
    pub(crate) embedded_variable: bool,
    pub(crate) command_args: BitStack,
    pub(crate) loop_condition: BitStack,
    pub(crate) opening_count: u32,
    pub(crate) lambda_openings: u32,
    pub(crate) locals: FxHashSet<String>,
    /// Input ended for good (`__END__` or NUL); later chunks are ignored.
    pub(crate) closed: bool,
    pub(crate) config: LexerConfig,
}

impl ScanState {
    pub fn new(config: LexerConfig) -> Self {
        ScanState {
            lex_state: LexicalState::Beg,
            command_mode: true,
            whitespace_seen: false,
            nesting: NestingStack::new(config.max_nesting_depth),
            heredocs: SmallVec::new(),
            pending_newline: false,
            embedded_variable: false,
            command_args: BitStack::default(),
            loop_condition: BitStack::default(),
            opening_count: 0,
            lambda_openings: 0,
            locals: FxHashSet::default(),
            closed: false,
            config,
        }
    }

    #[inline]
    pub fn lexical_state(&self) -> LexicalState {
        self.lex_state
    }

    #[inline]
    pub fn command_mode(&self) -> bool {
        self.command_mode
    }

    #[inline]
    pub fn nesting(&self) -> &NestingStack {
        &self.nesting
    }

    /// No construct is open and no heredoc is waiting.
    pub fn is_top_level(&self) -> bool {
        self.nesting.is_top_level() && self.heredocs.is_empty() && !self.pending_newline
    }

    /// Heredoc openers whose bodies start at the next line end.
    pub fn pending_heredocs(&self) -> &[HeredocRequest] {
        &self.heredocs
    }

    #[inline]
    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    pub fn is_local(&self, name: &str) -> bool {
        self.locals.contains(name)
    }

    // ─── Parser feedback ───

    pub(crate) fn enter_paren(&mut self) {
        self.opening_count += 1;
        self.loop_condition.push(false);
        self.command_args.push(false);
    }

    pub(crate) fn leave_paren(&mut self) {
        self.opening_count = self.opening_count.saturating_sub(1);
        self.command_args.or_pop();
        self.loop_condition.pop();
    }

    #[inline]
    pub(crate) fn in_command_args(&self) -> bool {
        self.command_args.top()
    }

    #[inline]
    pub(crate) fn in_loop_condition(&self) -> bool {
        self.loop_condition.top()
    }

    /// A lambda body opens here (`-> { }` or `-> do end`).
    pub(crate) fn at_lambda_body(&self) -> bool {
        self.lambda_openings > 0 && self.lambda_openings == self.opening_count
    }

    pub(crate) fn open_lambda_body(&mut self) {
        self.lambda_openings = 0;
        self.opening_count = self.opening_count.saturating_sub(1);
    }
}

/// An owned capture of a scan, resumable with a new chunk of text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub(crate) state: ScanState,
    /// Text read but not yet consumed: an incomplete last line, or the
    /// lookahead a multi-line token still needs.
    pub(crate) carry: String,
    /// Source position of the first character of `carry`.
    pub(crate) position: Position,
}

impl Snapshot {
    #[inline]
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Unconsumed text that will be scanned ahead of the next chunk.
    #[inline]
    pub fn carry(&self) -> &str {
        &self.carry
    }
}

/// A snapshot cannot continue under the requested configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResumeError {
    #[error("snapshot was taken with trivia {snapshot}, resume requested trivia {requested}")]
    TriviaMismatch { snapshot: bool, requested: bool },
    #[error("snapshot was taken with encoding {snapshot}, resume requested {requested}")]
    EncodingMismatch {
        snapshot: SourceEncoding,
        requested: SourceEncoding,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_stack_push_pop() {
        let mut stack = BitStack::default();
        assert!(!stack.top());
        stack.push(true);
        stack.push(false);
        assert!(!stack.top());
        stack.pop();
        assert!(stack.top());
        stack.pop();
        assert!(!stack.top());
    }

    #[test]
    fn bit_stack_or_pop_keeps_set_bits() {
        let mut stack = BitStack::default();
        stack.push(true);
        stack.push(false);
        stack.or_pop();
        assert!(stack.top());

        let mut stack = BitStack::default();
        stack.push(false);
        stack.push(true);
        stack.or_pop();
        assert!(stack.top());
    }

    #[test]
    fn parens_save_and_restore_context() {
        let mut state = ScanState::new(LexerConfig::default());
        state.command_args.push(true);
        state.loop_condition.push(true);
        state.enter_paren();
        assert!(!state.in_command_args());
        assert!(!state.in_loop_condition());
        assert_eq!(state.opening_count, 1);
        state.leave_paren();
        assert!(state.in_command_args());
        assert!(state.in_loop_condition());
        assert_eq!(state.opening_count, 0);
    }

    #[test]
    fn fresh_state_is_top_level() {
        let state = ScanState::new(LexerConfig::default());
        assert!(state.is_top_level());
        assert!(state.command_mode());
        assert_eq!(state.lexical_state(), LexicalState::Beg);
        assert!(state.pending_heredocs().is_empty());
    }
}
