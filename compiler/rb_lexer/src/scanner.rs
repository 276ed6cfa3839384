//! The scanner.
//!
//! # Architecture
//!
//! ```text
//! Scanner (owns text, ScanState, sink)
//!   │  next_token()
//!   ▼
//! Lexer (one step: borrows the text and the state)
//!   │  step() ─► Token | Raw | Skip | Suspend
//!   ▼
//! driver: offsets → positions, severities resolved, reports flushed,
//!         command mode / whitespace bookkeeping
//! ```
//!
//! A step works on byte offsets into the current text and buffers its
//! diagnostics. Nothing reaches the sink until the step commits, so a step
//! that runs out of text in incremental mode (`Suspend`) leaves no trace:
//! the unconsumed text is carried into the next chunk and scanned again.
//!
//! Which sub-scanner runs is decided by the top of the nesting stack:
//! code, string content, heredoc body or embedded document.

mod code;
mod comments;
mod heredoc;
mod identifiers;
mod literals;
mod operators;
mod variables;

use std::borrow::Cow;

use rb_diagnostic::{Diagnostic, DiagnosticSink, Severity, SeverityPolicy};
use rb_ir::{Position, SourceEncoding, SourceSpan};
use rb_lexer_core::classify::Classifier;
use rb_lexer_core::{Cursor, LiteralIssue};

use crate::lex_error::LexErrorKind;
use crate::nesting::NestingFrame;
use crate::scan_state::{BitStack, ResumeError, ScanState, Snapshot};
use crate::{LexerConfig, LexicalState, Token, TokenKind, TokenValue};

// ─── Step protocol ───

/// A token in step-local offsets.
#[derive(Clone, Debug, PartialEq)]
struct Lexeme {
    kind: TokenKind,
    value: Option<TokenValue>,
    start: u32,
    end: u32,
}

/// A diagnostic in step-local offsets.
#[derive(Clone, Debug)]
struct Report {
    kind: LexErrorKind,
    severity: Severity,
    start: u32,
    end: u32,
}

/// Outcome of one scanner step.
#[derive(Debug)]
enum Step {
    /// A token; the driver updates command mode and whitespace tracking.
    Token(Lexeme),
    /// A token that restored code state itself (end of a heredoc that
    /// interrupted code); no bookkeeping.
    Raw(Lexeme),
    /// Input consumed or state changed without a token.
    Skip,
    /// Not enough text to decide; nothing is committed.
    Suspend,
}

/// One scanner step over the current text.
struct Lexer<'a> {
    cursor: Cursor<'a>,
    state: &'a mut ScanState,
    reports: Vec<Report>,
    is_final: bool,
    /// Offset that starts a line without a preceding `\n` (start of input,
    /// after a byte order mark, or a resumed chunk starting at column 1).
    line_origin: Option<u32>,
    /// Start of the token being scanned.
    start: u32,
    /// Start of the data section, when `__END__` was found.
    data_start: Option<u32>,
}

impl<'a> Lexer<'a> {
    fn step(&mut self) -> Step {
        self.start = self.cursor.pos();

        if !self.is_final && memchr::memchr(b'\n', self.cursor.rest().as_bytes()).is_none() {
            return Step::Suspend;
        }

        if self.state.embedded_variable {
            self.state.embedded_variable = false;
            return self.scan_code();
        }

        if self.state.pending_newline && self.state.nesting.in_code() {
            return self.resolve_pending_newline();
        }

        match self.state.nesting.top() {
            Some(NestingFrame::Quoted(_) | NestingFrame::Pattern(_)) => self.scan_string(),
            Some(NestingFrame::DeferredBlock(_)) => self.scan_heredoc(),
            Some(NestingFrame::Comment) => self.scan_embedded_doc(),
            Some(NestingFrame::Interpolation { .. }) | None => self.scan_code(),
        }
    }

    // ─── Tokens ───

    fn lexeme(&self, kind: TokenKind, value: Option<TokenValue>) -> Lexeme {
        Lexeme {
            kind,
            value,
            start: self.start,
            end: self.cursor.pos(),
        }
    }

    fn token(&self, kind: TokenKind) -> Step {
        Step::Token(self.lexeme(kind, None))
    }

    fn token_with(&self, kind: TokenKind, value: TokenValue) -> Step {
        Step::Token(self.lexeme(kind, Some(value)))
    }

    /// Token whose name is its own text.
    fn named_token(&self, kind: TokenKind, name: &str) -> Step {
        self.token_with(kind, TokenValue::Name(name.to_owned()))
    }

    // ─── Diagnostics ───

    fn report(&mut self, kind: LexErrorKind, start: u32, end: u32) {
        let severity = kind.default_severity();
        self.report_as(kind, severity, start, end);
    }

    fn report_as(&mut self, kind: LexErrorKind, severity: Severity, start: u32, end: u32) {
        self.reports.push(Report {
            kind,
            severity,
            start,
            end,
        });
    }

    /// Report at the current token.
    fn report_here(&mut self, kind: LexErrorKind) {
        self.report(kind, self.start, self.cursor.pos());
    }

    fn report_issues(&mut self, issues: &[LiteralIssue]) {
        for issue in issues {
            self.report(issue.kind.into(), issue.start, issue.end);
        }
    }

    // ─── State ───

    #[inline]
    fn lex_state(&self) -> LexicalState {
        self.state.lex_state
    }

    fn set_state(&mut self, next: LexicalState) {
        if self.state.lex_state != next {
            tracing::trace!(from = %self.state.lex_state, to = %next, "lexical state");
        }
        self.state.lex_state = next;
    }

    /// `Arg` or `CmdArg`.
    #[inline]
    fn in_args(&self) -> bool {
        self.state.lex_state.is_arg()
    }

    /// Argument position with a space before and none after:
    /// `foo -1`, `foo *args`.
    fn in_args_no_space(&self) -> bool {
        self.in_args() && self.state.whitespace_seen && !rb_lexer_core::classify::is_whitespace(self.cursor.current())
    }

    /// Leave `Fname`/`Dot` for `Arg`, anything else for `Beg`.
    fn set_operator_state(&mut self) {
        let next = if self.lex_state().is_method_name_position() {
            LexicalState::Arg
        } else {
            LexicalState::Beg
        };
        self.set_state(next);
    }

    #[inline]
    fn classifier(&self) -> Classifier {
        Classifier {
            extended_identifiers: self.state.config.extended_identifiers,
        }
    }

    #[inline]
    fn encoding(&self) -> SourceEncoding {
        self.state.config.encoding
    }

    fn at_line_start(&self) -> bool {
        let pos = self.cursor.pos();
        if Some(pos) == self.line_origin {
            return true;
        }
        pos > 0 && self.cursor.is_line_start()
    }

    /// Push a frame, reporting when the depth limit is reached.
    fn open_frame(&mut self, frame: NestingFrame) -> bool {
        if self.state.nesting.open(frame) {
            return true;
        }
        let limit = self.state.nesting.max_depth();
        self.report_here(LexErrorKind::NestingTooDeep { limit });
        false
    }
}

// ─── Driver ───

/// Context-sensitive scanner over one source unit (or one chunk of it).
///
/// ```
/// use rb_diagnostic::DiagnosticLog;
/// use rb_lexer::{LexerConfig, Scanner, TokenKind};
///
/// let mut log = DiagnosticLog::new();
/// let mut scanner = Scanner::new("x / 2", LexerConfig::default(), &mut log);
/// let kinds: Vec<_> = std::iter::from_fn(|| {
///     let token = scanner.next_token();
///     (!token.is_eof()).then_some(token.kind)
/// })
/// .collect();
/// assert_eq!(kinds, [TokenKind::Identifier, TokenKind::Slash, TokenKind::Integer]);
/// ```
pub struct Scanner<'src, S: DiagnosticSink> {
    text: Cow<'src, str>,
    /// Offset of the next unconsumed character.
    pos: u32,
    /// End of the visible text; shrinks when the input is closed early.
    limit: u32,
    state: ScanState,
    policy: SeverityPolicy,
    sink: S,
    /// Position of offset 0.
    base: Position,
    /// Last converted offset and its position.
    mark: (u32, Position),
    line_origin: Option<u32>,
    is_final: bool,
    data_offset: Option<u32>,
    /// The input start has not been checked for a byte order mark yet.
    bom_pending: bool,
}

impl<'src, S: DiagnosticSink> Scanner<'src, S> {
    /// Scan `source` as a complete source unit.
    pub fn new(source: &'src str, config: LexerConfig, sink: S) -> Self {
        Self::start(source, config, true, sink)
    }

    /// Scan `source` as the first chunk of a longer input. The scan stops
    /// with `EndOfFile` where the chunk runs out; [`capture`](Self::capture)
    /// then hands the state to the next chunk.
    pub fn incremental(source: &'src str, config: LexerConfig, sink: S) -> Self {
        Self::start(source, config, false, sink)
    }

    /// Continue a captured scan with the next chunk. The chunk is not
    /// final; call [`final_chunk`](Self::final_chunk) for the last one.
    pub fn resume(snapshot: Snapshot, chunk: &'src str, sink: S) -> Self {
        let Snapshot {
            state,
            carry,
            position,
        } = snapshot;
        let text = if carry.is_empty() {
            Cow::Borrowed(chunk)
        } else {
            let mut text = carry;
            text.push_str(chunk);
            Cow::Owned(text)
        };
        Self::from_parts(text, state, position, false, sink)
    }

    /// Like [`resume`](Self::resume), replacing the configuration.
    ///
    /// Trivia mode and encoding change how open constructs are scanned, so
    /// they must match the snapshot; severities and the other switches may
    /// change freely.
    pub fn resume_with_config(
        mut snapshot: Snapshot,
        chunk: &'src str,
        config: LexerConfig,
        sink: S,
    ) -> Result<Self, ResumeError> {
        let captured = &snapshot.state.config;
        if captured.trivia != config.trivia {
            return Err(ResumeError::TriviaMismatch {
                snapshot: captured.trivia,
                requested: config.trivia,
            });
        }
        if captured.encoding != config.encoding {
            return Err(ResumeError::EncodingMismatch {
                snapshot: captured.encoding,
                requested: config.encoding,
            });
        }
        snapshot.state.nesting.set_max_depth(config.max_nesting_depth);
        snapshot.state.config = config;
        Ok(Self::resume(snapshot, chunk, sink))
    }

    /// Treat the end of the current text as the end of input.
    #[must_use]
    pub fn final_chunk(mut self) -> Self {
        self.is_final = true;
        self
    }

    fn start(source: &'src str, config: LexerConfig, is_final: bool, sink: S) -> Self {
        Self::from_parts(
            Cow::Borrowed(source),
            ScanState::new(config),
            Position::START,
            is_final,
            sink,
        )
    }

    fn from_parts(
        text: Cow<'src, str>,
        state: ScanState,
        base: Position,
        is_final: bool,
        sink: S,
    ) -> Self {
        let limit = if state.closed {
            0
        } else {
            Cursor::new(&text).source_len()
        };
        let line_origin = base.is_line_start().then_some(0);
        let policy = state.config.severity_policy();
        let bom_pending = base.offset == 0 && !state.closed;
        Scanner {
            text,
            pos: 0,
            limit,
            state,
            policy,
            sink,
            base,
            mark: (0, base),
            line_origin,
            is_final,
            data_offset: None,
            bom_pending,
        }
    }

    /// Skip a UTF-8 byte order mark at the start of the input.
    ///
    /// Like any other step this waits for the first line to be complete, so
    /// empty or partial leading chunks leave the check to a later one.
    fn skip_byte_order_mark(&mut self) {
        let visible = &self.text[..self.limit as usize];
        if !self.is_final && memchr::memchr(b'\n', visible.as_bytes()).is_none() {
            return;
        }
        self.bom_pending = false;
        let Some(rest) = visible.strip_prefix('\u{FEFF}') else {
            return;
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "the byte order mark is 3 bytes"
        )]
        let width = (visible.len() - rest.len()) as u32;
        let span = SourceSpan::new(self.base, self.position_at(width));
        self.pos = width;
        self.line_origin = Some(width);
        let kind = LexErrorKind::ByteOrderMarkIgnored;
        self.emit(&kind, kind.default_severity(), span);
    }

    /// Capture the scan so it can continue with more text.
    pub fn capture(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            carry: self.text[self.pos as usize..self.limit as usize].to_owned(),
            position: self.locate(self.pos),
        }
    }

    /// Scan the next token.
    ///
    /// At the end of a final input this returns `EndOfFile` after closing
    /// every open construct; at the end of a non-final chunk it returns
    /// `EndOfFile` with the scan left open.
    pub fn next_token(&mut self) -> Token {
        if self.bom_pending {
            self.skip_byte_order_mark();
        }
        loop {
            let is_final = self.is_final || self.state.closed;
            let mut cursor = Cursor::new(&self.text[..self.limit as usize]);
            cursor.reset_to(self.pos);
            let mut lexer = Lexer {
                cursor,
                state: &mut self.state,
                reports: Vec::new(),
                is_final,
                line_origin: self.line_origin,
                start: self.pos,
                data_start: None,
            };
            let step = lexer.step();
            let Lexer {
                cursor,
                reports,
                data_start,
                ..
            } = lexer;
            let consumed = cursor.pos();

            let (lexeme, raw) = match step {
                Step::Suspend => {
                    let at = self.position_at(self.pos);
                    return Token::new(TokenKind::EndOfFile, None, SourceSpan::empty(at));
                }
                Step::Skip => {
                    self.commit(consumed, &reports, data_start);
                    continue;
                }
                Step::Token(lexeme) => (lexeme, false),
                Step::Raw(lexeme) => (lexeme, true),
            };

            let start = self.position_at(lexeme.start);
            self.commit(consumed, &reports, data_start);
            let end = self.position_at(lexeme.end);
            let token = Token::new(lexeme.kind, lexeme.value, SourceSpan::new(start, end));

            if !raw {
                self.track(token.kind);
            }
            tracing::trace!(
                kind = %token.kind,
                span = %token.span,
                state = %self.state.lex_state,
                "token"
            );
            if token.kind.is_trivia() && !self.state.config.trivia {
                continue;
            }
            return token;
        }
    }

    /// Flush a step's reports and move past its input.
    fn commit(&mut self, end: u32, reports: &[Report], data_start: Option<u32>) {
        for report in reports {
            let span = SourceSpan::new(
                self.position_at(report.start),
                self.position_at(report.end),
            );
            self.emit(&report.kind, report.severity, span);
        }
        if let Some(data_start) = data_start {
            self.data_offset = Some(self.base.offset.saturating_add(data_start));
        }
        self.pos = end;
        if self.state.closed {
            self.limit = self.limit.min(end);
        }
    }

    fn emit(&mut self, kind: &LexErrorKind, proposed: Severity, span: SourceSpan) {
        let code = kind.code();
        let severity = self.policy.resolve(code, proposed);
        self.sink
            .report_diagnostic(Diagnostic::new(span, code, severity, kind.to_string()));
    }

    /// Whitespace and command-mode bookkeeping after a token.
    fn track(&mut self, kind: TokenKind) {
        self.state.whitespace_seen = kind == TokenKind::Whitespace;
        if !kind.is_trivia() {
            self.state.command_mode = kind.enters_command_mode();
        }
    }

    fn locate(&self, offset: u32) -> Position {
        let (from, mut position) = if offset >= self.mark.0 {
            self.mark
        } else {
            (0, self.base)
        };
        for c in self.text[from as usize..offset as usize].chars() {
            position = position.advanced_by(c);
        }
        position
    }

    fn position_at(&mut self, offset: u32) -> Position {
        let position = self.locate(offset);
        self.mark = (offset, position);
        position
    }

    // ─── Parser feedback ───

    pub fn set_lexical_state(&mut self, state: LexicalState) {
        self.state.lex_state = state;
    }

    /// The next identifier starts a command.
    pub fn enter_command_context(&mut self) {
        self.state.command_mode = true;
    }

    /// Returns the previous stack for [`leave_command_arguments`](Self::leave_command_arguments).
    pub fn enter_command_arguments(&mut self) -> BitStack {
        let old = self.state.command_args;
        self.state.command_args.push(true);
        old
    }

    pub fn leave_command_arguments(&mut self, old: BitStack) {
        self.state.command_args = old;
    }

    pub fn enter_loop_condition(&mut self) {
        self.state.loop_condition.push(true);
    }

    pub fn leave_loop_condition(&mut self) {
        self.state.loop_condition.pop();
    }

    /// Returns the previous marker for [`leave_lambda_definition`](Self::leave_lambda_definition).
    pub fn enter_lambda_definition(&mut self) -> u32 {
        let old = self.state.lambda_openings;
        self.state.opening_count += 1;
        self.state.lambda_openings = self.state.opening_count;
        old
    }

    pub fn leave_lambda_definition(&mut self, old: u32) {
        self.state.lambda_openings = old;
    }

    pub fn enter_parenthesised_expression(&mut self) {
        self.state.enter_paren();
    }

    pub fn leave_parenthesised_expression(&mut self) {
        self.state.leave_paren();
    }

    /// Treat `name` as a local variable from now on.
    pub fn declare_local(&mut self, name: impl Into<String>) {
        self.state.locals.insert(name.into());
    }

    // ─── Accessors ───

    #[inline]
    pub fn lexical_state(&self) -> LexicalState {
        self.state.lex_state
    }

    #[inline]
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Absolute byte offset of the data section after `__END__`.
    #[inline]
    pub fn data_offset(&self) -> Option<u32> {
        self.data_offset
    }

    /// Position of the next unconsumed character.
    pub fn position(&self) -> Position {
        self.locate(self.pos)
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<'src, S: DiagnosticSink> IntoIterator for Scanner<'src, S> {
    type Item = Token;
    type IntoIter = Tokens<'src, S>;

    fn into_iter(self) -> Tokens<'src, S> {
        Tokens {
            scanner: self,
            done: false,
        }
    }
}

/// Iterator over a scanner's tokens, ending after `EndOfFile`.
pub struct Tokens<'src, S: DiagnosticSink> {
    scanner: Scanner<'src, S>,
    done: bool,
}

impl<'src, S: DiagnosticSink> Tokens<'src, S> {
    pub fn scanner(&self) -> &Scanner<'src, S> {
        &self.scanner
    }

    pub fn into_scanner(self) -> Scanner<'src, S> {
        self.scanner
    }
}

impl<S: DiagnosticSink> Iterator for Tokens<'_, S> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.scanner.next_token();
        self.done = token.is_eof();
        Some(token)
    }
}

#[cfg(test)]
mod tests;
