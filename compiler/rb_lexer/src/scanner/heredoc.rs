//! Heredocs.
//!
//! An opener (`<<EOS`, `<<-EOS`, `<<~'EOS'`, ...) only queues a request; the
//! rest of the line is scanned as usual. At the line end every queued body
//! is pushed as a `DeferredBlock` frame, first opener on top, and the
//! bodies are scanned in order. The last frame remembers the code state of
//! the interrupted line so scanning picks up exactly where it left off.

use rb_lexer_core::escape::decode_escape;

use super::{Lexeme, Lexer, Step};
use crate::lex_error::LexErrorKind;
use crate::nesting::{CodeState, HeredocFrame, HeredocIndent, HeredocRequest, NestingFrame};
use crate::{LexicalState, StringContent, TokenKind, TokenValue};

const TAB_WIDTH: u32 = 8;

/// Is `line` (without its terminator) the closing line of `request`?
fn is_label_line(line: &str, request: &HeredocRequest) -> bool {
    let line = if request.indent.allows_indented_label() {
        line.trim_start_matches([' ', '\t'])
    } else {
        line
    };
    line == request.label
}

/// Width of the leading whitespace of `line`, tabs to the next multiple of
/// 8. `None` for a blank line.
fn indent_width(line: &str) -> Option<u32> {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width = (width / TAB_WIDTH + 1) * TAB_WIDTH,
            '\r' | '\n' => return None,
            _ => return Some(width),
        }
    }
    None
}

impl Lexer<'_> {
    /// `<<` at the cursor. Registers a heredoc, or returns `None` (with the
    /// cursor untouched) when no label follows and `<<` is a shift.
    pub(super) fn heredoc_opener(&mut self) -> Option<Step> {
        let classifier = self.classifier();
        self.cursor.advance_n(2);
        let indent = if self.cursor.eat('-') {
            HeredocIndent::Dash
        } else if self.cursor.eat('~') {
            HeredocIndent::Squiggly
        } else {
            HeredocIndent::None
        };

        let (label, interpolate, shell) = match self.cursor.current() {
            quote @ ('\'' | '"' | '`') => {
                self.cursor.advance();
                let label_start = self.cursor.pos();
                loop {
                    if self.cursor.is_eof() || self.cursor.at_line_end() {
                        let label = self.cursor.slice_from(label_start);
                        self.report_here(LexErrorKind::UnterminatedHereDocIdentifier);
                        break (label, quote != '\'', quote == '`');
                    }
                    if self.cursor.current() == quote {
                        let label = self.cursor.slice_from(label_start);
                        self.cursor.advance();
                        break (label, quote != '\'', quote == '`');
                    }
                    self.cursor.advance();
                }
            }
            c if classifier.is_identifier_char(c) => {
                let label_start = self.cursor.pos();
                self.cursor.eat_while(|c| classifier.is_identifier_char(c));
                (self.cursor.slice_from(label_start), true, false)
            }
            _ => {
                self.cursor.reset_to(self.start);
                return None;
            }
        };

        let request = HeredocRequest {
            label: label.to_owned(),
            indent,
            interpolate,
            shell,
        };
        let queued = u32::try_from(self.state.heredocs.len()).unwrap_or(u32::MAX);
        if self.state.nesting.depth().saturating_add(queued) >= self.state.nesting.max_depth() {
            let limit = self.state.nesting.max_depth();
            self.report_here(LexErrorKind::NestingTooDeep { limit });
        } else {
            tracing::debug!(label = %request.label, ?indent, "heredoc queued");
            self.state.heredocs.push(request);
        }

        self.set_state(LexicalState::End);
        let kind = if self.state.config.trivia {
            TokenKind::VerbatimHeredocBegin
        } else if shell {
            TokenKind::ShellStringBegin
        } else {
            TokenKind::StringBegin
        };
        Some(self.token(kind))
    }

    /// Start the bodies queued on the line that just ended.
    pub(super) fn drain_heredocs(&mut self, newline: bool) {
        let requests = std::mem::take(&mut self.state.heredocs);
        let resume = self.state.nesting.in_code().then(|| CodeState {
            lex_state: self.state.lex_state,
            command_mode: self.state.command_mode,
            whitespace_seen: self.state.whitespace_seen,
            newline,
        });

        let last = requests.len().saturating_sub(1);
        for (index, request) in requests.into_iter().enumerate().rev() {
            let mut frame = HeredocFrame::new(request);
            if index == last {
                frame.resume = resume;
            }
            if !self.open_frame(NestingFrame::DeferredBlock(frame)) {
                if index == last {
                    // No body opened, so the line end is resolved right away.
                    if let Some(resume) = resume {
                        self.restore_code_state(resume);
                    }
                }
                break;
            }
        }
    }

    pub(super) fn scan_heredoc(&mut self) -> Step {
        let Some(NestingFrame::DeferredBlock(frame)) = self.state.nesting.top() else {
            return Step::Skip;
        };
        let request = frame.request.clone();
        let dedent = frame.dedent;

        if self.cursor.is_eof() {
            self.report_here(LexErrorKind::UnterminatedHereDoc {
                label: request.label.clone(),
            });
            let at = self.cursor.pos();
            return self.finish_heredoc(at, at);
        }

        let dedent = match (request.indent, dedent) {
            (HeredocIndent::Squiggly, None) => {
                let Some(width) = self.measure_dedent(&request) else {
                    return Step::Suspend;
                };
                if let Some(NestingFrame::DeferredBlock(top)) = self.state.nesting.top_mut() {
                    top.dedent = Some(width);
                }
                width
            }
            (_, dedent) => dedent.unwrap_or(0),
        };

        if self.at_line_start() {
            match self.at_label_line(&request) {
                None => return Step::Suspend,
                Some(true) => return self.heredoc_end(&request),
                Some(false) => {}
            }
        }

        if request.interpolate && self.cursor.current() == '#' {
            if self.at_embedded_variable() {
                self.cursor.advance();
                self.state.embedded_variable = true;
                self.set_state(LexicalState::Beg);
                return self.token(TokenKind::StringEmbeddedVariableBegin);
            }
            if self.cursor.peek() == '{' {
                self.cursor.advance_n(2);
                return self.open_interpolation();
            }
        }

        self.heredoc_content(&request, dedent)
    }

    /// Is the line at the cursor the closing label? `None` while the line
    /// is still incomplete.
    fn at_label_line(&self, request: &HeredocRequest) -> Option<bool> {
        let line = self.cursor.line_rest();
        if !self.is_final && line.len() == self.cursor.rest().len() {
            return None;
        }
        Some(is_label_line(line, request))
    }

    /// Smallest indentation over the body's non-blank lines, read ahead up
    /// to the closing label.
    fn measure_dedent(&self, request: &HeredocRequest) -> Option<u32> {
        let mut ahead = self.cursor;
        let mut width: Option<u32> = None;
        loop {
            let line = ahead.line_rest();
            let terminated = line.len() < ahead.rest().len();
            if !terminated && !self.is_final {
                return None;
            }
            if is_label_line(line, request) {
                break;
            }
            if let Some(indent) = indent_width(line) {
                width = Some(width.map_or(indent, |w| w.min(indent)));
            }
            ahead.eat_until_line_end();
            if !ahead.eat_line_end() {
                break;
            }
        }
        Some(width.unwrap_or(0))
    }

    /// Skip up to `dedent` columns of leading whitespace.
    fn skip_indent(&mut self, dedent: u32) {
        let mut column = 0;
        while column < dedent {
            let next = match self.cursor.current() {
                ' ' => column + 1,
                '\t' => (column / TAB_WIDTH + 1) * TAB_WIDTH,
                _ => break,
            };
            if next > dedent {
                break;
            }
            self.cursor.advance();
            column = next;
        }
    }

    /// Body text up to the closing label, an interpolation, or a line end
    /// that must start inner heredocs.
    fn heredoc_content(&mut self, request: &HeredocRequest, dedent: u32) -> Step {
        let mut out = Vec::new();
        let mut raw_high = false;
        let mut issues = Vec::new();
        let mut drain = false;

        loop {
            if self.at_line_start() {
                match self.at_label_line(request) {
                    None => return Step::Suspend,
                    Some(true) => break,
                    Some(false) => self.skip_indent(dedent),
                }
            }
            if self.cursor.is_eof() {
                if !self.is_final {
                    return Step::Suspend;
                }
                break;
            }

            let c = self.cursor.current();
            // A `\r` ending the input counts as a line end.
            let trailing_cr = self.is_final && self.cursor.rest() == "\r";
            if self.cursor.at_line_end() || trailing_cr {
                if !self.cursor.eat_line_end() {
                    self.cursor.advance();
                }
                out.push(b'\n');
                if !self.state.heredocs.is_empty() {
                    drain = true;
                    break;
                }
                continue;
            }
            if request.interpolate {
                if c == '#' && (self.cursor.peek() == '{' || self.at_embedded_variable()) {
                    break;
                }
                if c == '\\' {
                    let next = self.cursor.peek();
                    if next == '\n' || (next == '\r' && self.cursor.peek_nth(2) == '\n') {
                        // Line continuation.
                        self.cursor.advance();
                        self.cursor.eat_line_end();
                    } else {
                        raw_high |= decode_escape(&mut self.cursor, &mut out, &mut issues);
                    }
                    continue;
                }
            }
            self.cursor.advance();
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }

        if out.is_empty() && issues.is_empty() {
            return Step::Skip;
        }
        self.report_issues(&issues);
        let encoding = self.encoding();
        let content = if raw_high {
            StringContent::Bytes(out)
        } else {
            StringContent::from_bytes(out, encoding)
        };
        let step = self.token_with(TokenKind::StringContent, TokenValue::String { content, encoding });
        if drain {
            self.drain_heredocs(false);
        }
        step
    }

    /// The closing label line: the end token spans the label, the line
    /// terminator is consumed with it.
    fn heredoc_end(&mut self, request: &HeredocRequest) -> Step {
        if request.indent.allows_indented_label() {
            self.cursor.eat_while(|c| c == ' ' || c == '\t');
        }
        let label_start = self.cursor.pos();
        self.cursor.eat_until_line_end();
        let label_end = self.cursor.pos();
        self.cursor.eat_line_end();
        self.finish_heredoc(label_start, label_end)
    }

    fn restore_code_state(&mut self, resume: CodeState) {
        self.state.lex_state = resume.lex_state;
        self.state.command_mode = resume.command_mode;
        self.state.whitespace_seen = resume.whitespace_seen;
        self.state.pending_newline = resume.newline;
    }

    fn finish_heredoc(&mut self, start: u32, end: u32) -> Step {
        let frame = self.state.nesting.pop();
        match frame {
            Some(NestingFrame::DeferredBlock(HeredocFrame {
                resume: Some(resume), ..
            })) => self.restore_code_state(resume),
            _ => self.set_state(LexicalState::End),
        }
        let kind = if self.state.config.trivia {
            TokenKind::VerbatimHeredocEnd
        } else {
            TokenKind::StringEnd
        };
        Step::Raw(Lexeme {
            kind,
            value: None,
            start,
            end,
        })
    }
}
