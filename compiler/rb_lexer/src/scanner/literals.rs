//! Numbers, character literals, `%` quotations and string content.
//!
//! String content is produced one token per line: a content token ends
//! after each line terminator, before an interpolation, and (in word lists)
//! before whitespace. The closing delimiter only ends the string when the
//! paired delimiters seen inside are balanced.

use rb_ir::SourceEncoding;
use rb_lexer_core::classify::{is_letter, is_whitespace};
use rb_lexer_core::escape::{copy_regex_escape, decode_escape, read_escape, read_unicode_char};
use rb_lexer_core::number::read_number;
use rb_lexer_core::NumericValue;

use super::{Lexer, Step};
use crate::lex_error::LexErrorKind;
use crate::nesting::{NestingFrame, StringFlags, StringFrame};
use crate::{LexicalState, RegexOptions, StringContent, TokenKind, TokenValue};

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

/// Decoded content under `encoding`. Raw bytes outside ASCII always stay
/// bytes, and make an ASCII source binary.
fn content_value(bytes: Vec<u8>, raw_high: bool, encoding: SourceEncoding) -> TokenValue {
    if !raw_high {
        return TokenValue::String {
            content: StringContent::from_bytes(bytes, encoding),
            encoding,
        };
    }
    let encoding = if encoding == SourceEncoding::Ascii {
        SourceEncoding::Binary
    } else {
        encoding
    };
    TokenValue::String {
        content: StringContent::Bytes(bytes),
        encoding,
    }
}

/// Escape letter suggested for a whitespace character after `?`.
fn whitespace_escape(c: char) -> char {
    match c {
        '\n' => 'n',
        '\t' => 't',
        '\x0B' => 'v',
        '\r' => 'r',
        '\x0C' => 'f',
        _ => 's',
    }
}

impl Lexer<'_> {
    // ─── Numbers ───

    pub(super) fn number(&mut self) -> Step {
        let mut issues = Vec::new();
        let value = read_number(&mut self.cursor, &mut issues);
        self.report_issues(&issues);
        self.set_state(LexicalState::End);
        match value {
            NumericValue::Integer(n) => self.token_with(TokenKind::Integer, TokenValue::Integer(n)),
            NumericValue::Big(n) => self.token_with(TokenKind::BigInteger, TokenValue::BigInteger(n)),
            NumericValue::Float(f) => self.token_with(TokenKind::Float, TokenValue::Float(f)),
        }
    }

    // ─── Character literals ───

    pub(super) fn question_mark(&mut self) -> Step {
        self.cursor.advance();

        if self.lex_state().is_end() {
            self.set_state(LexicalState::Value);
            return self.token(TokenKind::QuestionMark);
        }
        if self.cursor.is_eof() {
            self.report_here(LexErrorKind::IncompleteCharacter);
            self.set_state(LexicalState::Value);
            return self.token(TokenKind::QuestionMark);
        }

        let c = self.cursor.current();
        if is_whitespace(c) {
            if !self.in_args() {
                let escape = if self.cursor.starts_with("\r\n") {
                    'n'
                } else {
                    whitespace_escape(c)
                };
                let end = self.cursor.pos() + 1;
                self.report(LexErrorKind::InvalidCharacterSyntax { escape }, self.start, end);
            }
            self.set_state(LexicalState::Value);
            return self.token(TokenKind::QuestionMark);
        }
        let classifier = self.classifier();
        if (c.is_alphanumeric() || c == '_') && classifier.is_identifier_char(self.cursor.peek()) {
            // `cond ?abc : d`
            self.set_state(LexicalState::Beg);
            return self.token(TokenKind::QuestionMark);
        }

        let mut issues = Vec::new();
        let mut bytes = Vec::new();
        let raw_high = if self.cursor.starts_with("\\u") {
            push_char(&mut bytes, read_unicode_char(&mut self.cursor, &mut issues));
            false
        } else if c == '\\' {
            read_escape(&mut self.cursor, &mut issues).write_to(&mut bytes)
        } else {
            push_char(&mut bytes, self.cursor.advance());
            false
        };
        self.report_issues(&issues);
        self.set_state(LexicalState::End);
        let value = content_value(bytes, raw_high, self.encoding());
        self.token_with(TokenKind::Character, value)
    }

    // ─── % quotations ───

    /// Read one character, CRLF as `\n`.
    fn next_normalized(&mut self) -> char {
        if self.cursor.eat_str("\r\n") {
            return '\n';
        }
        self.cursor.advance()
    }

    /// `%Q(..)`, `%w[..]`, `%r{..}`, `%(..)`, ... with the cursor after `%`.
    pub(super) fn quotation(&mut self) -> Step {
        if self.cursor.is_eof() {
            self.report_here(LexErrorKind::UnterminatedString);
            return self.token(TokenKind::EndOfFile);
        }

        let after_percent = self.cursor.pos();
        let c = self.next_normalized();
        let (letter, term) = if c.is_alphanumeric() {
            if self.cursor.is_eof() {
                self.report_here(LexErrorKind::UnterminatedString);
                return self.token(TokenKind::EndOfFile);
            }
            let before_term = self.cursor.pos();
            let term = self.next_normalized();
            if term.is_alphanumeric() {
                self.cursor.reset_to(before_term);
                return self.unknown_quotation(after_percent);
            }
            (c, term)
        } else {
            ('Q', c)
        };

        let (flags, kind) = match letter {
            'Q' => (StringFlags::EXPANDS, TokenKind::StringBegin),
            'q' => (StringFlags::empty(), TokenKind::StringBegin),
            'W' => (StringFlags::WORDS | StringFlags::EXPANDS, TokenKind::WordsBegin),
            'w' => (StringFlags::WORDS, TokenKind::VerbatimWordsBegin),
            'x' => (StringFlags::EXPANDS | StringFlags::SHELL, TokenKind::ShellStringBegin),
            'r' => (StringFlags::REGEX | StringFlags::EXPANDS, TokenKind::RegexBegin),
            's' => (StringFlags::SYMBOL, TokenKind::SymbolBegin),
            _ => return self.unknown_quotation(after_percent),
        };

        if flags.contains(StringFlags::WORDS) {
            self.cursor.eat_while(is_whitespace);
            if self.cursor.is_eof() && !self.is_final {
                return Step::Suspend;
            }
        }
        self.open_quoted(StringFrame::delimited_by(flags, term), kind)
    }

    fn unknown_quotation(&mut self, after_percent: u32) -> Step {
        let end = self.cursor.pos();
        self.report(LexErrorKind::UnknownQuotedStringType, self.start, end);
        self.cursor.reset_to(after_percent);
        self.set_state(LexicalState::Beg);
        self.token(TokenKind::Percent)
    }

    // ─── String content ───

    pub(super) fn scan_string(&mut self) -> Step {
        let (frame, pattern) = match self.state.nesting.top() {
            Some(NestingFrame::Quoted(frame)) => (frame.clone(), false),
            Some(NestingFrame::Pattern(frame)) => (frame.clone(), true),
            _ => return Step::Skip,
        };
        let words = frame.flags.contains(StringFlags::WORDS);

        let mut separated = false;
        if words {
            separated = self.cursor.eat_while(is_whitespace) > 0;
            if separated && self.cursor.is_eof() && !self.is_final {
                return Step::Suspend;
            }
        }

        if self.cursor.is_eof() {
            self.report_here(LexErrorKind::UnterminatedString);
            let kind = if pattern {
                TokenKind::RegexEnd
            } else {
                TokenKind::StringEnd
            };
            return self.finish_string(kind, None);
        }

        let c = self.cursor.current();
        if c == frame.close_delim && frame.paren_depth == 0 {
            self.cursor.advance();
            if pattern {
                let options = self.regex_options();
                return self.finish_string(TokenKind::RegexEnd, Some(TokenValue::RegexOptions(options)));
            }
            return self.finish_string(TokenKind::StringEnd, None);
        }
        if separated {
            return self.token(TokenKind::WordSeparator);
        }

        if frame.interpolation_allowed() && c == '#' {
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

        self.string_content(&frame, pattern)
    }

    /// `#{` with the cursor after the brace.
    pub(super) fn open_interpolation(&mut self) -> Step {
        if !self.open_frame(NestingFrame::Interpolation { brace_depth: 0 }) {
            // Too deep: the `#{` is plain content.
            return self.token_with(TokenKind::StringContent, TokenValue::text("#{", self.encoding()));
        }
        self.state.enter_paren();
        self.set_state(LexicalState::Beg);
        self.token(TokenKind::StringEmbeddedCodeBegin)
    }

    fn finish_string(&mut self, kind: TokenKind, value: Option<TokenValue>) -> Step {
        self.state.nesting.pop();
        self.set_state(LexicalState::End);
        Step::Token(self.lexeme(kind, value))
    }

    /// Option letters after a regex. The encoding options exclude each
    /// other; the last one wins.
    fn regex_options(&mut self) -> RegexOptions {
        let mut options = RegexOptions::empty();
        while is_letter(self.cursor.current()) {
            let start = self.cursor.pos();
            let c = self.cursor.advance();
            match RegexOptions::from_letter(c) {
                Some(option) if option.intersects(RegexOptions::ENCODING_MASK) => {
                    options.remove(RegexOptions::ENCODING_MASK);
                    options.insert(option);
                }
                Some(option) => options.insert(option),
                None => {
                    let end = self.cursor.pos();
                    self.report(LexErrorKind::UnknownRegexOption { option: c }, start, end);
                }
            }
        }
        options
    }

    fn string_content(&mut self, frame: &StringFrame, pattern: bool) -> Step {
        let expands = frame.interpolation_allowed();
        let words = frame.flags.contains(StringFlags::WORDS);
        let mut depth = frame.paren_depth;
        let mut out = Vec::new();
        let mut raw_high = false;
        let mut issues = Vec::new();
        let mut line_ended = false;

        while !self.cursor.is_eof() {
            let c = self.cursor.current();
            if words && is_whitespace(c) {
                break;
            }
            if c == '\n' || self.cursor.starts_with("\r\n") {
                self.cursor.eat_line_end();
                out.push(b'\n');
                line_ended = true;
                break;
            }
            if Some(c) == frame.open_delim {
                depth += 1;
            } else if c == frame.close_delim {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            } else if expands && c == '#' && (self.cursor.peek() == '{' || self.at_embedded_variable()) {
                break;
            }

            if c == '\\' {
                let escape_start = self.cursor.pos();
                raw_high |= self.string_escape(frame, pattern, &mut out, &mut issues);
                if self.cursor.slice_from(escape_start).contains('\n') {
                    line_ended = true;
                    break;
                }
                continue;
            }
            self.cursor.advance();
            push_char(&mut out, c);
        }

        if let Some(NestingFrame::Quoted(top) | NestingFrame::Pattern(top)) = self.state.nesting.top_mut() {
            top.paren_depth = depth;
        }
        self.report_issues(&issues);
        let value = content_value(out, raw_high, self.encoding());
        let step = self.token_with(TokenKind::StringContent, value);
        if line_ended && !self.state.heredocs.is_empty() {
            self.drain_heredocs(false);
        }
        step
    }

    /// One backslash sequence in string content. Returns true if a raw
    /// byte outside ASCII was written.
    fn string_escape(
        &mut self,
        frame: &StringFrame,
        pattern: bool,
        out: &mut Vec<u8>,
        issues: &mut Vec<rb_lexer_core::LiteralIssue>,
    ) -> bool {
        let expands = frame.interpolation_allowed();
        let words = frame.flags.contains(StringFlags::WORDS);
        let next = self.cursor.peek();

        if next == '\n' || (next == '\r' && self.cursor.peek_nth(2) == '\n') {
            self.cursor.advance();
            self.cursor.eat_line_end();
            if words {
                out.push(b'\n');
            } else if !expands {
                out.extend_from_slice(b"\\\n");
            }
            return false;
        }
        if next == '\\' {
            self.cursor.advance_n(2);
            out.extend_from_slice(if pattern { b"\\\\" } else { b"\\" });
            return false;
        }
        if pattern {
            copy_regex_escape(&mut self.cursor, out, issues);
            return false;
        }
        if expands {
            return decode_escape(&mut self.cursor, out, issues);
        }

        self.cursor.advance();
        if self.cursor.is_eof() {
            out.push(b'\\');
            return false;
        }
        let c = self.cursor.advance();
        let escapes_delimiter = c == frame.close_delim || Some(c) == frame.open_delim;
        if !escapes_delimiter && !(words && is_whitespace(c)) {
            out.push(b'\\');
        }
        push_char(out, c);
        false
    }
}
