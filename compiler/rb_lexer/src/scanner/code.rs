//! Code dispatch: layout, line ends and the first-character switch.

use rb_lexer_core::classify::is_whitespace;

use super::{Lexer, Step};
use crate::lex_error::LexErrorKind;
use crate::nesting::{NestingFrame, StringFlags, StringFrame};
use crate::{LexicalState, TokenKind};

impl Lexer<'_> {
    pub(super) fn scan_code(&mut self) -> Step {
        if self.cursor.is_eof() {
            return self.end_of_input();
        }

        match self.cursor.current() {
            '\0' => {
                // NUL ends the input like end of file.
                self.state.closed = true;
                Step::Skip
            }
            ' ' | '\t' | '\x0C' => self.whitespace(),
            '\r' if self.cursor.peek() != '\n' => self.whitespace(),
            '\n' | '\r' => self.line_end(),
            '\\' => self.backslash(),
            '#' => {
                self.cursor.eat_until_line_end();
                self.token(TokenKind::SingleLineComment)
            }
            '=' if self.at_line_start() && self.at_embedded_doc_begin() => self.embedded_doc_begin(),
            '_' if self.at_line_start() && self.at_end_marker() => self.end_marker(),
            ';' => self.punctuation(TokenKind::Semicolon),
            ',' => self.punctuation(TokenKind::Comma),
            '(' => self.left_paren(),
            ')' => self.right_paren(),
            '[' => self.left_bracket(),
            ']' => self.right_bracket(),
            '{' => self.left_brace(),
            '}' => self.right_brace(),
            '=' => self.equals(),
            '<' => self.less(),
            '>' => self.greater(),
            '!' => self.bang(),
            '+' => self.plus(),
            '-' => self.minus(),
            '*' => self.star(),
            '/' => self.slash(),
            '%' => self.percent(),
            '&' => self.ampersand(),
            '|' => self.pipe(),
            '^' => self.caret(),
            '~' => self.tilde(),
            '.' => self.dot(),
            ':' => self.colon(),
            '?' => self.question_mark(),
            '"' => {
                self.cursor.advance();
                self.open_quoted(StringFrame::new(StringFlags::EXPANDS, '"'), TokenKind::StringBegin)
            }
            '\'' => {
                self.cursor.advance();
                self.open_quoted(StringFrame::new(StringFlags::empty(), '\''), TokenKind::StringBegin)
            }
            '`' => self.backtick(),
            '$' => self.global_variable(),
            '@' => self.instance_variable(),
            '0'..='9' => self.number(),
            _ => self.identifier_or_invalid(),
        }
    }

    fn punctuation(&mut self, kind: TokenKind) -> Step {
        self.cursor.advance();
        self.set_state(LexicalState::Beg);
        self.token(kind)
    }

    /// Spaces, tabs, form feeds and lone carriage returns.
    fn whitespace(&mut self) -> Step {
        loop {
            match self.cursor.current() {
                ' ' | '\t' | '\x0C' => {}
                '\r' if !self.cursor.is_eof() && self.cursor.peek() != '\n' => {}
                _ => break,
            }
            self.cursor.advance();
        }
        self.token(TokenKind::Whitespace)
    }

    /// Line ends that never end a statement.
    fn newline_insignificant(&self) -> bool {
        matches!(
            self.lex_state(),
            LexicalState::Beg
                | LexicalState::Fname
                | LexicalState::Dot
                | LexicalState::Class
                | LexicalState::Value
        )
    }

    fn line_end(&mut self) -> Step {
        self.cursor.eat_line_end();

        if !self.state.heredocs.is_empty() {
            if self.newline_insignificant() {
                self.drain_heredocs(false);
                return self.token(TokenKind::EndOfLine);
            }
            // Classified once the bodies are done.
            self.drain_heredocs(true);
            return Step::Skip;
        }

        if self.newline_insignificant() {
            return self.token(TokenKind::EndOfLine);
        }
        match self.continues_method_chain() {
            None => Step::Suspend,
            Some(true) => self.token(TokenKind::EndOfLine),
            Some(false) => {
                self.set_state(LexicalState::Beg);
                self.token(TokenKind::NewLine)
            }
        }
    }

    /// Does the next non-blank text start with `.` (and not `..`)?
    /// `None` when the chunk ends before that is known.
    fn continues_method_chain(&self) -> Option<bool> {
        let mut ahead = self.cursor;
        ahead.eat_while(is_whitespace);
        if !self.is_final && ahead.rest().len() < 2 {
            return None;
        }
        Some(ahead.current() == '.' && ahead.peek() != '.')
    }

    /// A line end that started heredoc bodies, seen again once they are
    /// done. The token has an empty span at the resume point.
    pub(super) fn resolve_pending_newline(&mut self) -> Step {
        let chained = if self.state.config.trivia {
            Some(false)
        } else {
            self.continues_method_chain()
        };
        let Some(chained) = chained else {
            return Step::Suspend;
        };
        self.state.pending_newline = false;
        if chained {
            return self.token(TokenKind::EndOfLine);
        }
        self.set_state(LexicalState::Beg);
        self.token(TokenKind::NewLine)
    }

    fn backslash(&mut self) -> Step {
        self.cursor.advance();
        if self.cursor.eat_line_end() {
            if !self.state.heredocs.is_empty() {
                self.drain_heredocs(false);
            }
            return self.token(TokenKind::Whitespace);
        }
        self.token(TokenKind::Backslash)
    }

    /// End of a final input with nothing but code open.
    fn end_of_input(&mut self) -> Step {
        if !self.state.heredocs.is_empty() {
            self.drain_heredocs(false);
            return Step::Skip;
        }
        if let Some(NestingFrame::Interpolation { .. }) = self.state.nesting.top() {
            // The enclosing string reports itself unterminated.
            self.state.nesting.pop();
            self.state.leave_paren();
            self.set_state(LexicalState::End);
            return self.token(TokenKind::StringEmbeddedCodeEnd);
        }
        self.token(TokenKind::EndOfFile)
    }

    pub(super) fn identifier_or_invalid(&mut self) -> Step {
        let c = self.cursor.current();
        if self.classifier().is_identifier_start(c) {
            return self.identifier();
        }
        self.cursor.advance();
        self.report_here(LexErrorKind::InvalidCharacterInExpression { found: c });
        self.token(TokenKind::InvalidCharacter)
    }
}
