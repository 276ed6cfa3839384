//! `$global`, `@ivar` and `@@cvar` names and match references.

use rb_lexer_core::classify::is_decimal_digit;

use super::{Lexer, Step};
use crate::lex_error::LexErrorKind;
use crate::{LexicalState, TokenKind, TokenValue};

/// Single punctuation characters that name a special global (`$!`, `$;`).
fn is_global_punct(c: char) -> bool {
    matches!(
        c,
        '!' | '@' | ',' | ';' | '/' | '\\' | '*' | '$' | '?' | '=' | ':' | '"' | '<' | '>' | '.' | '~'
    )
}

impl<'a> Lexer<'a> {
    pub(super) fn global_variable(&mut self) -> Step {
        let classifier = self.classifier();
        self.cursor.advance();
        self.set_state(LexicalState::End);
        let name_start = self.cursor.pos();
        let c = self.cursor.current();

        match c {
            '&' | '`' | '\'' | '+' => {
                self.cursor.advance();
                self.named_token(TokenKind::MatchReference, self.cursor.slice_from(name_start))
            }
            '-' => {
                // `$-w`: exactly one name character after the dash.
                self.cursor.advance();
                if classifier.is_identifier_char(self.cursor.current()) {
                    self.cursor.advance();
                }
                self.named_token(TokenKind::GlobalVariable, self.cursor.slice_from(name_start))
            }
            c if is_global_punct(c) => {
                self.cursor.advance();
                self.named_token(TokenKind::GlobalVariable, self.cursor.slice_from(name_start))
            }
            '0' => {
                self.cursor.advance();
                self.cursor.eat_while(|c| classifier.is_identifier_char(c));
                let name: &'a str = self.cursor.slice_from(name_start);
                if name.len() > 1 {
                    self.report_here(LexErrorKind::InvalidGlobalVariableName {
                        name: name.to_owned(),
                    });
                }
                self.named_token(TokenKind::GlobalVariable, name)
            }
            '1'..='9' => {
                self.cursor.eat_while(is_decimal_digit);
                let digits: &'a str = self.cursor.slice_from(name_start);
                let number = digits.parse::<i32>().unwrap_or_else(|_| {
                    self.report_here(LexErrorKind::MatchGroupReferenceOverflow {
                        number: digits.to_owned(),
                    });
                    0
                });
                self.token_with(TokenKind::MatchReference, TokenValue::Integer(i64::from(number)))
            }
            c if classifier.is_identifier_start(c) => {
                self.cursor.eat_while(|c| classifier.is_identifier_char(c));
                self.named_token(TokenKind::GlobalVariable, self.cursor.slice_from(name_start))
            }
            _ => self.token(TokenKind::Dollar),
        }
    }

    pub(super) fn instance_variable(&mut self) -> Step {
        let classifier = self.classifier();
        self.cursor.advance();
        let class = self.cursor.eat('@');
        let c = self.cursor.current();

        if is_decimal_digit(c) {
            let error = if class {
                LexErrorKind::InvalidClassVariableName { digit: c }
            } else {
                LexErrorKind::InvalidInstanceVariableName { digit: c }
            };
            let end = self.cursor.pos() + 1;
            self.report(error, self.start, end);
            return self.token(TokenKind::At);
        }
        if !classifier.is_identifier_start(c) {
            return self.token(TokenKind::At);
        }

        self.cursor.eat_while(|c| classifier.is_identifier_char(c));
        self.set_state(LexicalState::End);
        let kind = if class {
            TokenKind::ClassVariable
        } else {
            TokenKind::InstanceVariable
        };
        self.named_token(kind, self.cursor.slice_from(self.start))
    }

    /// `#$name` or `#@name` at the cursor (on the `#`) inside content that
    /// interpolates.
    pub(super) fn at_embedded_variable(&self) -> bool {
        let classifier = self.classifier();
        match self.cursor.peek() {
            '$' => match self.cursor.peek_nth(2) {
                '-' => classifier.is_identifier_char(self.cursor.peek_nth(3)),
                c if is_global_punct(c) || matches!(c, '&' | '`' | '\'' | '+') => true,
                c => is_decimal_digit(c) || classifier.is_identifier_start(c),
            },
            '@' => match self.cursor.peek_nth(2) {
                '@' => classifier.is_identifier_start(self.cursor.peek_nth(3)),
                c => classifier.is_identifier_start(c),
            },
            _ => false,
        }
    }
}
