//! Identifiers, labels and keywords.

use rb_lexer_core::classify::is_upper_letter;

use super::{Lexer, Step};
use crate::keywords::{self, Keyword};
use crate::{LexicalState, TokenKind, TokenValue};

impl<'a> Lexer<'a> {
    pub(super) fn identifier(&mut self) -> Step {
        let classifier = self.classifier();
        let first = self.cursor.advance();
        self.cursor.eat_while(|c| classifier.is_identifier_char(c));

        let kind = if self.at_name_suffix() {
            self.cursor.advance();
            TokenKind::FunctionIdentifier
        } else if self.lex_state() == LexicalState::Fname && self.at_setter_suffix() {
            self.cursor.advance();
            TokenKind::Identifier
        } else if is_upper_letter(first) {
            TokenKind::ConstantIdentifier
        } else {
            TokenKind::Identifier
        };

        let name: &'a str = self.cursor.slice_from(self.start);
        let old = self.lex_state();

        if self.label_allowed() && self.cursor.current() == ':' && self.cursor.peek() != ':' {
            self.cursor.advance();
            self.set_state(LexicalState::Beg);
            return self.named_token(TokenKind::Label, name);
        }

        if old != LexicalState::Dot {
            if let Some(keyword) = keywords::lookup(name) {
                return self.keyword(keyword, name, old);
            }
        }

        let next = if old.is_begin() || old.is_arg() || old == LexicalState::Dot {
            if old != LexicalState::Dot && self.state.is_local(name) {
                LexicalState::End
            } else if self.state.command_mode {
                LexicalState::CmdArg
            } else {
                LexicalState::Arg
            }
        } else if old == LexicalState::Fname {
            LexicalState::EndFn
        } else {
            LexicalState::End
        };
        self.set_state(next);
        self.named_token(kind, name)
    }

    /// `!` or `?` ending a method name: `empty?`, `save!`, but not `x!=y`.
    fn at_name_suffix(&self) -> bool {
        if !matches!(self.cursor.current(), '!' | '?') {
            return false;
        }
        self.cursor.peek() != '=' || matches!(self.cursor.peek_nth(2), '=' | '~' | '>')
    }

    /// `=` making a setter name after `def`: `def name=`, not `def a==`
    /// or `def a=~`; `def a==>` is the setter followed by `=>`.
    fn at_setter_suffix(&self) -> bool {
        if self.cursor.current() != '=' {
            return false;
        }
        match self.cursor.peek() {
            '~' | '>' => false,
            '=' => self.cursor.peek_nth(2) == '>',
            _ => true,
        }
    }

    fn label_allowed(&self) -> bool {
        self.in_args() || (self.lex_state() == LexicalState::Beg && !self.state.command_mode)
    }

    fn keyword(&mut self, keyword: Keyword, name: &str, old: LexicalState) -> Step {
        // A keyword after `def`/`alias` is also a method name.
        let value = (old == LexicalState::Fname).then(|| TokenValue::Name(name.to_owned()));
        self.set_state(keyword.state);

        if keyword.kind == TokenKind::Do {
            let kind = self.do_kind(old);
            return Step::Token(self.lexeme(kind, value));
        }

        let kind = match keyword.modifier {
            Some(modifier) if !matches!(old, LexicalState::Beg | LexicalState::Value) => {
                self.set_state(LexicalState::Beg);
                modifier
            }
            _ => keyword.kind,
        };
        Step::Token(self.lexeme(kind, value))
    }

    /// What a `do` belongs to.
    fn do_kind(&mut self, old: LexicalState) -> TokenKind {
        if self.state.at_lambda_body() {
            self.state.open_lambda_body();
            return TokenKind::LambdaDo;
        }
        if self.state.in_loop_condition() {
            return TokenKind::LoopDo;
        }
        if (self.state.in_command_args() && old != LexicalState::CmdArg)
            || matches!(old, LexicalState::EndArg | LexicalState::Beg)
        {
            return TokenKind::BlockDo;
        }
        TokenKind::Do
    }
}
