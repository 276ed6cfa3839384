//! Operators and brackets.
//!
//! Most operators set the state to `Arg` after a method-name position
//! (`def +`, `x.+`) and to `Beg` otherwise. Several characters mean different
//! things at the start of an expression than after one: `*` splats, `&`
//! passes a block, `/` and `%` open literals, `[` builds an array, `-` and
//! `+` are unary.

use super::{Lexer, Step};
use crate::lex_error::LexErrorKind;
use crate::nesting::{NestingFrame, StringFlags, StringFrame};
use crate::{BinaryOp, LexicalState, TokenKind, TokenValue};

impl Lexer<'_> {
    /// Consume `n` more characters and emit `kind` with the operator state.
    fn operator(&mut self, n: usize, kind: TokenKind) -> Step {
        self.cursor.advance_n(n);
        self.set_operator_state();
        self.token(kind)
    }

    fn op_assign(&mut self, n: usize, op: BinaryOp) -> Step {
        self.cursor.advance_n(n);
        self.set_state(LexicalState::Beg);
        self.token_with(TokenKind::OpAssignment, TokenValue::OpAssign(op))
    }

    /// `foo -1`: warn that the operator is read as a prefix.
    fn warn_ambiguous(&mut self, kind: LexErrorKind) {
        let at = self.cursor.pos();
        self.report(kind, self.start, at);
    }

    // ─── Brackets ───

    pub(super) fn left_paren(&mut self) -> Step {
        self.cursor.advance();
        let state = self.lex_state();
        let kind = if state.is_begin() {
            TokenKind::LeftExprParenthesis
        } else if state.is_arg() && self.state.whitespace_seen {
            TokenKind::LeftArgParenthesis
        } else {
            TokenKind::LeftParenthesis
        };
        self.state.enter_paren();
        self.set_state(LexicalState::Beg);
        self.token(kind)
    }

    pub(super) fn right_paren(&mut self) -> Step {
        self.cursor.advance();
        self.state.leave_paren();
        self.set_state(LexicalState::EndFn);
        self.token(TokenKind::RightParenthesis)
    }

    pub(super) fn left_bracket(&mut self) -> Step {
        self.cursor.advance();
        let state = self.lex_state();
        if state.is_method_name_position() {
            self.set_state(LexicalState::Arg);
            if self.cursor.eat(']') {
                let kind = if self.cursor.eat('=') {
                    TokenKind::ItemAssign
                } else {
                    TokenKind::ItemReference
                };
                return self.token(kind);
            }
            self.state.enter_paren();
            return self.token(TokenKind::LeftIndexingBracket);
        }

        let kind = if state.is_begin() || (state.is_arg() && self.state.whitespace_seen) {
            TokenKind::LeftBracket
        } else {
            TokenKind::LeftIndexingBracket
        };
        self.state.enter_paren();
        self.set_state(LexicalState::Beg);
        self.token(kind)
    }

    pub(super) fn right_bracket(&mut self) -> Step {
        self.cursor.advance();
        self.state.leave_paren();
        self.set_state(LexicalState::EndArg);
        self.token(TokenKind::RightBracket)
    }

    pub(super) fn left_brace(&mut self) -> Step {
        self.cursor.advance();
        let state = self.lex_state();
        let kind = if self.state.at_lambda_body() {
            self.state.open_lambda_body();
            TokenKind::LeftLambdaBrace
        } else if state.is_arg() || matches!(state, LexicalState::End | LexicalState::EndFn) {
            TokenKind::LeftBlockBrace
        } else if state == LexicalState::EndArg {
            TokenKind::LeftBlockArgBrace
        } else {
            TokenKind::LeftBrace
        };
        self.state.nesting.note_brace('{');
        self.state.enter_paren();
        self.set_state(LexicalState::Beg);
        self.token(kind)
    }

    pub(super) fn right_brace(&mut self) -> Step {
        self.cursor.advance();
        self.state.leave_paren();
        if self.state.nesting.note_brace('}') {
            self.state.nesting.pop();
            self.set_state(LexicalState::End);
            return self.token(TokenKind::StringEmbeddedCodeEnd);
        }
        self.set_state(LexicalState::EndArg);
        self.token(TokenKind::RightBrace)
    }

    // ─── Comparison and assignment ───

    pub(super) fn equals(&mut self) -> Step {
        let (n, kind) = match (self.cursor.peek(), self.cursor.peek_nth(2)) {
            ('=', '=') => (3, TokenKind::StrictEqual),
            ('=', _) => (2, TokenKind::Equal),
            ('~', _) => (2, TokenKind::Match),
            ('>', _) => (2, TokenKind::DoubleArrow),
            _ => (1, TokenKind::Assignment),
        };
        self.operator(n, kind)
    }

    pub(super) fn less(&mut self) -> Step {
        let state = self.lex_state();
        if self.cursor.peek() == '<'
            && !matches!(state, LexicalState::Dot | LexicalState::Class)
            && !state.is_end()
            && (!state.is_arg() || self.state.whitespace_seen)
        {
            if let Some(step) = self.heredoc_opener() {
                return step;
            }
        }

        match (self.cursor.peek(), self.cursor.peek_nth(2)) {
            ('=', '>') => self.operator(3, TokenKind::Cmp),
            ('=', _) => self.operator(2, TokenKind::LessOrEqual),
            ('<', '=') => self.op_assign(3, BinaryOp::Shl),
            ('<', _) => self.operator(2, TokenKind::Lshft),
            _ => self.operator(1, TokenKind::Less),
        }
    }

    pub(super) fn greater(&mut self) -> Step {
        match (self.cursor.peek(), self.cursor.peek_nth(2)) {
            ('=', _) => self.operator(2, TokenKind::GreaterOrEqual),
            ('>', '=') => self.op_assign(3, BinaryOp::Shr),
            ('>', _) => self.operator(2, TokenKind::Rshft),
            _ => self.operator(1, TokenKind::Greater),
        }
    }

    pub(super) fn bang(&mut self) -> Step {
        match self.cursor.peek() {
            '=' => return self.operator(2, TokenKind::NotEqual),
            '~' => return self.operator(2, TokenKind::NotMatch),
            _ => {}
        }
        self.cursor.advance();
        if self.lex_state().is_method_name_position() {
            self.set_state(LexicalState::Arg);
            if self.cursor.eat('@') {
                return self.token(TokenKind::UnaryBangOp);
            }
            return self.token(TokenKind::Bang);
        }
        self.set_state(LexicalState::Beg);
        self.token(TokenKind::Bang)
    }

    // ─── Arithmetic ───

    pub(super) fn plus(&mut self) -> Step {
        self.cursor.advance();
        if self.lex_state().is_method_name_position() {
            self.set_state(LexicalState::Arg);
            if self.cursor.eat('@') {
                return self.token(TokenKind::UnaryPlusOp);
            }
            return self.token(TokenKind::Plus);
        }
        if self.cursor.current() == '=' {
            return self.op_assign(1, BinaryOp::Plus);
        }
        if self.prefix_position() {
            self.set_state(LexicalState::Beg);
            if self.cursor.current().is_ascii_digit() {
                return self.number();
            }
            return self.token(TokenKind::UnaryPlus);
        }
        self.set_state(LexicalState::Beg);
        self.token(TokenKind::Plus)
    }

    pub(super) fn minus(&mut self) -> Step {
        self.cursor.advance();
        if self.lex_state().is_method_name_position() {
            self.set_state(LexicalState::Arg);
            if self.cursor.eat('@') {
                return self.token(TokenKind::UnaryMinusOp);
            }
            return self.token(TokenKind::Minus);
        }
        match self.cursor.current() {
            '=' => return self.op_assign(1, BinaryOp::Minus),
            '>' => {
                self.cursor.advance();
                self.set_state(LexicalState::EndFn);
                return self.token(TokenKind::Lambda);
            }
            _ => {}
        }
        if self.prefix_position() {
            self.set_state(LexicalState::Beg);
            if self.cursor.current().is_ascii_digit() {
                return self.token(TokenKind::NumberNegation);
            }
            return self.token(TokenKind::UnaryMinus);
        }
        self.set_state(LexicalState::Beg);
        self.token(TokenKind::Minus)
    }

    /// Start of an expression, or an argument after a space with no space
    /// after the operator (warned as ambiguous). Cursor after the operator.
    fn prefix_position(&mut self) -> bool {
        if self.lex_state().is_begin() {
            return true;
        }
        if self.in_args_no_space() {
            self.warn_ambiguous(LexErrorKind::AmbiguousFirstArgument);
            return true;
        }
        false
    }

    pub(super) fn star(&mut self) -> Step {
        match (self.cursor.peek(), self.cursor.peek_nth(2)) {
            ('*', '=') => return self.op_assign(3, BinaryOp::Pow),
            ('*', _) => return self.operator(2, TokenKind::Pow),
            ('=', _) => return self.op_assign(2, BinaryOp::Star),
            _ => {}
        }
        self.cursor.advance();
        let kind = if self.in_args_no_space() {
            self.warn_ambiguous(LexErrorKind::StarInterpretedAsSplat);
            TokenKind::Star
        } else if self.lex_state().is_begin() {
            TokenKind::Star
        } else {
            TokenKind::Asterisk
        };
        self.set_operator_state();
        self.token(kind)
    }

    pub(super) fn slash(&mut self) -> Step {
        self.cursor.advance();
        if self.lex_state().is_begin() {
            return self.open_regex();
        }
        if self.cursor.current() == '=' {
            return self.op_assign(1, BinaryOp::Slash);
        }
        if self.in_args_no_space() {
            self.warn_ambiguous(LexErrorKind::AmbiguousFirstArgument);
            return self.open_regex();
        }
        self.set_operator_state();
        self.token(TokenKind::Slash)
    }

    fn open_regex(&mut self) -> Step {
        self.open_quoted(
            StringFrame::new(StringFlags::REGEX | StringFlags::EXPANDS, '/'),
            TokenKind::RegexBegin,
        )
    }

    pub(super) fn percent(&mut self) -> Step {
        self.cursor.advance();
        if self.lex_state().is_begin() {
            return self.quotation();
        }
        if self.cursor.current() == '=' {
            return self.op_assign(1, BinaryOp::Percent);
        }
        if self.in_args_no_space() {
            return self.quotation();
        }
        self.set_operator_state();
        self.token(TokenKind::Percent)
    }

    // ─── Bitwise and logical ───

    pub(super) fn ampersand(&mut self) -> Step {
        match (self.cursor.peek(), self.cursor.peek_nth(2)) {
            ('&', '=') => return self.op_assign(3, BinaryOp::And),
            ('&', _) => {
                self.cursor.advance_n(2);
                self.set_state(LexicalState::Beg);
                return self.token(TokenKind::And2);
            }
            ('=', _) => return self.op_assign(2, BinaryOp::BitAnd),
            _ => {}
        }
        self.cursor.advance();
        let kind = if self.in_args_no_space() {
            self.warn_ambiguous(LexErrorKind::AmpersandInterpretedAsBlock);
            TokenKind::BlockReference
        } else if self.lex_state().is_begin() {
            TokenKind::BlockReference
        } else {
            TokenKind::Ampersand
        };
        self.set_operator_state();
        self.token(kind)
    }

    pub(super) fn pipe(&mut self) -> Step {
        match (self.cursor.peek(), self.cursor.peek_nth(2)) {
            ('|', '=') => self.op_assign(3, BinaryOp::Or),
            ('|', _) => {
                self.cursor.advance_n(2);
                self.set_state(LexicalState::Beg);
                self.token(TokenKind::Or2)
            }
            ('=', _) => self.op_assign(2, BinaryOp::BitOr),
            _ => self.operator(1, TokenKind::Pipe),
        }
    }

    pub(super) fn caret(&mut self) -> Step {
        if self.cursor.peek() == '=' {
            return self.op_assign(2, BinaryOp::BitXor);
        }
        self.operator(1, TokenKind::Caret)
    }

    pub(super) fn tilde(&mut self) -> Step {
        self.cursor.advance();
        if self.lex_state().is_method_name_position() {
            self.set_state(LexicalState::Arg);
            if self.cursor.eat('@') {
                return self.token(TokenKind::UnaryTildeOp);
            }
            return self.token(TokenKind::Tilde);
        }
        self.set_state(LexicalState::Beg);
        self.token(TokenKind::Tilde)
    }

    // ─── Dots and colons ───

    pub(super) fn dot(&mut self) -> Step {
        self.cursor.advance();
        if self.cursor.eat('.') {
            let kind = if self.cursor.eat('.') {
                TokenKind::TripleDot
            } else {
                TokenKind::DoubleDot
            };
            self.set_state(LexicalState::Beg);
            return self.token(kind);
        }
        self.set_state(LexicalState::Dot);
        self.token(TokenKind::Dot)
    }

    pub(super) fn colon(&mut self) -> Step {
        self.cursor.advance();
        let state = self.lex_state();

        if self.cursor.eat(':') {
            if state.is_begin() || state == LexicalState::Class || self.in_args_no_space() {
                self.set_state(LexicalState::Beg);
                return self.token(TokenKind::LeadingDoubleColon);
            }
            self.set_state(LexicalState::Dot);
            return self.token(TokenKind::SeparatingDoubleColon);
        }

        let next = self.cursor.current();
        if state.is_end() || self.cursor.is_eof() || next == '#' || rb_lexer_core::classify::is_whitespace(next) {
            self.set_state(LexicalState::Beg);
            return self.token(TokenKind::Colon);
        }

        match next {
            '"' => {
                self.cursor.advance();
                self.open_quoted(
                    StringFrame::new(StringFlags::EXPANDS | StringFlags::SYMBOL, '"'),
                    TokenKind::SymbolBegin,
                )
            }
            '\'' => {
                self.cursor.advance();
                self.open_quoted(StringFrame::new(StringFlags::SYMBOL, '\''), TokenKind::SymbolBegin)
            }
            _ => {
                // `:name`, `:+`: the name follows as its own token.
                self.set_state(LexicalState::Fname);
                self.token(TokenKind::SymbolBegin)
            }
        }
    }

    pub(super) fn backtick(&mut self) -> Step {
        self.cursor.advance();
        match self.lex_state() {
            LexicalState::Fname => {
                self.set_state(LexicalState::EndFn);
                self.token(TokenKind::Backtick)
            }
            LexicalState::Dot => {
                let next = if self.state.command_mode {
                    LexicalState::CmdArg
                } else {
                    LexicalState::Arg
                };
                self.set_state(next);
                self.token(TokenKind::Backtick)
            }
            _ => self.open_quoted(
                StringFrame::new(StringFlags::EXPANDS | StringFlags::SHELL, '`'),
                TokenKind::ShellStringBegin,
            ),
        }
    }

    /// Open a string-like frame with the cursor past the opening delimiter.
    ///
    /// Past the nesting limit the begin token is still emitted but the
    /// content is scanned as code.
    pub(super) fn open_quoted(&mut self, frame: StringFrame, kind: TokenKind) -> Step {
        let frame = if frame.flags.contains(StringFlags::REGEX) {
            NestingFrame::Pattern(frame)
        } else {
            NestingFrame::Quoted(frame)
        };
        self.open_frame(frame);
        if kind == TokenKind::SymbolBegin {
            self.set_state(LexicalState::Fname);
        }
        self.token(kind)
    }
}
