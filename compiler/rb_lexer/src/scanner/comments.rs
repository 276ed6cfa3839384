//! `=begin`/`=end` documents and the `__END__` marker.

use rb_lexer_core::classify::is_whitespace;

use super::{Lexer, Step};
use crate::lex_error::LexErrorKind;
use crate::nesting::NestingFrame;
use crate::TokenKind;

/// `word` at the cursor, followed by whitespace or end of input.
fn starts_word(rest: &str, word: &str) -> bool {
    rest.strip_prefix(word)
        .is_some_and(|after| after.chars().next().is_none_or(is_whitespace))
}

impl Lexer<'_> {
    pub(super) fn at_embedded_doc_begin(&self) -> bool {
        starts_word(self.cursor.rest(), "=begin")
    }

    pub(super) fn embedded_doc_begin(&mut self) -> Step {
        self.cursor.eat_until_line_end();
        self.cursor.eat_line_end();
        // Too deep: the document is scanned as code after the report.
        self.open_frame(NestingFrame::Comment);
        self.token(TokenKind::MultiLineComment)
    }

    /// One line of an embedded document.
    pub(super) fn scan_embedded_doc(&mut self) -> Step {
        if self.cursor.is_eof() {
            self.report_here(LexErrorKind::UnterminatedEmbeddedDocument);
            self.state.nesting.pop();
            return Step::Skip;
        }
        let ends = starts_word(self.cursor.rest(), "=end");
        self.cursor.eat_until_line_end();
        self.cursor.eat_line_end();
        if ends {
            self.state.nesting.pop();
        }
        self.token(TokenKind::MultiLineComment)
    }

    pub(super) fn at_end_marker(&self) -> bool {
        self.cursor.line_rest() == "__END__"
    }

    /// `__END__`: the rest of the input is data.
    pub(super) fn end_marker(&mut self) -> Step {
        self.cursor.eat_until_line_end();
        self.cursor.eat_line_end();
        self.data_start = Some(self.cursor.pos());
        self.state.closed = true;
        tracing::debug!(offset = self.cursor.pos(), "data section");
        self.token(TokenKind::EndOfFileData)
    }
}
