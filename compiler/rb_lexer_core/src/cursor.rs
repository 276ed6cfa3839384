//! Character cursor over borrowed source text.
//!
//! The cursor walks a `&str` one `char` at a time and reports positions as
//! `u32` byte offsets. Text longer than `u32::MAX` bytes is cut at the last
//! character boundary that fits, so every offset the cursor hands out is
//! representable.
//!
//! # End of input
//!
//! [`current()`](Cursor::current) and the peek family return `'\0'` once the
//! cursor runs out of text. A NUL inside the text also reads as `'\0'`; use
//! [`is_eof()`](Cursor::is_eof) to tell the two apart.

/// Cut `text` so its length fits in a `u32`.
fn clamp_to_u32(text: &str) -> &str {
    let max = u32::MAX as usize;
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Cursor over borrowed text.
///
/// The cursor is [`Copy`], so callers snapshot it for lookahead and restore
/// it with [`reset_to()`](Self::reset_to) or plain assignment.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: u32,
}

const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a cursor at offset 0.
    pub fn new(text: &'a str) -> Self {
        Cursor {
            text: clamp_to_u32(text),
            pos: 0,
        }
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the visible text in bytes.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "text is clamped to u32::MAX bytes on construction"
    )]
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.text.len() as u32
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos as usize >= self.text.len()
    }

    /// Text from the cursor to the end of input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos as usize..]
    }

    /// Character at the cursor, `'\0'` at end of input.
    #[inline]
    pub fn current(&self) -> char {
        self.rest().chars().next().unwrap_or('\0')
    }

    /// Character after the current one.
    #[inline]
    pub fn peek(&self) -> char {
        self.peek_nth(1)
    }

    /// Character `n` positions ahead (`peek_nth(0)` is `current()`).
    pub fn peek_nth(&self, n: usize) -> char {
        self.rest().chars().nth(n).unwrap_or('\0')
    }

    /// Consume and return the current character. At end of input nothing
    /// moves and `'\0'` is returned.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "len_utf8() is at most 4"
    )]
    #[inline]
    pub fn advance(&mut self) -> char {
        match self.rest().chars().next() {
            Some(c) => {
                self.pos += c.len_utf8() as u32;
                c
            }
            None => '\0',
        }
    }

    /// Consume `n` characters (fewer if the input ends first).
    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.is_eof() {
                break;
            }
            self.advance();
        }
    }

    /// Consume `c` if it is the current character.
    #[inline]
    pub fn eat(&mut self, c: char) -> bool {
        if !self.is_eof() && self.current() == c {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Consume `s` if the remaining text starts with it.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "s is a prefix of the clamped text"
    )]
    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            self.pos += s.len() as u32;
            true
        } else {
            false
        }
    }

    /// Advance while `pred` holds. Returns the number of bytes consumed.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "len_utf8() is at most 4"
    )]
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> u32 {
        let start = self.pos;
        for c in self.rest().chars() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8() as u32;
        }
        self.pos - start
    }

    /// True at `\n` or `\r\n`.
    #[inline]
    pub fn at_line_end(&self) -> bool {
        let rest = self.rest().as_bytes();
        matches!(rest, [b'\n', ..] | [b'\r', b'\n', ..])
    }

    /// Consume `\n` or `\r\n`.
    pub fn eat_line_end(&mut self) -> bool {
        self.eat('\n') || self.eat_str("\r\n")
    }

    /// Advance to the next line terminator (`\n`, or the `\r` of `\r\n`) or
    /// to end of input, without consuming it.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining length is bounded by the clamped text"
    )]
    pub fn eat_until_line_end(&mut self) {
        let rest = self.rest().as_bytes();
        match memchr::memchr(b'\n', rest) {
            Some(mut offset) => {
                if offset > 0 && rest[offset - 1] == b'\r' {
                    offset -= 1;
                }
                self.pos += offset as u32;
            }
            None => self.pos = self.source_len(),
        }
    }

    /// Text from the cursor up to (not including) the next line terminator.
    pub fn line_rest(&self) -> &'a str {
        let mut ahead = *self;
        ahead.eat_until_line_end();
        self.slice(self.pos, ahead.pos)
    }

    /// True at offset 0 or right after a `\n`.
    #[inline]
    pub fn is_line_start(&self) -> bool {
        self.pos == 0 || self.text.as_bytes()[self.pos as usize - 1] == b'\n'
    }

    /// Source text between two offsets.
    ///
    /// Both offsets must come from this cursor, so they sit on character
    /// boundaries.
    #[inline]
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        &self.text[start as usize..end as usize]
    }

    /// Source text from `start` to the cursor.
    #[inline]
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Move back (or forward) to an offset previously returned by `pos()`.
    #[inline]
    pub fn reset_to(&mut self, pos: u32) {
        debug_assert!(self.text.is_char_boundary(pos as usize));
        self.pos = pos;
    }

    /// Treat the cursor position as the end of input from now on.
    pub fn truncate(&mut self) {
        self.text = &self.text[..self.pos as usize];
    }
}
