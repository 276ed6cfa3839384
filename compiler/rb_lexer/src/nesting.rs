//! Open-construct tracking.
//!
//! One stack holds every construct the scanner is inside of: quoted
//! strings, regexes, heredoc bodies, `#{}` interpolations and `=begin`
//! blocks. The top frame decides how the next token is scanned; an empty
//! stack (or an interpolation on top) means code.
//!
//! ```text
//!   "a#{ x.map { |y| <<EOS } }"
//!   Quoted ─► Interpolation{brace_depth: 1} ─► ...
//! ```
//!
//! A `}` inside an interpolation only closes it when the braces opened since
//! the `#{` are balanced, so hashes and blocks survive inside.

use smallvec::SmallVec;

use crate::LexicalState;

bitflags::bitflags! {
    /// How a quoted construct treats its content.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct StringFlags: u8 {
        /// Escapes are decoded and `#{}`, `#@`, `#$` interpolate.
        const EXPANDS = 1;
        const REGEX = 1 << 1;
        /// `%w` / `%W`: whitespace separates words.
        const WORDS = 1 << 2;
        const SYMBOL = 1 << 3;
        const SHELL = 1 << 4;
    }
}

/// State of an open string, symbol, word list, shell string or regex.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct StringFrame {
    /// Opening character of a paired delimiter; `None` for `"`, `|`, ...
    pub open_delim: Option<char>,
    pub close_delim: char,
    pub flags: StringFlags,
    /// Unclosed `open_delim` characters seen in the content.
    pub paren_depth: u32,
}

impl StringFrame {
    pub fn new(flags: StringFlags, close_delim: char) -> Self {
        StringFrame {
            open_delim: None,
            close_delim,
            flags,
            paren_depth: 0,
        }
    }

    /// Frame for a delimiter character, pairing `( [ { <` with their closers.
    pub fn delimited_by(flags: StringFlags, delim: char) -> Self {
        match closing_delimiter(delim) {
            Some(close) => StringFrame {
                open_delim: Some(delim),
                close_delim: close,
                flags,
                paren_depth: 0,
            },
            None => StringFrame::new(flags, delim),
        }
    }

    #[inline]
    pub fn interpolation_allowed(&self) -> bool {
        self.flags.contains(StringFlags::EXPANDS)
    }
}

/// Closer of a paired delimiter.
pub fn closing_delimiter(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '<' => Some('>'),
        _ => None,
    }
}

/// Where a heredoc's closing label may sit and whether its body is dedented.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum HeredocIndent {
    /// `<<EOS`: label at column 1.
    None,
    /// `<<-EOS`: label may be indented.
    Dash,
    /// `<<~EOS`: label may be indented, common indentation is removed.
    Squiggly,
}

impl HeredocIndent {
    #[inline]
    pub fn allows_indented_label(self) -> bool {
        !matches!(self, HeredocIndent::None)
    }
}

/// A heredoc opener seen on the current line, waiting for the line to end.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct HeredocRequest {
    pub label: String,
    pub indent: HeredocIndent,
    pub interpolate: bool,
    pub shell: bool,
}

/// Code-level state to restore once the last heredoc of a line is done.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeState {
    pub lex_state: LexicalState,
    pub command_mode: bool,
    pub whitespace_seen: bool,
    /// The line end that started the bodies still has to be classified.
    pub newline: bool,
}

/// A heredoc body being scanned.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct HeredocFrame {
    pub request: HeredocRequest,
    /// Columns removed from each line of a squiggly body, once known.
    pub dedent: Option<u32>,
    /// Set on the last body of a line that interrupted code.
    pub resume: Option<CodeState>,
}

impl HeredocFrame {
    pub fn new(request: HeredocRequest) -> Self {
        HeredocFrame {
            request,
            dedent: None,
            resume: None,
        }
    }
}

/// One open construct.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum NestingFrame {
    /// String, symbol, word list or shell string.
    Quoted(StringFrame),
    /// Regex literal.
    Pattern(StringFrame),
    /// Heredoc body.
    DeferredBlock(HeredocFrame),
    /// `#{ ... }`; `brace_depth` counts unclosed `{` inside.
    Interpolation { brace_depth: u32 },
    /// `=begin ... =end`.
    Comment,
}

impl NestingFrame {
    pub fn interpolation_allowed(&self) -> bool {
        match self {
            NestingFrame::Quoted(frame) | NestingFrame::Pattern(frame) => {
                frame.interpolation_allowed()
            }
            NestingFrame::DeferredBlock(frame) => frame.request.interpolate,
            NestingFrame::Interpolation { .. } | NestingFrame::Comment => false,
        }
    }

    /// Character that closes the frame, if it is closed by a character.
    pub fn expected_closer(&self) -> Option<char> {
        match self {
            NestingFrame::Quoted(frame) | NestingFrame::Pattern(frame) => Some(frame.close_delim),
            NestingFrame::Interpolation { .. } => Some('}'),
            NestingFrame::DeferredBlock(_) | NestingFrame::Comment => None,
        }
    }
}

/// Stack of open constructs, bounded in depth.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct NestingStack {
    frames: SmallVec<[NestingFrame; 4]>,
    max_depth: u32,
}

impl NestingStack {
    pub fn new(max_depth: u32) -> Self {
        NestingStack {
            frames: SmallVec::new(),
            max_depth,
        }
    }

    /// Push `frame`. Returns false, leaving the stack unchanged, when the
    /// depth limit is reached.
    #[must_use]
    pub fn open(&mut self, frame: NestingFrame) -> bool {
        if self.depth() >= self.max_depth {
            return false;
        }
        tracing::debug!(depth = self.depth() + 1, ?frame, "open");
        self.frames.push(frame);
        true
    }

    /// Pop the top frame. Returns whether `closer` is what the frame expected.
    pub fn close(&mut self, closer: char) -> bool {
        match self.pop() {
            Some(frame) => frame.expected_closer() == Some(closer),
            None => false,
        }
    }

    pub fn pop(&mut self) -> Option<NestingFrame> {
        let frame = self.frames.pop();
        if let Some(frame) = &frame {
            tracing::debug!(depth = self.depth(), ?frame, "close");
        }
        frame
    }

    /// Track a brace in code inside the innermost interpolation.
    ///
    /// Returns true when `c` is a `}` that closes the interpolation itself;
    /// the frame is left for the caller to pop.
    pub fn note_brace(&mut self, c: char) -> bool {
        let Some(NestingFrame::Interpolation { brace_depth }) = self.frames.last_mut() else {
            return false;
        };
        match c {
            '{' => {
                *brace_depth += 1;
                false
            }
            '}' if *brace_depth > 0 => {
                *brace_depth -= 1;
                false
            }
            '}' => true,
            _ => false,
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "depth never exceeds max_depth: u32"
    )]
    #[inline]
    pub fn depth(&self) -> u32 {
        self.frames.len() as u32
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Change the depth limit. Frames already open stay open even when the
    /// new limit is below the current depth.
    pub fn set_max_depth(&mut self, max_depth: u32) {
        self.max_depth = max_depth;
    }

    #[inline]
    pub fn top(&self) -> Option<&NestingFrame> {
        self.frames.last()
    }

    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut NestingFrame> {
        self.frames.last_mut()
    }

    #[inline]
    pub fn is_top_level(&self) -> bool {
        self.frames.is_empty()
    }

    /// True when the next token is code: nothing open, or an interpolation
    /// on top.
    #[inline]
    pub fn in_code(&self) -> bool {
        matches!(self.top(), None | Some(NestingFrame::Interpolation { .. }))
    }

    pub fn frames(&self) -> impl Iterator<Item = &NestingFrame> {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests;
