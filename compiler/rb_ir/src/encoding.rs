//! Source encoding descriptor.
//!
//! The scanner never detects encodings. Whoever hands it the source resolves
//! the encoding (BOM, magic comment, command line) and passes it in here.

use std::fmt;

/// Encoding the decoded literal content is tagged with.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceEncoding {
    #[default]
    Utf8,
    /// Raw bytes, no character semantics (`ASCII-8BIT`).
    Binary,
    /// 7-bit ASCII (`US-ASCII`).
    Ascii,
    EucJp,
    ShiftJis,
}

impl SourceEncoding {
    /// True when escapes producing non-ASCII code points may be decoded to
    /// characters. Other encodings carry such content as raw bytes.
    #[inline]
    pub const fn is_unicode(self) -> bool {
        matches!(self, SourceEncoding::Utf8)
    }

    /// True when non-ASCII characters may appear in identifiers.
    #[inline]
    pub const fn allows_extended_identifiers(self) -> bool {
        !matches!(self, SourceEncoding::Binary | SourceEncoding::Ascii)
    }

    pub const fn name(self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "UTF-8",
            SourceEncoding::Binary => "ASCII-8BIT",
            SourceEncoding::Ascii => "US-ASCII",
            SourceEncoding::EucJp => "EUC-JP",
            SourceEncoding::ShiftJis => "Shift_JIS",
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_utf8_decodes_unicode_escapes() {
        assert!(SourceEncoding::Utf8.is_unicode());
        assert!(!SourceEncoding::Binary.is_unicode());
        assert!(!SourceEncoding::ShiftJis.is_unicode());
    }

    #[test]
    fn byte_encodings_reject_extended_identifiers() {
        assert!(!SourceEncoding::Binary.allows_extended_identifiers());
        assert!(!SourceEncoding::Ascii.allows_extended_identifiers());
        assert!(SourceEncoding::EucJp.allows_extended_identifiers());
    }

    #[test]
    fn display_names() {
        assert_eq!(SourceEncoding::Binary.to_string(), "ASCII-8BIT");
        assert_eq!(SourceEncoding::default().to_string(), "UTF-8");
    }
}
