//! Character and name classification.
//!
//! Every predicate is total: empty input and strings containing characters
//! outside the expected set simply answer `false`.
//!
//! Name predicates come in two flavours. [`Classifier`] carries the
//! extended-identifier switch (non-ASCII characters count as identifier
//! characters only when it is on); the free functions use extended mode, the
//! default for Unicode sources. The `*_utf16` functions accept 16-bit code
//! units, where a surrogate pair is one character and a lone surrogate is
//! never an identifier character.

// ─── Characters ─────────────────────────────────────────────────────────

/// `\t`, `\n`, `\v`, `\f`, `\r` and space.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, '\t'..='\r' | ' ')
}

#[inline]
pub fn is_upper_letter(c: char) -> bool {
    c.is_ascii_uppercase()
}

#[inline]
pub fn is_lower_letter(c: char) -> bool {
    c.is_ascii_lowercase()
}

#[inline]
pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[inline]
pub fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub fn is_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7')
}

#[inline]
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Value of `c` as a digit in bases up to 36 (`0-9`, then `a-z`/`A-Z`).
#[inline]
pub fn digit_value(c: char) -> Option<u32> {
    c.to_digit(36)
}

/// First character of an identifier, with non-ASCII characters allowed.
#[inline]
pub fn is_identifier_start(c: char) -> bool {
    Classifier::EXTENDED.is_identifier_start(c)
}

/// Any identifier character, with non-ASCII characters allowed.
#[inline]
pub fn is_identifier_char(c: char) -> bool {
    Classifier::EXTENDED.is_identifier_char(c)
}

// ─── Names ──────────────────────────────────────────────────────────────

/// Punctuation globals: `$!`, `$@`, `$~`, ...
const SPECIAL_GLOBALS: &[char] = &[
    '~', '*', '$', '?', '!', '@', '/', '\\', ';', ',', '.', '=', ':', '<', '>', '"', '&', '`',
    '\'', '+', '0', '_',
];

/// Name predicates parameterised by the extended-identifier switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Classifier {
    pub extended_identifiers: bool,
}

impl Classifier {
    /// Non-ASCII characters are identifier characters.
    pub const EXTENDED: Classifier = Classifier {
        extended_identifiers: true,
    };

    /// Only `[A-Za-z0-9_]` are identifier characters.
    pub const ASCII: Classifier = Classifier {
        extended_identifiers: false,
    };

    #[inline]
    pub fn is_identifier_start(self, c: char) -> bool {
        is_letter(c) || c == '_' || (self.extended_identifiers && !c.is_ascii())
    }

    #[inline]
    pub fn is_identifier_char(self, c: char) -> bool {
        self.is_identifier_start(c) || is_decimal_digit(c)
    }

    fn all_identifier_chars(self, s: &str) -> bool {
        s.chars().all(|c| self.is_identifier_char(c))
    }

    /// Uppercase ASCII letter followed by identifier characters.
    pub fn is_constant_name(self, name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if is_upper_letter(first) => self.all_identifier_chars(chars.as_str()),
            _ => false,
        }
    }

    /// Local variable: identifier start (not uppercase) then identifier
    /// characters.
    pub fn is_variable_name(self, name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if self.is_identifier_start(first) && !is_upper_letter(first) => {
                self.all_identifier_chars(chars.as_str())
            }
            _ => false,
        }
    }

    /// Identifier not starting with an uppercase letter, optionally ending
    /// in `=`, `?` or `!`.
    pub fn is_method_name(self, name: &str) -> bool {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        if !self.is_identifier_start(first) || is_upper_letter(first) {
            return false;
        }
        let body = chars.as_str();
        let body = body
            .strip_suffix(|c: char| matches!(c, '=' | '?' | '!'))
            .unwrap_or(body);
        self.all_identifier_chars(body)
    }

    /// `$name`, `$-x`, or a punctuation global such as `$!`.
    pub fn is_global_variable_name(self, name: &str) -> bool {
        let Some(tail) = name.strip_prefix('$') else {
            return false;
        };
        let mut chars = tail.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (None, ..) => false,
            (Some(c), None, _) if SPECIAL_GLOBALS.contains(&c) => true,
            (Some('-'), Some(c), None) => self.is_identifier_char(c),
            _ => self.all_identifier_chars(tail),
        }
    }

    /// `@name` where `name` starts like an identifier.
    pub fn is_instance_variable_name(self, name: &str) -> bool {
        match name.strip_prefix('@') {
            Some(tail) if !tail.starts_with('@') => self.is_sigil_tail(tail),
            _ => false,
        }
    }

    /// `@@name` where `name` starts like an identifier.
    pub fn is_class_variable_name(self, name: &str) -> bool {
        name.strip_prefix("@@")
            .is_some_and(|tail| self.is_sigil_tail(tail))
    }

    fn is_sigil_tail(self, tail: &str) -> bool {
        let mut chars = tail.chars();
        match chars.next() {
            Some(first) if self.is_identifier_start(first) => {
                self.all_identifier_chars(chars.as_str())
            }
            _ => false,
        }
    }
}

#[inline]
pub fn is_constant_name(name: &str) -> bool {
    Classifier::EXTENDED.is_constant_name(name)
}

#[inline]
pub fn is_variable_name(name: &str) -> bool {
    Classifier::EXTENDED.is_variable_name(name)
}

#[inline]
pub fn is_method_name(name: &str) -> bool {
    Classifier::EXTENDED.is_method_name(name)
}

#[inline]
pub fn is_global_variable_name(name: &str) -> bool {
    Classifier::EXTENDED.is_global_variable_name(name)
}

#[inline]
pub fn is_instance_variable_name(name: &str) -> bool {
    Classifier::EXTENDED.is_instance_variable_name(name)
}

#[inline]
pub fn is_class_variable_name(name: &str) -> bool {
    Classifier::EXTENDED.is_class_variable_name(name)
}

/// Operator method names that can be defined with `def`.
pub fn is_operator_name(name: &str) -> bool {
    matches!(
        name,
        "|" | "^"
            | "&"
            | "<=>"
            | "=="
            | "==="
            | "=~"
            | ">"
            | ">="
            | "<"
            | "<="
            | "<<"
            | ">>"
            | "+"
            | "-"
            | "*"
            | "/"
            | "%"
            | "**"
            | "~"
            | "+@"
            | "-@"
            | "[]"
            | "[]="
            | "`"
    )
}

// ─── UTF-16 views ───────────────────────────────────────────────────────

/// Decode UTF-16 code units; `None` if any surrogate is unpaired.
fn from_utf16(units: &[u16]) -> Option<String> {
    String::from_utf16(units).ok()
}

pub fn is_constant_name_utf16(units: &[u16]) -> bool {
    from_utf16(units).is_some_and(|s| is_constant_name(&s))
}

pub fn is_method_name_utf16(units: &[u16]) -> bool {
    from_utf16(units).is_some_and(|s| is_method_name(&s))
}

pub fn is_global_variable_name_utf16(units: &[u16]) -> bool {
    from_utf16(units).is_some_and(|s| is_global_variable_name(&s))
}

pub fn is_instance_variable_name_utf16(units: &[u16]) -> bool {
    from_utf16(units).is_some_and(|s| is_instance_variable_name(&s))
}

pub fn is_class_variable_name_utf16(units: &[u16]) -> bool {
    from_utf16(units).is_some_and(|s| is_class_variable_name(&s))
}
