use std::fmt;

use rb_ir::SourceSpan;

use crate::ErrorCode;

/// Severity level for diagnostics.
///
/// Ordered from least to most severe. No level stops the scanner; `Fatal`
/// only marks input for which no sensible token could be produced.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// True for `Error` and `Fatal`.
    #[inline]
    pub fn is_error(self) -> bool {
        self >= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// A single scanner diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    /// Exact offending source range.
    pub span: SourceSpan,
    pub severity: Severity,
    pub code: ErrorCode,
    pub message: String,
}

impl Diagnostic {
    pub fn new(span: SourceSpan, code: ErrorCode, severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            span,
            severity,
            code,
            message: message.into(),
        }
    }

    /// Diagnostic whose message is the code's stock description.
    pub fn from_code(span: SourceSpan, code: ErrorCode, severity: Severity) -> Self {
        Diagnostic::new(span, code, severity, code.description())
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} at {}",
            self.severity, self.code, self.message, self.span
        )
    }
}
