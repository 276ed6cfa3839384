//! Diagnostic sinks.
//!
//! The scanner is handed a sink at construction and pushes every problem it
//! finds into it, in source order. Sinks never influence scanning.

use rb_ir::SourceSpan;

use crate::{Diagnostic, ErrorCode, Severity};

/// Receiver of scanner diagnostics.
pub trait DiagnosticSink {
    /// Accept a fully built diagnostic.
    fn report_diagnostic(&mut self, diagnostic: Diagnostic);

    /// Report `code` at `span` with the code's stock message.
    fn report(&mut self, span: SourceSpan, code: ErrorCode, severity: Severity) {
        self.report_diagnostic(Diagnostic::from_code(span, code, severity));
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        (**self).report_diagnostic(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        (**self).report_diagnostic(diagnostic);
    }
}

/// Discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report_diagnostic(&mut self, _diagnostic: Diagnostic) {}
}

/// In-memory log, preserving report order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticLog {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// True if any `Error` or `Fatal` was reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Codes in report order. Handy in tests.
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Forwards each diagnostic to `tracing`.
///
/// Warnings go out at `WARN`, errors and fatals at `ERROR`, under the
/// `rb_diagnostic` target.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => tracing::warn!(
                code = %diagnostic.code,
                span = %diagnostic.span,
                "{}",
                diagnostic.message
            ),
            Severity::Error | Severity::Fatal => tracing::error!(
                code = %diagnostic.code,
                span = %diagnostic.span,
                severity = %diagnostic.severity,
                "{}",
                diagnostic.message
            ),
        }
    }
}
