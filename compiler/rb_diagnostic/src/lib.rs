//! Diagnostic channel for the rb scanner.
//!
//! - [`ErrorCode`]: stable, searchable code per lexical problem
//! - [`Severity`]: `Warning`, `Error` or `Fatal`; none of them stop a scan
//! - [`Diagnostic`]: one `(span, severity, code, message)` record
//! - [`DiagnosticSink`]: the injected receiver, with in-memory, no-op and
//!   `tracing`-forwarding implementations
//! - [`SeverityPolicy`]: per-code severity, overridable by the embedder
//!
//! The scanner reports in source order and never aborts. Whether
//! error-severity diagnostics block parsing is the caller's decision.

mod diagnostic;
mod error_code;
mod policy;
mod sink;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use policy::SeverityPolicy;
pub use sink::{DiagnosticLog, DiagnosticSink, NullSink, TracingSink};
