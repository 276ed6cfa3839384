//! Severity policy.
//!
//! Which lexical conditions are warnings and which are errors is a policy
//! decision, not a property of the scanner. [`SeverityPolicy`] supplies the
//! defaults and lets the embedder override individual codes.

use rustc_hash::FxHashMap;

use crate::{ErrorCode, Severity};

/// Maps error codes to the severity they are reported with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeverityPolicy {
    overrides: FxHashMap<ErrorCode, Severity>,
}

impl SeverityPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in severity of `code`.
    pub fn default_severity(code: ErrorCode) -> Severity {
        match code {
            ErrorCode::E0016
            | ErrorCode::E0025
            | ErrorCode::E0026
            | ErrorCode::E0027
            | ErrorCode::E0028
            | ErrorCode::E0030 => Severity::Warning,
            ErrorCode::E0029 => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Force `code` to be reported as `severity`.
    #[must_use]
    pub fn with_override(mut self, code: ErrorCode, severity: Severity) -> Self {
        self.overrides.insert(code, severity);
        self
    }

    pub fn set_override(&mut self, code: ErrorCode, severity: Severity) {
        self.overrides.insert(code, severity);
    }

    /// Severity for a report of `code` whose call site suggested `proposed`.
    ///
    /// An override always wins. Without one, the call site's proposal is
    /// kept: some codes (e.g. `E0012`) are a warning in one context and an
    /// error in another.
    pub fn resolve(&self, code: ErrorCode, proposed: Severity) -> Severity {
        self.overrides.get(&code).copied().unwrap_or(proposed)
    }

    /// Severity for `code` with no call-site proposal.
    pub fn severity_of(&self, code: ErrorCode) -> Severity {
        self.resolve(code, Self::default_severity(code))
    }

    pub fn overrides(&self) -> impl Iterator<Item = (ErrorCode, Severity)> + '_ {
        self.overrides.iter().map(|(&code, &severity)| (code, severity))
    }
}
