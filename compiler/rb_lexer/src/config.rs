//! Scanner configuration.

use rb_diagnostic::{ErrorCode, Severity, SeverityPolicy};
use rb_ir::SourceEncoding;
use rustc_hash::FxHashMap;

/// Default bound on simultaneously open literals and interpolations.
pub const DEFAULT_MAX_NESTING_DEPTH: u32 = 128;

/// How a source unit is scanned.
///
/// Built with [`Default`] and the `with_*` methods:
///
/// ```
/// use rb_lexer::LexerConfig;
/// use rb_ir::SourceEncoding;
///
/// let config = LexerConfig::default()
///     .with_encoding(SourceEncoding::Binary)
///     .with_trivia(true);
/// assert!(!config.extended_identifiers);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct LexerConfig {
    /// Encoding decoded literal content is tagged with.
    pub encoding: SourceEncoding,
    /// Whether non-ASCII letters may appear in identifiers.
    pub extended_identifiers: bool,
    /// Emit whitespace, comment and layout tokens.
    pub trivia: bool,
    pub max_nesting_depth: u32,
    /// Per-code severities replacing the defaults.
    pub severity_overrides: FxHashMap<ErrorCode, Severity>,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            encoding: SourceEncoding::Utf8,
            extended_identifiers: true,
            trivia: false,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            severity_overrides: FxHashMap::default(),
        }
    }
}

impl LexerConfig {
    /// Set the encoding. Extended identifiers follow the encoding unless set
    /// explicitly afterwards.
    #[must_use]
    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self.extended_identifiers = encoding.allows_extended_identifiers();
        self
    }

    #[must_use]
    pub fn with_extended_identifiers(mut self, enabled: bool) -> Self {
        self.extended_identifiers = enabled;
        self
    }

    #[must_use]
    pub fn with_trivia(mut self, enabled: bool) -> Self {
        self.trivia = enabled;
        self
    }

    /// Bound nesting; values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_nesting_depth(mut self, depth: u32) -> Self {
        self.max_nesting_depth = depth.max(1);
        self
    }

    /// Report `code` as `severity`.
    #[must_use]
    pub fn with_severity_override(mut self, code: ErrorCode, severity: Severity) -> Self {
        self.severity_overrides.insert(code, severity);
        self
    }

    /// Replace all overrides.
    #[must_use]
    pub fn with_severity_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (ErrorCode, Severity)>,
    ) -> Self {
        self.severity_overrides = overrides.into_iter().collect();
        self
    }

    /// Severity policy built from the overrides.
    pub fn severity_policy(&self) -> SeverityPolicy {
        self.severity_overrides
            .iter()
            .fold(SeverityPolicy::new(), |policy, (&code, &severity)| {
                policy.with_override(code, severity)
            })
    }
}
