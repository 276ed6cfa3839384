//! Standalone building blocks for the rb scanner.
//!
//! Everything here works on a [`Cursor`] over borrowed text and reports
//! problems as [`LiteralIssue`]s pushed into a caller-owned `Vec`:
//!
//! - [`classify`]: character and name predicates
//! - [`number`]: numeric literal scanning and `Integer()`-style parsing
//! - [`bignum`]: arbitrary-precision digit parsing
//! - [`escape`]: backslash escape decoding and encoding
//!
//! The crate has no `rb_*` dependencies, so tools that only need to decode a
//! literal or check a name can use it without the scanner.

mod cursor;
mod issue;

pub mod bignum;
pub mod classify;
pub mod escape;
pub mod number;

pub use cursor::Cursor;
pub use issue::{IssueKind, LiteralIssue};
pub use number::{NumberLiteral, NumericValue};
