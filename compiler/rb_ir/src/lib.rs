//! rb IR - shared source-location types.
//!
//! This crate holds the small value types every other `rb_*` crate agrees on:
//! - [`Position`] and [`SourceSpan`] for token and diagnostic locations
//! - [`SourceEncoding`] describing how literal content is decoded
//!
//! Everything here is `Copy` and allocation-free so tokens stay cheap to
//! move around.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod encoding;
mod span;

pub use encoding::SourceEncoding;
pub use span::{Position, SourceSpan};
