//! Typed errors for the MAST builder's sorted-key contract.

use thiserror::Error;

/// Rejections raised by [`crate::mast::builder::MastBuilder::add`].
///
/// Under normal use `IndexBuilder` feeds tokens from a `BTreeMap`, so none of
/// these ever fire in practice; they remain a public contract for any other
/// caller that drives the bare MAST builder directly.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BuilderError {
    #[error("key must not be empty")]
    EmptyKey,
    #[error("key is equal to the immediately preceding key")]
    DuplicateKey,
    #[error("key is lexicographically less than the immediately preceding key")]
    UnsortedKey,
}
