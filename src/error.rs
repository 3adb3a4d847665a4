//! Error types for red-black tree operations

use thiserror::Error;

/// Errors returned by fallible tree operations.
///
/// Lookups that miss are reported with `Option` or `bool`, not with this type. A corrupted tree
/// structure is a bug and panics instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A value comparing `Equal` to the inserted one is already in the tree.
    #[error("duplicate key")]
    DuplicateKey,
}
