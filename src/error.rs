//! Error type shared by hashing and map operations.

/// Errors reported by hashing and by the map operations that hash keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The active hash function does not know how to hash this kind of key.
    ///
    /// Map operations surface this instead of addressing the key under a
    /// substitute hash, so a failed hash never lands an entry in the wrong
    /// slot.
    #[error("don't know how to hash a key of kind `{kind}`")]
    UnsupportedKey {
        /// Kind name of the rejected key, e.g. `"int"`.
        kind: &'static str,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
