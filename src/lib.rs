//! Persistent hash map over a hash array mapped trie.
//!
//! Keys are hashed to 32 bits and the trie consumes the hash 5 bits per
//! level: level `L` branches on bits `[5L, 5L + 5)`, so at most seven levels
//! cover any hash.
//!
//! # Key properties
//!
//! - **Persistence**: [`HamtMap::assoc`] and [`HamtMap::dissoc`] return a new
//!   map; every previously returned map keeps answering exactly as before
//! - **Structural sharing**: an update allocates only the nodes on its path
//!   and shares every sibling subtree through `Arc`
//! - **No locks**: nodes are never mutated after construction, so maps are
//!   `Send + Sync` and readers never wait on writers
//! - **Pluggable hashing**: the [`KeyHasher`] strategy is injected per map;
//!   the default [`TextHash`] only knows text keys and refuses the rest with
//!   [`Error::UnsupportedKey`]
//! - **Full collisions**: distinct keys with equal 32-bit hashes share a
//!   collision bucket instead of deepening the trie past the hash width
//!
//! # Example
//!
//! ```
//! use persistent_hamt::{HamtMap, Value};
//!
//! let empty: HamtMap<Value, Value> = HamtMap::new();
//! let one = empty.assoc("key".into(), Value::Int(42))?;
//! let two = one.assoc("key".into(), Value::Int(24))?;
//!
//! assert_eq!(one.find(&"key".into())?, Some(&Value::Int(42)));
//! assert_eq!(two.find(&"key".into())?, Some(&Value::Int(24)));
//! assert_eq!(empty.find(&"key".into())?, None);
//!
//! assert!(one.find(&Value::Int(7)).is_err());
//! # Ok::<(), persistent_hamt::Error>(())
//! ```
//!
//! # References
//!
//! - Bagwell, 2001 — "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod bits;
pub mod hash;
pub mod iter;

mod error;
mod map;
mod node;
mod ops;
mod value;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use hash::{HashSlot, KeyHasher, TextHash, hash, hash_text};
pub use map::HamtMap;
pub use value::Value;
