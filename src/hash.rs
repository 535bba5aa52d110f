//! Key hashing: the default textual hash and the pluggable strategy trait.
//!
//! The default accumulator walks the characters of a text key:
//! `acc = a · acc · level + code(c)`, then `a = a · b`, starting from
//! `acc = 0`, `a = 31415`, `b = 27183`, all arithmetic wrapping at 32 bits.

use tracing::debug;

use crate::error::{Error, Result};
use crate::value::Value;

/// 32-bit hash of a key; the trie consumes it 5 bits per level.
pub type HashSlot = u32;

/// Initial multiplier of the text accumulator.
const SEED_A: HashSlot = 31_415;

/// Per-character factor applied to the multiplier.
const SEED_B: HashSlot = 27_183;

/// Level passed to [`hash_text`] when hashing a top-level key.
const KEY_LEVEL: u32 = 1;

/// Hashes `text` with the deterministic accumulator.
///
/// Order-sensitive: permutations of the same characters generally hash
/// differently.
#[must_use]
pub fn hash_text(text: &str, level: u32) -> HashSlot {
    let mut acc: HashSlot = 0;
    let mut a = SEED_A;
    for c in text.chars() {
        acc = a
            .wrapping_mul(acc)
            .wrapping_mul(level)
            .wrapping_add(HashSlot::from(c));
        a = a.wrapping_mul(SEED_B);
    }
    acc
}

/// Hashes a [`Value`] with the default strategy.
///
/// # Errors
///
/// Returns [`Error::UnsupportedKey`] for anything but [`Value::Text`].
pub fn hash(value: &Value) -> Result<HashSlot> {
    match value {
        Value::Text(text) => Ok(hash_text(text, KEY_LEVEL)),
        other => {
            debug!(kind = other.kind(), "refusing to hash unsupported key kind");
            Err(Error::UnsupportedKey { kind: other.kind() })
        }
    }
}

/// Strategy mapping a key to its [`HashSlot`].
///
/// A map is built with one strategy and keeps it for every version derived
/// from it. Any `Fn(&K) -> Result<HashSlot>` closure is a strategy, which is
/// how colliding hash functions are injected in tests.
pub trait KeyHasher<K: ?Sized> {
    /// Hashes `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedKey`] if the strategy cannot hash `key`.
    fn hash_key(&self, key: &K) -> Result<HashSlot>;
}

impl<K: ?Sized, F> KeyHasher<K> for F
where
    F: Fn(&K) -> Result<HashSlot>,
{
    fn hash_key(&self, key: &K) -> Result<HashSlot> {
        self(key)
    }
}

/// Default strategy: the text accumulator, text keys only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextHash;

impl KeyHasher<Value> for TextHash {
    fn hash_key(&self, key: &Value) -> Result<HashSlot> {
        hash(key)
    }
}

impl KeyHasher<str> for TextHash {
    fn hash_key(&self, key: &str) -> Result<HashSlot> {
        Ok(hash_text(key, KEY_LEVEL))
    }
}

impl KeyHasher<String> for TextHash {
    fn hash_key(&self, key: &String) -> Result<HashSlot> {
        Ok(hash_text(key, KEY_LEVEL))
    }
}

impl KeyHasher<&str> for TextHash {
    fn hash_key(&self, key: &&str) -> Result<HashSlot> {
        Ok(hash_text(key, KEY_LEVEL))
    }
}
