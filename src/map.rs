//! The persistent map handle.

use std::fmt;
use std::sync::Arc;

use crate::bits;
use crate::error::Result;
use crate::hash::{KeyHasher, TextHash};
use crate::iter::Iter;
use crate::node::{Entry, Node};
use crate::ops::assoc::assoc_recursive;
use crate::ops::dissoc::{DissocOutcome, dissoc_recursive};
use crate::ops::find::find_recursive;

/// Persistent hash map over a 32-way trie of 5-bit hash slices.
///
/// Every update returns a new map and leaves the receiver untouched; the two
/// versions share all subtrees off the updated path. Cloning a map is one
/// reference-count bump.
///
/// The hash strategy `H` is fixed when the map is created and inherited by
/// every version derived from it. A hashing failure is surfaced as
/// [`Error::UnsupportedKey`](crate::Error::UnsupportedKey); no key is ever
/// addressed under a substitute hash.
pub struct HamtMap<K, V, H = TextHash> {
    root: Arc<Node<K, V>>,
    hasher: Arc<H>,
    size: usize,
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<K, V> HamtMap<K, V> {
    /// Creates an empty map using the default [`TextHash`] strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(TextHash)
    }
}

impl<K, V, H> HamtMap<K, V, H> {
    /// Creates an empty map that hashes keys with `hasher`.
    #[must_use]
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            root: Arc::new(Node::empty_branch()),
            hasher: Arc::new(hasher),
            size: 0,
        }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the hash strategy of this map.
    #[must_use]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns `true` if both maps share the same root node.
    ///
    /// Sharing implies equal contents; distinct roots say nothing.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    /// Returns an iterator over `(&K, &V)` pairs in trie order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.size)
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Node<K, V> {
        &self.root
    }

    /// Wraps a new root, sharing this map's hasher.
    fn derive(&self, root: Arc<Node<K, V>>, size: usize) -> Self {
        Self {
            root,
            hasher: Arc::clone(&self.hasher),
            size,
        }
    }
}

// ---------------------------------------------------------------------------
// Read operations — K: Eq
// ---------------------------------------------------------------------------

impl<K: Eq, V, H: KeyHasher<K>> HamtMap<K, V, H> {
    /// Returns a reference to the value associated with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedKey`](crate::Error::UnsupportedKey) if the
    /// hash strategy rejects `key`.
    pub fn find(&self, key: &K) -> Result<Option<&V>> {
        let hash = self.hasher.hash_key(key)?;
        Ok(find_recursive(&self.root, hash, key, 0))
    }

    /// Returns `true` if the map contains `key`.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find).
    pub fn contains_key(&self, key: &K) -> Result<bool> {
        self.find(key).map(|found| found.is_some())
    }
}

// ---------------------------------------------------------------------------
// Write operations — K: Eq + Clone, V: Clone
// ---------------------------------------------------------------------------

impl<K: Eq + Clone, V: Clone, H: KeyHasher<K>> HamtMap<K, V, H> {
    /// Returns a new map with `key` bound to `value`.
    ///
    /// Replaces the value if `key` is already present. `self` is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedKey`](crate::Error::UnsupportedKey) if the
    /// hash strategy rejects `key`.
    pub fn assoc(&self, key: K, value: V) -> Result<Self> {
        let hash = self.hasher.hash_key(&key)?;
        let outcome = assoc_recursive(&self.root, Entry { hash, key, value }, 0);
        let size = if outcome.inserted {
            self.size + 1
        } else {
            self.size
        };
        Ok(self.derive(outcome.node, size))
    }

    /// Returns a new map without `key`. `self` is unchanged.
    ///
    /// If `key` is absent the result shares this map's root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedKey`](crate::Error::UnsupportedKey) if the
    /// hash strategy rejects `key`.
    pub fn dissoc(&self, key: &K) -> Result<Self> {
        let hash = self.hasher.hash_key(key)?;
        match dissoc_recursive(&self.root, hash, key, 0) {
            DissocOutcome::NotFound => Ok(self.clone()),
            DissocOutcome::Removed { node } => {
                Ok(self.derive(into_root(node), self.size - 1))
            }
        }
    }

    /// Associates every pair in order, stopping at the first hashing error.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`assoc`](Self::assoc).
    pub fn assoc_all<I>(&self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .try_fold(self.clone(), |map, (key, value)| map.assoc(key, value))
    }
}

/// Keeps the root a branch after a removal shrank it.
fn into_root<K, V>(node: Option<Arc<Node<K, V>>>) -> Arc<Node<K, V>> {
    match node {
        None => Arc::new(Node::empty_branch()),
        Some(node) => match node.leaf_hash() {
            Some(hash) => Arc::new(Node::branch_of_one(bits::slice(hash, 0), node)),
            None => node,
        },
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V, H> Clone for HamtMap<K, V, H> {
    fn clone(&self) -> Self {
        self.derive(Arc::clone(&self.root), self.size)
    }
}

impl<K, V, H: Default> Default for HamtMap<K, V, H> {
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

impl<K, V, H> fmt::Debug for HamtMap<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HamtMap")
            .field("len", &self.size)
            .finish_non_exhaustive()
    }
}

impl<'a, K, V, H> IntoIterator for &'a HamtMap<K, V, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
