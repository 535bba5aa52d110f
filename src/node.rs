//! Trie node types.

use std::fmt;
use std::sync::Arc;

use crate::bits;
use crate::hash::HashSlot;

/// A key-value pair with the hash it was inserted under.
#[derive(Clone)]
pub struct Entry<K, V> {
    /// Hash of `key` under the map's strategy.
    pub hash: HashSlot,
    /// The key.
    pub key: K,
    /// The value.
    pub value: V,
}

/// Trie node.
///
/// Nodes are never mutated once built. An update allocates new nodes along
/// the path it touches and shares every other subtree through `Arc`.
pub enum Node<K, V> {
    /// Leaf holding exactly one key.
    Terminal(Entry<K, V>),
    /// Interior node indexed by the hash slice at its level.
    ///
    /// Invariant: `children.len() == bitmap.count_ones()`, and the child for
    /// slot `i` sits at `bits::compact_index(bitmap, i)`.
    Branch {
        /// Bit `i` set ⇔ slot `i` is occupied.
        bitmap: u32,
        /// Occupied slots in ascending slot order.
        children: Vec<Arc<Self>>,
    },
    /// Leaf for distinct keys whose full hashes are equal.
    ///
    /// Invariant: `entries.len() >= 2`, every entry has hash `hash`.
    Collision {
        /// The shared hash.
        hash: HashSlot,
        /// The colliding entries, in insertion order.
        entries: Vec<Entry<K, V>>,
    },
}

impl<K, V> Node<K, V> {
    /// A branch with every slot empty.
    #[must_use]
    pub const fn empty_branch() -> Self {
        Self::Branch {
            bitmap: 0,
            children: Vec::new(),
        }
    }

    /// A branch with a single occupied slot.
    #[must_use]
    pub fn branch_of_one(slot: u32, child: Arc<Self>) -> Self {
        Self::Branch {
            bitmap: bits::set_bit(0, slot),
            children: vec![child],
        }
    }

    /// Returns the hash of a leaf, or `None` for a branch.
    #[must_use]
    pub const fn leaf_hash(&self) -> Option<HashSlot> {
        match self {
            Self::Terminal(entry) => Some(entry.hash),
            Self::Collision { hash, .. } => Some(*hash),
            Self::Branch { .. } => None,
        }
    }

    /// Returns `true` for terminals and collision buckets.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.leaf_hash().is_some()
    }

    /// Returns the child at `slot` of a branch, if occupied.
    #[must_use]
    pub fn child(&self, slot: u32) -> Option<&Arc<Self>> {
        match self {
            Self::Branch { bitmap, children } if bits::is_bit_set(*bitmap, slot) => {
                children.get(bits::compact_index(*bitmap, slot))
            }
            _ => None,
        }
    }
}

// Manual Debug: no `K: Debug, V: Debug` bounds, structure only.

impl<K, V> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(entry) => f
                .debug_struct("Terminal")
                .field("hash", &format_args!("{:#010x}", entry.hash))
                .finish_non_exhaustive(),
            Self::Branch { bitmap, children } => f
                .debug_struct("Branch")
                .field("bitmap", &format_args!("{bitmap:#034b}"))
                .field("children", children)
                .finish(),
            Self::Collision { hash, entries } => f
                .debug_struct("Collision")
                .field("hash", &format_args!("{hash:#010x}"))
                .field("entries_len", &entries.len())
                .finish(),
        }
    }
}
