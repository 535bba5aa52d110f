//! Removal operation — copy-on-path delete that shrinks emptied branches.

use std::sync::Arc;

use tracing::trace;

use crate::bits;
use crate::hash::HashSlot;
use crate::node::{Entry, Node};

/// Outcome of a recursive dissoc.
pub enum DissocOutcome<K, V> {
    /// Key was not found — subtree unchanged.
    NotFound,
    /// Key was removed.
    Removed {
        /// New root of the modified subtree, or `None` if it is now empty.
        node: Option<Arc<Node<K, V>>>,
    },
}

/// Removes `key` from the subtree rooted at `node`, which sits at `level`.
pub fn dissoc_recursive<K, V>(
    node: &Node<K, V>,
    hash: HashSlot,
    key: &K,
    level: u32,
) -> DissocOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    match node {
        Node::Terminal(own) => {
            if own.hash == hash && own.key == *key {
                DissocOutcome::Removed { node: None }
            } else {
                DissocOutcome::NotFound
            }
        }
        Node::Branch { bitmap, children } => {
            dissoc_from_branch(*bitmap, children, hash, key, level)
        }
        Node::Collision {
            hash: node_hash,
            entries,
        } => dissoc_from_collision(*node_hash, entries, hash, key),
    }
}

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

fn dissoc_from_branch<K, V>(
    bitmap: u32,
    children: &[Arc<Node<K, V>>],
    hash: HashSlot,
    key: &K,
    level: u32,
) -> DissocOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    let slot = bits::slice(hash, level);
    if !bits::is_bit_set(bitmap, slot) {
        return DissocOutcome::NotFound;
    }
    let pos = bits::compact_index(bitmap, slot);

    let new_child = match dissoc_recursive(&children[pos], hash, key, level + 1) {
        DissocOutcome::NotFound => return DissocOutcome::NotFound,
        DissocOutcome::Removed { node } => node,
    };

    let (new_bitmap, new_children) = if let Some(child) = new_child {
        let mut replaced = children.to_vec();
        replaced[pos] = child;
        (bitmap, replaced)
    } else {
        let mut shrunk = children.to_vec();
        shrunk.remove(pos);
        (bits::clear_bit(bitmap, slot), shrunk)
    };

    DissocOutcome::Removed {
        node: shrink(new_bitmap, new_children),
    }
}

/// Builds the replacement for a branch after one of its slots changed.
///
/// An empty branch vanishes, and a branch whose only child is a leaf is
/// replaced by that leaf: leaves match on the full hash, so they stay
/// reachable one level higher.
fn shrink<K, V>(bitmap: u32, mut children: Vec<Arc<Node<K, V>>>) -> Option<Arc<Node<K, V>>> {
    match children.len() {
        0 => None,
        1 if children[0].is_leaf() => {
            trace!("pulling lone leaf up into parent slot");
            children.pop()
        }
        _ => Some(Arc::new(Node::Branch { bitmap, children })),
    }
}

// ---------------------------------------------------------------------------
// Collision bucket
// ---------------------------------------------------------------------------

fn dissoc_from_collision<K, V>(
    node_hash: HashSlot,
    entries: &[Entry<K, V>],
    hash: HashSlot,
    key: &K,
) -> DissocOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    if hash != node_hash {
        return DissocOutcome::NotFound;
    }
    let Some(pos) = entries.iter().position(|e| e.key == *key) else {
        return DissocOutcome::NotFound;
    };

    let mut remaining = entries.to_vec();
    remaining.remove(pos);

    // A bucket of one is just a terminal.
    let node = if remaining.len() == 1 {
        remaining.pop().map(Node::Terminal)
    } else {
        Some(Node::Collision {
            hash: node_hash,
            entries: remaining,
        })
    };
    DissocOutcome::Removed {
        node: node.map(Arc::new),
    }
}
