//! Insert-or-update operation — copy-on-path with subtree sharing.

use std::sync::Arc;

use tracing::trace;

use crate::bits;
use crate::hash::HashSlot;
use crate::node::{Entry, Node};

/// Outcome of a recursive assoc.
pub struct AssocOutcome<K, V> {
    /// New root of the modified subtree.
    pub node: Arc<Node<K, V>>,
    /// `true` if a new key was added, `false` if an existing value was replaced.
    pub inserted: bool,
}

/// Associates `entry` in the subtree rooted at `node`, which sits at `level`.
///
/// `node` itself is left untouched; the returned subtree shares every child
/// not on the path to `entry`.
pub fn assoc_recursive<K, V>(
    node: &Arc<Node<K, V>>,
    entry: Entry<K, V>,
    level: u32,
) -> AssocOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    match node.as_ref() {
        Node::Terminal(own) => assoc_into_terminal(node, own, entry, level),
        Node::Branch { bitmap, children } => assoc_into_branch(*bitmap, children, entry, level),
        Node::Collision {
            hash: node_hash,
            entries,
        } => assoc_into_collision(node, *node_hash, entries, entry, level),
    }
}

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

fn assoc_into_terminal<K, V>(
    node: &Arc<Node<K, V>>,
    own: &Entry<K, V>,
    entry: Entry<K, V>,
    level: u32,
) -> AssocOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    if own.hash != entry.hash {
        let incoming_hash = entry.hash;
        return AssocOutcome {
            node: fork(
                Arc::clone(node),
                own.hash,
                Arc::new(Node::Terminal(entry)),
                incoming_hash,
                level,
            ),
            inserted: true,
        };
    }

    if own.key == entry.key {
        // Same key → fresh terminal carrying the new value.
        return AssocOutcome {
            node: Arc::new(Node::Terminal(entry)),
            inserted: false,
        };
    }

    trace!(hash = entry.hash, level, "full hash collision, forming bucket");
    AssocOutcome {
        node: Arc::new(Node::Collision {
            hash: entry.hash,
            entries: vec![own.clone(), entry],
        }),
        inserted: true,
    }
}

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

fn assoc_into_branch<K, V>(
    bitmap: u32,
    children: &[Arc<Node<K, V>>],
    entry: Entry<K, V>,
    level: u32,
) -> AssocOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    let slot = bits::slice(entry.hash, level);
    let pos = bits::compact_index(bitmap, slot);

    if bits::is_bit_set(bitmap, slot) {
        // Occupied → delegate one level down, share the other slots.
        let outcome = assoc_recursive(&children[pos], entry, level + 1);
        let mut new_children = children.to_vec();
        new_children[pos] = outcome.node;
        AssocOutcome {
            node: Arc::new(Node::Branch {
                bitmap,
                children: new_children,
            }),
            inserted: outcome.inserted,
        }
    } else {
        // Empty → fresh terminal in that slot.
        let mut new_children = Vec::with_capacity(children.len() + 1);
        new_children.extend_from_slice(&children[..pos]);
        new_children.push(Arc::new(Node::Terminal(entry)));
        new_children.extend_from_slice(&children[pos..]);
        AssocOutcome {
            node: Arc::new(Node::Branch {
                bitmap: bits::set_bit(bitmap, slot),
                children: new_children,
            }),
            inserted: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Collision bucket
// ---------------------------------------------------------------------------

fn assoc_into_collision<K, V>(
    node: &Arc<Node<K, V>>,
    node_hash: HashSlot,
    entries: &[Entry<K, V>],
    entry: Entry<K, V>,
    level: u32,
) -> AssocOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    if entry.hash != node_hash {
        let incoming_hash = entry.hash;
        return AssocOutcome {
            node: fork(
                Arc::clone(node),
                node_hash,
                Arc::new(Node::Terminal(entry)),
                incoming_hash,
                level,
            ),
            inserted: true,
        };
    }

    let mut new_entries = entries.to_vec();
    let inserted = if let Some(pos) = entries.iter().position(|e| e.key == entry.key) {
        new_entries[pos] = entry;
        false
    } else {
        new_entries.push(entry);
        true
    };
    AssocOutcome {
        node: Arc::new(Node::Collision {
            hash: node_hash,
            entries: new_entries,
        }),
        inserted,
    }
}

// ---------------------------------------------------------------------------
// Branch chain construction
// ---------------------------------------------------------------------------

/// Builds the branch chain separating two leaves with different hashes.
///
/// One branch per level starting at `level`, until the slices of the two
/// hashes differ; the deepest branch holds both leaves. Distinct 32-bit
/// hashes always differ by [`bits::MAX_LEVEL`], so the chain is bounded.
fn fork<K, V>(
    existing: Arc<Node<K, V>>,
    existing_hash: HashSlot,
    incoming: Arc<Node<K, V>>,
    incoming_hash: HashSlot,
    level: u32,
) -> Arc<Node<K, V>> {
    debug_assert_ne!(existing_hash, incoming_hash);
    debug_assert!(level <= bits::MAX_LEVEL, "hashes differ but share every slice");

    let existing_slot = bits::slice(existing_hash, level);
    let incoming_slot = bits::slice(incoming_hash, level);

    if existing_slot == incoming_slot {
        trace!(level, slot = existing_slot, "slices match, extending branch chain");
        let child = fork(existing, existing_hash, incoming, incoming_hash, level + 1);
        return Arc::new(Node::branch_of_one(existing_slot, child));
    }

    let children = if existing_slot < incoming_slot {
        vec![existing, incoming]
    } else {
        vec![incoming, existing]
    };
    Arc::new(Node::Branch {
        bitmap: bits::set_bit(bits::set_bit(0, existing_slot), incoming_slot),
        children,
    })
}
