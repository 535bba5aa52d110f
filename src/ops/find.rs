//! Lookup operation — walks one hash slice per level.

use crate::bits;
use crate::hash::HashSlot;
use crate::node::Node;

/// Searches for `key` in the subtree rooted at `node`, which sits at `level`.
///
/// Returns a reference to the value if found.
pub fn find_recursive<'a, K, V>(
    node: &'a Node<K, V>,
    hash: HashSlot,
    key: &K,
    level: u32,
) -> Option<&'a V>
where
    K: Eq,
{
    match node {
        // A terminal never recurses: it either is the key or the key is absent.
        Node::Terminal(entry) => {
            (entry.hash == hash && entry.key == *key).then_some(&entry.value)
        }
        Node::Branch { .. } => {
            let child = node.child(bits::slice(hash, level))?;
            find_recursive(child, hash, key, level + 1)
        }
        Node::Collision {
            hash: node_hash,
            entries,
        } => {
            if hash != *node_hash {
                return None;
            }
            entries
                .iter()
                .find(|entry| entry.key == *key)
                .map(|entry| &entry.value)
        }
    }
}
