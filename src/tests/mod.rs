mod persistence;

use crate::{HamtMap, HashSlot, Result};

/// Owned text key, hashed by the default strategy.
fn key(text: &str) -> String {
    text.to_owned()
}

/// Map whose hasher sends `"hello"` to `0` and every other key to `1024`.
///
/// The two hashes agree on the level-0 and level-1 slices and split at
/// level 2.
fn reference_collision_map()
-> HamtMap<String, i32, impl Fn(&String) -> Result<HashSlot>> {
    HamtMap::with_hasher(|key: &String| -> Result<HashSlot> {
        Ok(if key == "hello" { 0 } else { 1024 })
    })
}

/// Map whose hasher sends every key to the same hash.
fn constant_hash_map(
    hash: HashSlot,
) -> HamtMap<String, i32, impl Fn(&String) -> Result<HashSlot>> {
    HamtMap::with_hasher(move |_: &String| -> Result<HashSlot> { Ok(hash) })
}

/// Walks the trie under `map`, asserting every structural invariant, and
/// returns the number of entries found.
fn validate<K: Eq, V, H>(map: &HamtMap<K, V, H>) -> usize {
    let crate::node::Node::Branch { .. } = map.root() else {
        panic!("root must be a branch");
    };
    let count = validate_node(map.root(), 0, 0, true);
    assert_eq!(count, map.len(), "len must match reachable entries");
    count
}

fn validate_node<K: Eq, V>(
    node: &crate::node::Node<K, V>,
    level: u32,
    prefix: HashSlot,
    is_root: bool,
) -> usize {
    use crate::bits;
    use crate::node::Node;

    // Bits of the hash already consumed by the path to this node.
    let consumed = (level * bits::BITS_PER_LEVEL).min(HashSlot::BITS);
    let prefix_mask = HashSlot::MAX.checked_shr(HashSlot::BITS - consumed).unwrap_or(0);

    match node {
        Node::Terminal(entry) => {
            assert_eq!(entry.hash & prefix_mask, prefix, "terminal off its hash path");
            1
        }
        Node::Collision { hash, entries } => {
            assert_eq!(hash & prefix_mask, prefix, "bucket off its hash path");
            assert!(entries.len() >= 2, "bucket must hold at least two entries");
            for (i, entry) in entries.iter().enumerate() {
                assert_eq!(entry.hash, *hash, "bucket entry with foreign hash");
                assert!(
                    entries[i + 1..].iter().all(|other| other.key != entry.key),
                    "duplicate key in bucket"
                );
            }
            entries.len()
        }
        Node::Branch { bitmap, children } => {
            assert!(level <= bits::MAX_LEVEL, "branch below the hash width");
            assert_eq!(children.len(), bitmap.count_ones() as usize, "bitmap/children mismatch");
            if !is_root {
                assert!(!children.is_empty(), "empty inner branch");
                assert!(
                    children.len() > 1 || !children[0].is_leaf(),
                    "branch holding a lone leaf"
                );
            }
            (0..32)
                .filter(|&slot| bits::is_bit_set(*bitmap, slot))
                .map(|slot| {
                    let child = &children[bits::compact_index(*bitmap, slot)];
                    let child_prefix = prefix | (slot << (level * bits::BITS_PER_LEVEL));
                    validate_node(child, level + 1, child_prefix, false)
                })
                .sum()
        }
    }
}
