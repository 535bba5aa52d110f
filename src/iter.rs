//! Iterator over the entries of a [`HamtMap`](crate::HamtMap).

use crate::node::{Entry, Node};

/// Iterator over references to key-value pairs, in trie order.
///
/// Walks the trie depth-first with an explicit stack; at most one frame per
/// level is live, so no allocation grows with the map size.
pub struct Iter<'a, K, V> {
    stack: Vec<std::slice::Iter<'a, std::sync::Arc<Node<K, V>>>>,
    bucket: std::slice::Iter<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Creates an iterator over the subtree at `root` holding `len` entries.
    pub(crate) fn new(root: &'a Node<K, V>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            bucket: std::slice::Iter::default(),
            remaining: len,
        };
        iter.enter(root);
        iter
    }

    /// Positions the iterator at `node`: branches push a frame, leaves load
    /// their entries.
    fn enter(&mut self, node: &'a Node<K, V>) {
        match node {
            Node::Terminal(entry) => self.bucket = std::slice::from_ref(entry).iter(),
            Node::Branch { children, .. } => self.stack.push(children.iter()),
            Node::Collision { entries, .. } => self.bucket = entries.iter(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.bucket.next() {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&entry.key, &entry.value));
            }
            let frame = self.stack.last_mut()?;
            match frame.next() {
                Some(child) => self.enter(child),
                None => {
                    self.stack.pop();
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> std::iter::FusedIterator for Iter<'_, K, V> {}
