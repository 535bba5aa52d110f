//! Recursive trie algorithms shared by every map operation.

pub mod assoc;
pub mod dissoc;
pub mod find;
