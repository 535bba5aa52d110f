use super::{constant_hash_map, key};
use crate::HamtMap;

/// Updating a map never changes what the original answers.
#[test]
fn original_unchanged_after_assoc() {
    let empty = HamtMap::new();
    let modified = empty.assoc(key("myKey"), 42).unwrap();
    let modified2 = modified.assoc(key("anotherKey"), 24).unwrap();

    assert_eq!(empty.find(&key("myKey")), Ok(None));
    assert_eq!(empty.find(&key("anotherKey")), Ok(None));
    assert_eq!(modified.find(&key("anotherKey")), Ok(None));
    assert_eq!(modified2.find(&key("anotherKey")), Ok(Some(&24)));
    assert_eq!(empty.len(), 0);
    assert_eq!(modified.len(), 1);
}

/// Overwriting keeps the intermediate version's value.
#[test]
fn overwrite_keeps_old_version() {
    let first = HamtMap::new().assoc(key("key"), 42).unwrap();
    let second = first.assoc(key("key"), 24).unwrap();

    assert_eq!(second.find(&key("key")), Ok(Some(&24)));
    assert_eq!(first.find(&key("key")), Ok(Some(&42)));
}

/// Branching history: two maps derived from one base evolve independently.
#[test]
fn divergent_versions() {
    let base = HamtMap::new()
        .assoc(key("shared"), 0)
        .unwrap();
    let left = base.assoc(key("left"), 1).unwrap();
    let right = base.assoc(key("right"), 2).unwrap().assoc(key("shared"), 9).unwrap();

    assert_eq!(base.find(&key("shared")), Ok(Some(&0)));
    assert_eq!(left.find(&key("shared")), Ok(Some(&0)));
    assert_eq!(right.find(&key("shared")), Ok(Some(&9)));
    assert_eq!(left.find(&key("right")), Ok(None));
    assert_eq!(right.find(&key("left")), Ok(None));
}

/// Every intermediate version of a long chain still answers as it did.
#[test]
fn history_of_versions() {
    let mut versions = vec![HamtMap::new()];
    for i in 0..200 {
        let next = versions[i].assoc(format!("k{i}"), i).unwrap();
        versions.push(next);
    }

    for (n, version) in versions.iter().enumerate() {
        assert_eq!(version.len(), n);
        for i in 0..200 {
            let expected = (i < n).then_some(&i);
            assert_eq!(version.find(&format!("k{i}")), Ok(expected), "version {n} key {i}");
        }
    }
}

/// Removal leaves earlier versions intact.
#[test]
fn original_unchanged_after_dissoc() {
    let full = HamtMap::new()
        .assoc(key("a"), 1)
        .unwrap()
        .assoc(key("b"), 2)
        .unwrap();
    let less = full.dissoc(&key("a")).unwrap();

    assert_eq!(less.find(&key("a")), Ok(None));
    assert_eq!(full.find(&key("a")), Ok(Some(&1)));
    assert_eq!(full.len(), 2);
    assert_eq!(less.len(), 1);
}

/// Collision buckets are copied, not edited, on overwrite and removal.
#[test]
fn collision_bucket_versions() {
    let two = constant_hash_map(5)
        .assoc(key("a"), 1)
        .unwrap()
        .assoc(key("b"), 2)
        .unwrap();
    let three = two.assoc(key("c"), 3).unwrap();
    let removed = three.dissoc(&key("a")).unwrap();

    assert_eq!(two.find(&key("c")), Ok(None));
    assert_eq!(three.find(&key("a")), Ok(Some(&1)));
    assert_eq!(removed.find(&key("a")), Ok(None));
    assert_eq!(removed.find(&key("c")), Ok(Some(&3)));
}

#[test]
fn clone_shares_root() {
    let map = HamtMap::new().assoc(key("a"), 1).unwrap();
    let copy = map.clone();
    assert!(map.ptr_eq(&copy));

    let updated = copy.assoc(key("b"), 2).unwrap();
    assert!(!map.ptr_eq(&updated));
    assert_eq!(map.find(&key("b")), Ok(None));
}
