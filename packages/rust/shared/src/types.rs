//! Core domain types for drilldown trees.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// Mapping from grouping key to the bucket of items that share it.
///
/// Keys carry no structural nesting: `"AB"` is a sibling of `"Z"`, not a
/// child of `"A"`. The hierarchy lives in the keys themselves and is left to
/// the consumer to interpret (see `drilldown_core::navigation`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "K: Serialize + Ord, T: Serialize",
    deserialize = "K: Deserialize<'de> + Ord, T: Deserialize<'de>"
))]
pub struct Tree<K, T> {
    buckets: BTreeMap<K, Vec<T>>,
}

impl<K: Ord, T> Tree<K, T> {
    /// Wrap an existing key-to-bucket mapping.
    pub fn from_buckets(buckets: BTreeMap<K, Vec<T>>) -> Self {
        Self { buckets }
    }

    /// The bucket stored under `key`, if any.
    pub fn get(&self, key: &K) -> Option<&[T]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the tree has no buckets at all.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of items across every bucket.
    pub fn item_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Bucket keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.keys()
    }

    /// `(key, bucket)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[T])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Consume the tree, returning the underlying mapping.
    pub fn into_inner(self) -> BTreeMap<K, Vec<T>> {
        self.buckets
    }
}

impl<K, T> IntoIterator for Tree<K, T> {
    type Item = (K, Vec<T>);
    type IntoIter = btree_map::IntoIter<K, Vec<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

// ---------------------------------------------------------------------------
// NavEntry
// ---------------------------------------------------------------------------

/// One node of the browsable hierarchy derived from a tree's string keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    /// Key prefix this node stands for.
    pub key: String,
    /// Items in this node's bucket plus all descendants' buckets.
    pub item_count: usize,
    /// Whether `key` is an actual bucket in the tree (as opposed to a
    /// synthetic grouping node).
    pub is_bucket: bool,
    /// Child nodes, ordered by key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree<String, u32> {
        let mut buckets = BTreeMap::new();
        buckets.insert("B".to_string(), vec![3]);
        buckets.insert("A".to_string(), vec![1, 2]);
        Tree::from_buckets(buckets)
    }

    #[test]
    fn accessors() {
        let tree = sample();
        assert_eq!(tree.len(), 2);
        assert!(!tree.is_empty());
        assert_eq!(tree.item_count(), 3);
        assert_eq!(tree.get(&"A".to_string()), Some(&[1, 2][..]));
        assert_eq!(tree.get(&"C".to_string()), None);
        let keys: Vec<_> = tree.keys().cloned().collect();
        assert_eq!(keys, ["A", "B"]);
    }

    #[test]
    fn serializes_as_plain_mapping() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(json, serde_json::json!({ "A": [1, 2], "B": [3] }));

        let back: Tree<String, u32> = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, sample());
    }

    #[test]
    fn nav_entry_omits_empty_children() {
        let entry = NavEntry {
            key: "Z".into(),
            item_count: 5,
            is_bucket: true,
            children: vec![],
        };
        let json = serde_json::to_string(&entry).expect("serialize");
        assert!(!json.contains("children"));
    }

    #[test]
    fn into_iter_yields_owned_buckets() {
        let pairs: Vec<_> = sample().into_iter().collect();
        assert_eq!(pairs[0], ("A".to_string(), vec![1, 2]));
        assert_eq!(pairs[1], ("B".to_string(), vec![3]));
    }
}
