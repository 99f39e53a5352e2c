//! Navigation view builder.
//!
//! A [`Tree`] keeps its buckets flat: `"AA"`, `"AB"` and `"Z"` are siblings.
//! For prefix-style keys the hierarchy a user browses ("A", then "AA") is
//! implied by the keys themselves. This module materializes it as nested
//! [`NavEntry`] nodes, adding a grouping node for every proper prefix that
//! is not a bucket of its own.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument};

use drilldown_shared::{NavEntry, Tree};

use crate::key::truncate_chars;

/// Build the browsable hierarchy for a tree with string prefix keys.
///
/// Top-level entries are the one-character prefixes (and the empty key, if
/// it is a bucket). Each entry's `item_count` covers its own bucket and
/// everything below it. Entries are ordered by key at every level.
#[instrument(skip_all, fields(bucket_count = tree.len()))]
pub fn build_navigation<T>(tree: &Tree<String, T>) -> Vec<NavEntry> {
    let own: BTreeMap<&str, usize> = tree.iter().map(|(k, b)| (k.as_str(), b.len())).collect();

    let mut roots: BTreeSet<String> = BTreeSet::new();
    let mut children: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for key in tree.keys() {
        let mut node = key.clone();
        loop {
            match parent_key(&node) {
                None => {
                    roots.insert(node);
                    break;
                }
                Some(parent) => {
                    // Already linked means every ancestor is too.
                    if !children.entry(parent.clone()).or_default().insert(node) {
                        break;
                    }
                    node = parent;
                }
            }
        }
    }

    let entries: Vec<NavEntry> = roots
        .into_iter()
        .map(|key| build_entry(key, &own, &mut children))
        .collect();

    debug!(top_level = entries.len(), "navigation built");
    entries
}

/// Find the entry for `key` by walking down from the top level.
pub fn find_entry<'a>(entries: &'a [NavEntry], key: &str) -> Option<&'a NavEntry> {
    let mut level = entries;
    loop {
        let entry = level
            .iter()
            .find(|e| e.key == key || (!e.key.is_empty() && key.starts_with(e.key.as_str())))?;
        if entry.key == key {
            return Some(entry);
        }
        level = &entry.children;
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Key one character shorter, or `None` at the top level.
fn parent_key(key: &str) -> Option<String> {
    let len = key.chars().count();
    if len <= 1 {
        return None;
    }
    Some(truncate_chars(key, len - 1))
}

fn build_entry(
    key: String,
    own: &BTreeMap<&str, usize>,
    children: &mut BTreeMap<String, BTreeSet<String>>,
) -> NavEntry {
    let kids: Vec<NavEntry> = children
        .remove(&key)
        .unwrap_or_default()
        .into_iter()
        .map(|child| build_entry(child, own, children))
        .collect();

    let own_count = own.get(key.as_str()).copied();
    let below: usize = kids.iter().map(|c| c.item_count).sum();

    NavEntry {
        item_count: own_count.unwrap_or(0) + below,
        is_bucket: own_count.is_some(),
        key,
        children: kids,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use crate::builder::Drilldown;

    fn tree_of(buckets: &[(&str, usize)]) -> Tree<String, usize> {
        Tree::from_buckets(
            buckets
                .iter()
                .map(|(k, n)| (k.to_string(), (0..*n).collect()))
                .collect(),
        )
    }

    #[test]
    fn groups_buckets_under_synthetic_prefixes() {
        let nav = build_navigation(&tree_of(&[("AA", 16), ("AB", 12), ("Z", 5)]));

        assert_eq!(nav.len(), 2);
        let a = &nav[0];
        assert_eq!(a.key, "A");
        assert!(!a.is_bucket);
        assert_eq!(a.item_count, 28);
        let child_keys: Vec<_> = a.children.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(child_keys, ["AA", "AB"]);

        let z = &nav[1];
        assert_eq!(z.key, "Z");
        assert!(z.is_bucket);
        assert_eq!(z.item_count, 5);
        assert!(z.children.is_empty());
    }

    #[test]
    fn fills_every_missing_ancestor() {
        let nav = build_navigation(&tree_of(&[("ABCD", 3)]));
        let mut keys = Vec::new();
        let mut level = &nav;
        while let [only] = level.as_slice() {
            keys.push(only.key.clone());
            assert_eq!(only.item_count, 3);
            level = &only.children;
        }
        assert_eq!(keys, ["A", "AB", "ABC", "ABCD"]);
    }

    #[test]
    fn bucket_with_children_counts_both() {
        let nav = build_navigation(&tree_of(&[("A", 1), ("AB", 4), ("AC", 2)]));
        assert_eq!(nav.len(), 1);
        assert!(nav[0].is_bucket);
        assert_eq!(nav[0].item_count, 7);
        assert_eq!(nav[0].children.len(), 2);
    }

    #[test]
    fn empty_key_is_a_top_level_entry() {
        let nav = build_navigation(&tree_of(&[("", 0)]));
        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].key, "");
        assert!(nav[0].is_bucket);
        assert_eq!(nav[0].item_count, 0);
    }

    #[test]
    fn multibyte_prefixes() {
        let nav = build_navigation(&tree_of(&[("日本", 2), ("日米", 1)]));
        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].key, "日");
        assert_eq!(nav[0].item_count, 3);
    }

    #[test]
    fn find_entry_walks_prefixes() {
        let nav = build_navigation(&tree_of(&[("", 1), ("AAK", 2), ("AAR", 3), ("B", 1)]));
        assert_eq!(find_entry(&nav, "AA").map(|e| e.item_count), Some(5));
        assert_eq!(find_entry(&nav, "AAR").map(|e| e.is_bucket), Some(true));
        assert_eq!(find_entry(&nav, "").map(|e| e.item_count), Some(1));
        assert_eq!(find_entry(&nav, "B").map(|e| e.key.as_str()), Some("B"));
        assert!(find_entry(&nav, "AAX").is_none());
        assert!(find_entry(&nav, "C").is_none());
    }

    #[test]
    fn navigation_of_generated_tree() {
        let names = ["ALPHA", "ALTO", "AMBER", "AMEN", "BETA"];
        let tree = Drilldown::with_config(&[2], 8).unwrap().generate_strings(names);
        let nav = build_navigation(&tree);

        let total: usize = nav.iter().map(|e| e.item_count).sum();
        assert_eq!(total, names.len());
        assert_eq!(find_entry(&nav, "A").map(|e| e.item_count), Some(4));
    }
}
