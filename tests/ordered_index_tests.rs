use nexus_catalog::core::OrderedIndex;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[test]
fn test_three_inserts_rotate_median_to_root() {
    let mut index = OrderedIndex::new();
    index.insert("Beta", 0);
    index.insert("Alpha", 1);
    index.insert("Gamma", 2);

    assert_eq!(index.root_key(), Some("Beta"));
    assert_eq!(
        index.keys().collect::<Vec<_>>(),
        ["Alpha", "Beta", "Gamma"],
        "In-order traversal should be ascending"
    );
}

#[test]
fn test_search_missing_title_leaves_tree_unchanged() {
    let mut index = OrderedIndex::new();
    for (i, title) in ["Heat", "Up", "Alien", "Jaws"].iter().enumerate() {
        index.insert(title, i);
    }
    let before: Vec<(String, usize)> = index.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    let root = index.root_key().map(str::to_string);

    assert!(index.search("Nonexistent Title").is_none());

    let after: Vec<(String, usize)> = index.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    assert_eq!(before, after);
    assert_eq!(index.root_key().map(str::to_string), root);
    assert_eq!(index.len(), 4);
}

#[test]
fn test_remove_absent_is_noop() {
    let mut index = OrderedIndex::new();
    index.insert("Heat", 1);
    assert_eq!(index.remove("Up"), None);
    assert_eq!(index.len(), 1);
    assert_eq!(index.search("Heat"), Some(&1));
}

#[test]
fn test_empty_index() {
    let mut index: OrderedIndex<usize> = OrderedIndex::new();
    assert!(index.is_empty());
    assert_eq!(index.height(), 0);
    assert_eq!(index.root_key(), None);
    assert_eq!(index.remove("anything"), None);
    assert!(index.is_balanced());
}

#[derive(Debug, Clone)]
enum Op {
    Insert(String),
    Remove(String),
}

fn op() -> impl Strategy<Value = Op> {
    // Small alphabet so removals often hit existing keys.
    prop_oneof![
        3 => "[a-f]{1,3}".prop_map(Op::Insert),
        2 => "[a-f]{1,3}".prop_map(Op::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: any mix of inserts and removals keeps every node balanced
    /// and the keys strictly ascending, matching a reference map.
    #[test]
    fn prop_matches_btreemap(ops in prop::collection::vec(op(), 0..120)) {
        let mut index = OrderedIndex::new();
        let mut reference: BTreeMap<String, usize> = BTreeMap::new();

        for (step, op) in ops.iter().enumerate() {
            match op {
                Op::Insert(key) => {
                    let fresh = !reference.contains_key(key);
                    if fresh {
                        reference.insert(key.clone(), step);
                    }
                    prop_assert_eq!(index.insert(key, step), fresh);
                }
                Op::Remove(key) => {
                    prop_assert_eq!(index.remove(key), reference.remove(key));
                }
            }
            prop_assert!(index.is_balanced());
        }

        let keys: Vec<&str> = index.keys().collect();
        let expected: Vec<&str> = reference.keys().map(String::as_str).collect();
        prop_assert_eq!(keys, expected);
        prop_assert_eq!(index.len(), reference.len());
    }

    /// Property: every inserted key is found with its first value, and keys
    /// never inserted are absent.
    #[test]
    fn prop_round_trip_lookup(
        keys in prop::collection::vec("[a-z]{1,6}", 1..80),
        probe in "[A-Z]{1,6}"
    ) {
        let mut index = OrderedIndex::new();
        let mut first: BTreeMap<&str, usize> = BTreeMap::new();
        for (i, key) in keys.iter().enumerate() {
            index.insert(key, i);
            first.entry(key.as_str()).or_insert(i);
        }

        for (key, value) in &first {
            prop_assert_eq!(index.search(key), Some(value));
        }
        prop_assert!(index.search(&probe).is_none());

        // AVL height bound: h < 1.45 * log2(n + 2)
        let bound = 1.45 * ((index.len() + 2) as f64).log2();
        prop_assert!((index.height() as f64) < bound);
    }
}
