use nexus_catalog::core::chained::{hash_key, MultiValueIndex};
use nexus_catalog::RecordId;

fn ids(index: &MultiValueIndex, key: &str) -> Option<Vec<RecordId>> {
    index.lookup_all(key).map(|ids| ids.collect())
}

#[test]
fn test_two_records_under_one_actor() {
    let mut index = MultiValueIndex::new(10_007);
    index.insert("X", 1);
    index.insert("X", 2);

    let hits: Vec<_> = index.lookup_all("X").expect("X was inserted").collect();
    assert_eq!(hits, [2, 1], "Most recent insert comes first");
}

#[test]
fn test_record_under_many_keys() {
    let mut index = MultiValueIndex::new(10_007);
    for key in ["Tom Hanks", "Meg Ryan", "Bill Pullman"] {
        index.insert(key, 7);
    }
    index.insert("Tom Hanks", 9);

    assert_eq!(ids(&index, "Tom Hanks"), Some(vec![9, 7]));
    assert_eq!(ids(&index, "Meg Ryan"), Some(vec![7]));
    assert_eq!(index.key_count(), 3);
    assert_eq!(index.len(), 4);
}

#[test]
fn test_absent_key_is_none() {
    let index = MultiValueIndex::new(10_007);
    assert!(index.lookup_all("Nobody").is_none());
    assert!(index.is_empty());
}

#[test]
fn test_completeness_across_collisions() {
    // Tiny prime table: 500 keys must share 13 buckets.
    let mut index = MultiValueIndex::new(13);
    for id in 0..2000 {
        index.insert(&format!("actor-{}", id % 500), id);
    }

    assert_eq!(index.key_count(), 500);
    assert!(index.longest_chain() > 1, "Keys should collide in a 13-bucket table");
    for k in 0..500 {
        let expected: Vec<usize> = (0..2000).rev().filter(|id| id % 500 == k).collect();
        let key = format!("actor-{k}");
        assert_eq!(ids(&index, &key), Some(expected), "key {key}");
    }
}

#[test]
fn test_bucket_follows_hash() {
    let index = MultiValueIndex::new(10_007);
    let key = "Morgan Freeman";
    assert_eq!(index.bucket_of(key) as u64, hash_key(key) % 10_007);
    assert!(index.bucket_of(key) < index.table_size());
}
