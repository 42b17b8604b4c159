//! Multi-value attribute index (hash table with separate chaining)
//!
//! Maps an attribute value (actor name, genre) to every record id inserted
//! under it. The bucket count is fixed at construction; keys that collide in
//! a bucket are chained and told apart by exact string equality.

use crate::record::RecordId;

/// Seed of the multiplicative string hash.
const HASH_SEED: u64 = 5381;

/// `h = h * 33 + byte`, seeded at 5381, wrapping on overflow.
pub fn hash_key(key: &str) -> u64 {
    key.bytes().fold(HASH_SEED, |h, b| {
        (h << 5).wrapping_add(h).wrapping_add(u64::from(b))
    })
}

pub(crate) fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

#[derive(Debug, Clone)]
struct ChainEntry {
    key: String,
    records: Vec<RecordId>,
}

/// Chained hash table associating one key with many record ids.
#[derive(Debug, Clone)]
pub struct MultiValueIndex {
    buckets: Vec<Vec<ChainEntry>>,
    keys: usize,
    associations: usize,
}

impl MultiValueIndex {
    /// Create an index with `table_size` buckets.
    ///
    /// # Panics
    ///
    /// If `table_size` is zero.
    pub fn new(table_size: usize) -> Self {
        assert!(table_size > 0, "table size must be positive");
        if !is_prime(table_size) {
            tracing::warn!(table_size, "attribute table size is not prime; expect clustering");
        }
        Self {
            buckets: vec![Vec::new(); table_size],
            keys: 0,
            associations: 0,
        }
    }

    /// Bucket `key` hashes to.
    pub fn bucket_of(&self, key: &str) -> usize {
        (hash_key(key) % self.buckets.len() as u64) as usize
    }

    /// Associate `id` with `key`. Repeated pairs are kept, not deduplicated.
    pub fn insert(&mut self, key: &str, id: RecordId) {
        let bucket = self.bucket_of(key);
        let chain = &mut self.buckets[bucket];
        match chain.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.records.push(id),
            None => {
                chain.push(ChainEntry {
                    key: key.to_owned(),
                    records: vec![id],
                });
                self.keys += 1;
            }
        }
        self.associations += 1;
    }

    /// Every id inserted under `key`, most recent first; `None` if the key
    /// was never inserted.
    pub fn lookup_all(&self, key: &str) -> Option<impl ExactSizeIterator<Item = RecordId> + '_> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.records.iter().rev().copied())
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.keys
    }

    /// Total number of `(key, id)` associations.
    pub fn len(&self) -> usize {
        self.associations
    }

    pub fn is_empty(&self) -> bool {
        self.associations == 0
    }

    pub fn table_size(&self) -> usize {
        self.buckets.len()
    }

    /// Length of the longest collision chain.
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(index: &MultiValueIndex, key: &str) -> Option<Vec<RecordId>> {
        index.lookup_all(key).map(|ids| ids.collect())
    }

    #[test]
    fn test_hash_matches_djb2() {
        assert_eq!(hash_key(""), 5381);
        // 5381 * 33 + 'a'
        assert_eq!(hash_key("a"), 5381 * 33 + 97);
        assert_eq!(hash_key("ab"), (5381 * 33 + 97) * 33 + 98);
    }

    #[test]
    fn test_colliding_keys_are_chained() {
        // A single bucket forces every key into one chain.
        let mut index = MultiValueIndex::new(1);
        index.insert("Drama", 0);
        index.insert("Comedy", 1);
        index.insert("Drama", 2);

        assert_eq!(index.longest_chain(), 2);
        assert_eq!(ids(&index, "Drama"), Some(vec![2, 0]));
        assert_eq!(ids(&index, "Comedy"), Some(vec![1]));
        assert_eq!(ids(&index, "Horror"), None);
    }

    #[test]
    fn test_repeated_pairs_kept() {
        let mut index = MultiValueIndex::new(7);
        index.insert("X", 4);
        index.insert("X", 4);
        assert_eq!(ids(&index, "X"), Some(vec![4, 4]));
        assert_eq!(index.key_count(), 1);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut index = MultiValueIndex::new(11);
        index.insert("Tom Hanks", 0);
        assert!(index.lookup_all("Tom Hanks").is_some());
        assert!(index.lookup_all("tom hanks").is_none());
    }

    #[test]
    fn test_is_prime() {
        assert!(is_prime(10_007));
        assert!(is_prime(2));
        assert!(!is_prime(1));
        assert!(!is_prime(10_000));
    }
}
