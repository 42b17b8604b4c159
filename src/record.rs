//! Catalog records and the store that owns them.

use serde::{Deserialize, Serialize};

use crate::config::SimilarityBasis;

/// Stable record identity: dense, 0-based, assigned by [`RecordStore::push`].
/// Doubles as the node index of the similarity graph.
pub type RecordId = usize;

/// An immutable catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub actors: Vec<String>,
    pub genres: Vec<String>,
}

impl Record {
    /// Whether the two records share an attribute value under `basis`.
    pub fn shares_attribute(&self, other: &Record, basis: SimilarityBasis) -> bool {
        let genres = || intersects(&self.genres, &other.genres);
        let actors = || intersects(&self.actors, &other.actors);
        match basis {
            SimilarityBasis::Genres => genres(),
            SimilarityBasis::Actors => actors(),
            SimilarityBasis::Any => genres() || actors(),
        }
    }
}

fn intersects(a: &[String], b: &[String]) -> bool {
    a.iter().any(|x| b.contains(x))
}

/// Record fields before an identity is assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub actors: Vec<String>,
    pub genres: Vec<String>,
}

impl NewRecord {
    pub fn new(title: impl Into<String>, year: i32, rating: f64) -> Self {
        Self {
            title: title.into(),
            year,
            rating,
            ..Default::default()
        }
    }

    /// Builder: add an actor
    pub fn actor(mut self, name: impl Into<String>) -> Self {
        self.actors.push(name.into());
        self
    }

    /// Builder: add a genre
    pub fn genre(mut self, name: impl Into<String>) -> Self {
        self.genres.push(name.into());
        self
    }
}

/// Owns every record for the life of the catalog. Grows during loading only.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under the next free identity and return it.
    pub fn push(&mut self, new: NewRecord) -> &Record {
        let id = self.records.len();
        self.records.push(Record {
            id,
            title: new.title,
            year: new.year,
            rating: new.rating,
            actors: new.actors,
            genres: new.genres,
        });
        &self.records[id]
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense() {
        let mut store = RecordStore::new();
        assert_eq!(store.push(NewRecord::new("A", 2000, 7.0)).id, 0);
        assert_eq!(store.push(NewRecord::new("B", 2001, 6.5)).id, 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).map(|r| r.title.as_str()), Some("B"));
        assert!(store.get(2).is_none());
    }

    #[test]
    fn test_shares_attribute() {
        let mut store = RecordStore::new();
        store.push(NewRecord::new("A", 2000, 7.0).genre("Drama").actor("X"));
        store.push(NewRecord::new("B", 2000, 7.0).genre("Comedy").actor("X"));
        let (a, b) = (&store.as_slice()[0], &store.as_slice()[1]);

        assert!(!a.shares_attribute(b, SimilarityBasis::Genres));
        assert!(a.shares_attribute(b, SimilarityBasis::Actors));
        assert!(a.shares_attribute(b, SimilarityBasis::Any));
    }
}
