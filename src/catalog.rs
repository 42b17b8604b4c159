//! Catalog facade tying the record store to its indexes.
//!
//! Loading and querying are separate phases with separate types:
//!
//! 1. [`CatalogBuilder`] receives records one by one and keeps the title and
//!    attribute indexes current as they arrive.
//! 2. [`CatalogBuilder::finish`] builds the similarity graph once, sized to
//!    the final record count, and yields a [`Catalog`].
//! 3. [`Catalog`] answers lookups and traversal queries. Apart from
//!    [`Catalog::remove_title`] it is read-only.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::core::graph::window_edges;
use crate::core::traversal;
use crate::core::{MultiValueIndex, OrderedIndex, SimilarityGraph};
use crate::error::{CatalogError, CatalogResult};
use crate::record::{NewRecord, Record, RecordId, RecordStore};

/// Secondary attribute indexed for multi-value lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Actor,
    Genre,
}

/// Load phase: accumulates records and their index entries.
#[derive(Debug)]
pub struct CatalogBuilder {
    config: CatalogConfig,
    store: RecordStore,
    titles: OrderedIndex<RecordId>,
    actors: MultiValueIndex,
    genres: MultiValueIndex,
}

impl CatalogBuilder {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            store: RecordStore::new(),
            titles: OrderedIndex::new(),
            actors: MultiValueIndex::new(config.table_size),
            genres: MultiValueIndex::new(config.table_size),
            config,
        }
    }

    /// Store a record and index it by title, by each actor and by each genre.
    ///
    /// The title must be non-empty. A record whose title is already indexed
    /// is still stored and attribute-indexed, but title lookup keeps
    /// returning the first record.
    pub fn index_record(&mut self, record: NewRecord) -> RecordId {
        debug_assert!(!record.title.is_empty(), "record titles must be non-empty");

        let stored = self.store.push(record);
        let id = stored.id;

        if !self.titles.insert(&stored.title, id) {
            debug!(title = %stored.title, id, "duplicate title; lookup keeps first record");
        }
        for actor in &stored.actors {
            self.actors.insert(actor, id);
        }
        for genre in &stored.genres {
            self.genres.insert(genre, id);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        self.store.as_slice()
    }

    /// Build the similarity graph from windowed attribute comparisons.
    pub fn finish(self) -> Catalog {
        let edges = window_edges(
            self.store.as_slice(),
            self.config.neighborhood_window,
            self.config.similarity,
            self.config.parallel_graph_build,
        );
        self.finish_with_edges(edges)
    }

    /// Build the similarity graph from caller-supplied edges.
    ///
    /// # Panics
    ///
    /// If an edge names an id outside `0..len()`.
    pub fn finish_with_edges<I>(self, edges: I) -> Catalog
    where
        I: IntoIterator<Item = (RecordId, RecordId)>,
    {
        let graph = SimilarityGraph::from_edges(self.store.len(), edges);
        info!(
            records = self.store.len(),
            edges = graph.edge_count(),
            "similarity graph built"
        );

        Catalog {
            config: self.config,
            store: self.store,
            titles: self.titles,
            actors: self.actors,
            genres: self.genres,
            graph,
        }
    }
}

/// Summary of catalog contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Records in the store, including ones removed from the title index
    pub records: usize,
    /// Titles currently resolvable
    pub titles: usize,
    /// Height of the title tree
    pub title_tree_height: usize,
    /// Distinct actor keys
    pub actors: usize,
    /// Distinct genre keys
    pub genres: usize,
    /// Longest collision chain across both attribute tables
    pub longest_chain: usize,
    /// Similarity edges, parallel edges included
    pub edges: usize,
    /// Average degree (edges per node)
    pub avg_degree: f64,
}

/// Query phase: immutable record set with title, attribute and graph indexes.
#[derive(Debug)]
pub struct Catalog {
    config: CatalogConfig,
    store: RecordStore,
    titles: OrderedIndex<RecordId>,
    actors: MultiValueIndex,
    genres: MultiValueIndex,
    graph: SimilarityGraph,
}

impl Catalog {
    /// Record by identity, whether or not its title is still indexed.
    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn graph(&self) -> &SimilarityGraph {
        &self.graph
    }

    /// Exact title lookup.
    pub fn find_by_title(&self, title: &str) -> Option<&Record> {
        self.titles.search(title).and_then(|&id| self.store.get(id))
    }

    /// Every record indexed under `key` for the given attribute; `None` if
    /// the key is unknown.
    pub fn find_by_attribute(&self, attribute: Attribute, key: &str) -> Option<Vec<&Record>> {
        let index = match attribute {
            Attribute::Actor => &self.actors,
            Attribute::Genre => &self.genres,
        };
        index.lookup_all(key).map(|ids| self.resolve(ids))
    }

    pub fn find_by_actor(&self, name: &str) -> Option<Vec<&Record>> {
        self.find_by_attribute(Attribute::Actor, name)
    }

    pub fn find_by_genre(&self, name: &str) -> Option<Vec<&Record>> {
        self.find_by_attribute(Attribute::Genre, name)
    }

    /// Up to `recommendation_limit` records reachable from `id`, nearest
    /// first.
    ///
    /// # Panics
    ///
    /// If `id` is not a record of this catalog.
    pub fn recommend(&self, id: RecordId) -> Vec<&Record> {
        let ids = traversal::recommend(&self.graph, id, self.config.recommendation_limit);
        debug!(id, found = ids.len(), "recommendations");
        self.resolve(ids)
    }

    /// Fewest-edges chain of records from `from` to `to`, both inclusive.
    ///
    /// # Panics
    ///
    /// If either id is not a record of this catalog.
    pub fn shortest_path(&self, from: RecordId, to: RecordId) -> CatalogResult<Vec<&Record>> {
        match traversal::shortest_path(&self.graph, from, to) {
            Some(path) => Ok(self.resolve(path)),
            None => Err(CatalogError::Disconnected {
                from: self.title_of(from),
                to: self.title_of(to),
            }),
        }
    }

    /// Recommendations for the record currently indexed under `title`.
    pub fn recommend_for_title(&self, title: &str) -> CatalogResult<Vec<&Record>> {
        let record = self.require_title(title)?;
        Ok(self.recommend(record.id))
    }

    /// Shortest path between the records indexed under two titles.
    pub fn path_between_titles(&self, from: &str, to: &str) -> CatalogResult<Vec<&Record>> {
        let source = self.require_title(from)?;
        let target = self.require_title(to)?;
        self.shortest_path(source.id, target.id)
    }

    /// Remove `title` from the title index.
    ///
    /// The record stays in the store, the attribute indexes and the
    /// similarity graph, so attribute lookups and traversals can still
    /// return it.
    pub fn remove_title(&mut self, title: &str) -> Option<RecordId> {
        let id = self.titles.remove(title)?;
        warn!(
            title,
            id, "title removed; attribute indexes and similarity graph still reference it"
        );
        Some(id)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            records: self.store.len(),
            titles: self.titles.len(),
            title_tree_height: self.titles.height(),
            actors: self.actors.key_count(),
            genres: self.genres.key_count(),
            longest_chain: self.actors.longest_chain().max(self.genres.longest_chain()),
            edges: self.graph.edge_count(),
            avg_degree: self.graph.avg_degree(),
        }
    }

    fn require_title(&self, title: &str) -> CatalogResult<&Record> {
        self.find_by_title(title)
            .ok_or_else(|| CatalogError::NotFound(title.to_string()))
    }

    fn resolve(&self, ids: impl IntoIterator<Item = RecordId>) -> Vec<&Record> {
        ids.into_iter().filter_map(|id| self.store.get(id)).collect()
    }

    /// Title of a record already checked against the graph.
    fn title_of(&self, id: RecordId) -> String {
        self.store.as_slice()[id].title.clone()
    }
}
