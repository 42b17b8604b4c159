//! Undirected similarity graph over record ids
//!
//! Node indices are exactly `0..node_count`, matching [`RecordId`]s. The node
//! count is fixed when the graph is created; later record removals do not
//! shrink or rewire it.

use rayon::prelude::*;

use crate::config::SimilarityBasis;
use crate::record::{Record, RecordId};

/// Adjacency-list graph with a fixed node count.
///
/// `add_edge` is not idempotent: calling it twice for the same pair stores a
/// parallel edge. Traversals tolerate this through their visited set.
///
/// Neighbours are reported newest edge first, so a traversal that stops
/// early favours the most recently linked records.
#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    adjacency: Vec<Vec<RecordId>>,
    edges: usize,
}

impl SimilarityGraph {
    /// Create a graph of `node_count` isolated nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            edges: 0,
        }
    }

    /// Allocate a graph and add every supplied edge.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (RecordId, RecordId)>,
    {
        let mut graph = Self::new(node_count);
        for (a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Add an undirected edge between `a` and `b`.
    ///
    /// # Panics
    ///
    /// If either id is outside `0..node_count`.
    pub fn add_edge(&mut self, a: RecordId, b: RecordId) {
        self.check_node(a);
        self.check_node(b);
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        self.edges += 1;
    }

    /// Neighbours of `id`, most recently added edge first, parallel edges
    /// included.
    ///
    /// # Panics
    ///
    /// If `id` is outside `0..node_count`.
    pub fn neighbors(&self, id: RecordId) -> impl ExactSizeIterator<Item = RecordId> + '_ {
        self.check_node(id);
        self.adjacency[id].iter().rev().copied()
    }

    pub fn degree(&self, id: RecordId) -> usize {
        self.neighbors(id).len()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of `add_edge` calls, parallel edges counted separately.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Average degree (edges per node)
    pub fn avg_degree(&self) -> f64 {
        if self.adjacency.is_empty() {
            0.0
        } else {
            (2 * self.edges) as f64 / self.adjacency.len() as f64
        }
    }

    fn check_node(&self, id: RecordId) {
        assert!(
            id < self.adjacency.len(),
            "record id {id} outside graph of {} nodes",
            self.adjacency.len()
        );
    }
}

/// Similarity edges between each record and the records in the window that
/// follows it.
///
/// Record `i` is compared with `j` for `i < j < i + window`; a pair sharing an
/// attribute under `basis` yields one edge `(i, j)`. Edges come out sorted by
/// `i`, then `j`, whether or not the comparisons run on the rayon pool.
pub fn window_edges(
    records: &[Record],
    window: usize,
    basis: SimilarityBasis,
    parallel: bool,
) -> Vec<(RecordId, RecordId)> {
    let neighborhood = |i: usize| -> Vec<(RecordId, RecordId)> {
        let end = i.saturating_add(window).min(records.len());
        (i + 1..end)
            .filter(|&j| records[i].shares_attribute(&records[j], basis))
            .map(|j| (records[i].id, records[j].id))
            .collect()
    };

    if parallel {
        (0..records.len())
            .into_par_iter()
            .flat_map_iter(neighborhood)
            .collect()
    } else {
        (0..records.len()).flat_map(neighborhood).collect()
    }
}
