//! Index and traversal structures behind the catalog.
//!
//! - [`ordered`]: AVL tree for exact title lookup
//! - [`chained`]: chained hash table for one-to-many attribute lookup
//! - [`graph`]: undirected adjacency-list similarity graph
//! - [`traversal`]: breadth-first search shared by recommendation and
//!   shortest-path queries

pub mod chained;
pub mod graph;
pub mod ordered;
pub mod traversal;

pub use chained::MultiValueIndex;
pub use graph::SimilarityGraph;
pub use ordered::OrderedIndex;
pub use traversal::{BreadthFirst, FrontierQueue};
