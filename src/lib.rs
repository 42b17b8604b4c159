//! # nexus-catalog
//!
//! In-memory movie catalog with three kinds of index over one record store:
//!
//! - an AVL tree for exact title lookup,
//! - chained hash tables for actor and genre lookup,
//! - a similarity graph for breadth-first recommendation and shortest-path
//!   queries.
//!
//! Records are loaded once (see [`ingest`]), after which the catalog is
//! queried read-only.
//!
//! ```
//! use nexus_catalog::{CatalogBuilder, CatalogConfig, NewRecord};
//!
//! let mut builder = CatalogBuilder::new(CatalogConfig::default());
//! builder.index_record(NewRecord::new("Heat", 1995, 8.3).genre("Crime").actor("Al Pacino"));
//! builder.index_record(NewRecord::new("Casino", 1995, 8.2).genre("Crime"));
//! let catalog = builder.finish();
//!
//! let heat = catalog.find_by_title("Heat").unwrap();
//! let similar = catalog.recommend(heat.id);
//! assert_eq!(similar[0].title, "Casino");
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod ingest;
pub mod record;
pub mod shell;
pub mod text;

// Re-export key types
pub use catalog::{Attribute, Catalog, CatalogBuilder, CatalogStats};
pub use config::{CatalogConfig, ColumnLayout, SimilarityBasis};
pub use error::{CatalogError, CatalogResult};
pub use record::{NewRecord, Record, RecordId, RecordStore};
