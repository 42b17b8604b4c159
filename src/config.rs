//! Catalog configuration
//!
//! All knobs have defaults matching the IMDB "movie_metadata" dataset the
//! catalog was built around. A TOML file may override any subset of them:
//!
//! ```toml
//! neighborhood_window = 100
//! similarity = "any"
//!
//! [columns]
//! title = 0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Default bucket count for the attribute hash tables (prime).
pub const DEFAULT_TABLE_SIZE: usize = 10_007;

/// Which record attributes make two records similar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityBasis {
    /// Records sharing at least one genre
    #[default]
    Genres,
    /// Records sharing at least one actor
    Actors,
    /// Records sharing a genre or an actor
    Any,
}

/// Zero-based CSV column positions of the fields the loader reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub title: usize,
    pub year: usize,
    pub rating: usize,
    /// `|`-delimited genre list
    pub genres: usize,
    /// Actor columns, in billing order
    pub actors: Vec<usize>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            title: 11,
            year: 23,
            rating: 25,
            genres: 9,
            actors: vec![10, 6, 14],
        }
    }
}

impl ColumnLayout {
    /// Highest column index the layout touches.
    pub fn last_column(&self) -> usize {
        self.actors
            .iter()
            .copied()
            .chain([self.title, self.year, self.rating, self.genres])
            .max()
            .unwrap_or(0)
    }
}

/// Catalog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Bucket count of each attribute hash table (should be prime)
    pub table_size: usize,
    /// Each record is compared with the next `neighborhood_window - 1` records
    /// when building the similarity graph
    pub neighborhood_window: usize,
    /// Maximum number of recommendations returned (default: 10)
    pub recommendation_limit: usize,
    /// Maximum number of data rows loaded
    pub max_records: usize,
    /// Attributes compared when building the similarity graph
    pub similarity: SimilarityBasis,
    /// Compare record windows on the rayon pool during graph build
    pub parallel_graph_build: bool,
    /// CSV column layout
    pub columns: ColumnLayout,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            table_size: DEFAULT_TABLE_SIZE,
            neighborhood_window: 50,
            recommendation_limit: 10,
            max_records: 5000,
            similarity: SimilarityBasis::Genres,
            parallel_graph_build: false,
            columns: ColumnLayout::default(),
        }
    }
}

impl CatalogConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> CatalogResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check the parameters the indexes cannot work without.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.table_size == 0 {
            return Err(CatalogError::InvalidConfig(
                "table_size must be positive".to_string(),
            ));
        }
        if self.neighborhood_window == 0 {
            return Err(CatalogError::InvalidConfig(
                "neighborhood_window must be positive".to_string(),
            ));
        }
        if self.columns.actors.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "columns.actors must name at least one column".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder method to set the hash table size
    pub fn with_table_size(mut self, table_size: usize) -> Self {
        self.table_size = table_size;
        self
    }

    /// Builder method to set the graph neighborhood window
    pub fn with_neighborhood_window(mut self, window: usize) -> Self {
        self.neighborhood_window = window;
        self
    }

    /// Builder method to set the recommendation limit
    pub fn with_recommendation_limit(mut self, limit: usize) -> Self {
        self.recommendation_limit = limit;
        self
    }

    /// Builder method to set the row cap
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Builder method to set the similarity basis
    pub fn with_similarity(mut self, similarity: SimilarityBasis) -> Self {
        self.similarity = similarity;
        self
    }

    /// Builder method to toggle parallel graph construction
    pub fn with_parallel_graph_build(mut self, parallel: bool) -> Self {
        self.parallel_graph_build = parallel;
        self
    }

    /// Builder method to set the CSV column layout
    pub fn with_columns(mut self, columns: ColumnLayout) -> Self {
        self.columns = columns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.table_size, 10_007);
        assert_eq!(config.neighborhood_window, 50);
        assert_eq!(config.recommendation_limit, 10);
        assert_eq!(config.max_records, 5000);
        assert_eq!(config.similarity, SimilarityBasis::Genres);
        assert_eq!(config.columns.last_column(), 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CatalogConfig::from_toml_str(
            r#"
            neighborhood_window = 5
            similarity = "any"

            [columns]
            title = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.neighborhood_window, 5);
        assert_eq!(config.similarity, SimilarityBasis::Any);
        assert_eq!(config.columns.title, 0);
        assert_eq!(config.columns.genres, 9);
        assert_eq!(config.table_size, DEFAULT_TABLE_SIZE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = CatalogConfig::from_toml_str("table_size = 0").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidConfig(_)));

        let err = CatalogConfig::default()
            .with_neighborhood_window(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = CatalogConfig::from_toml_str("table_size = [").unwrap_err();
        assert!(matches!(err, CatalogError::ConfigParse(_)));
    }
}
