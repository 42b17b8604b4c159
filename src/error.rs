//! Error types for catalog loading and queries.
//!
//! Lookups that can simply miss return `Option`. `CatalogError` is used where
//! an outcome has to be reported to a caller: title-level queries, loading
//! data and reading configuration.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Title or attribute key is not indexed.
    #[error("not found: {0}")]
    NotFound(String),

    /// Both records exist but no path joins them in the similarity graph.
    #[error("no connection between '{from}' and '{to}'")]
    Disconnected { from: String, to: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl CatalogError {
    /// True for the "absent key" outcome, as opposed to a disconnected path
    /// or an infrastructure failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}
