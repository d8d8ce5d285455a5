//! Runtime and collection configuration.

use crate::errors::StoreError;

/// Configuration for filings retrieval.
///
/// The collection itself (schema, distance function) is provisioned by the
/// offline ingestion jobs; only read-side knobs live here.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Qdrant HTTP endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name holding filing passages.
    pub collection: String,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
}

impl StoreConfig {
    /// Creates a sane default config for a given collection name and Qdrant endpoint.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            exact_search: false,
        }
    }

    /// Builds the config from environment variables with sensible defaults.
    ///
    /// - `QDRANT_URL` (default `http://127.0.0.1:6334`)
    /// - `QDRANT_API_KEY` (optional)
    /// - `QDRANT_COLLECTION` (default `sec_filings`)
    /// - `QDRANT_EXACT_SEARCH` (default `false`)
    pub fn from_env() -> Self {
        let mut cfg = Self::new_default(
            std::env::var("QDRANT_URL").unwrap_or_else(|_| "http://127.0.0.1:6334".into()),
            std::env::var("QDRANT_COLLECTION").unwrap_or_else(|_| "sec_filings".into()),
        );
        cfg.qdrant_api_key = std::env::var("QDRANT_API_KEY").ok();
        cfg.exact_search = std::env::var("QDRANT_EXACT_SEARCH")
            .map(|v| v == "true")
            .unwrap_or(false);
        cfg
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(StoreError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(StoreError::Config("collection is empty".into()));
        }
        Ok(())
    }
}
