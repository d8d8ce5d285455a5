//! Read-only retrieval library over the filings vector index.
//!
//! The index itself is populated ahead of time by the offline ingestion
//! jobs; this crate only issues similarity searches, constrained by a
//! company filter, and maps stored records into [`Passage`] values with
//! content-level deduplication.

pub mod config;
pub mod embed;
pub mod errors;
pub mod filters;
pub mod qdrant_facade;
pub mod record;
pub mod retrieve;

pub use config::StoreConfig;
pub use embed::EmbeddingsProvider;
pub use embed::profile_embedder::ProfileEmbedder;
pub use errors::StoreError;
pub use record::Passage;
pub use retrieve::FilingStore;
