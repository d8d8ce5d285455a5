//! Client traits the pipeline depends on, plus production adapters.
//!
//! The pipeline only speaks to these traits, so tests can run the full
//! state machine against stub implementations without network access.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use filing_store::{FilingStore, Passage, ProfileEmbedder};
use llm_service::{ChatMessage, ConnectorDocument, LlmServiceProfiles};

use crate::error::EngineError;

/// One text-generation call against the fast chat profile.
pub trait GenerationClient: Send + Sync {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, EngineError>> + Send + 'a>>;
}

/// Similarity retrieval over the filings index.
pub trait PassageRetriever: Send + Sync {
    fn retrieve<'a>(
        &'a self,
        query: &'a str,
        companies: &'a [String],
        top_n: u64,
        max_distance: f32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Passage>, EngineError>> + Send + 'a>>;
}

/// Web-search connector retrieval.
pub trait ConnectorClient: Send + Sync {
    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ConnectorDocument>, EngineError>> + Send + 'a>>;
}

/// [`GenerationClient`] backed by the fast profile of [`LlmServiceProfiles`].
pub struct ProfileGeneration {
    profiles: Arc<LlmServiceProfiles>,
}

impl ProfileGeneration {
    pub fn new(profiles: Arc<LlmServiceProfiles>) -> Self {
        Self { profiles }
    }
}

impl GenerationClient for ProfileGeneration {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, EngineError>> + Send + 'a>> {
        Box::pin(async move {
            let messages = [ChatMessage::user(prompt)];
            Ok(self.profiles.chat_fast(&messages).await?)
        })
    }
}

/// [`ConnectorClient`] backed by the slow profile's connector endpoint.
pub struct ProfileConnector {
    profiles: Arc<LlmServiceProfiles>,
}

impl ProfileConnector {
    pub fn new(profiles: Arc<LlmServiceProfiles>) -> Self {
        Self { profiles }
    }
}

impl ConnectorClient for ProfileConnector {
    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ConnectorDocument>, EngineError>> + Send + 'a>>
    {
        Box::pin(async move { Ok(self.profiles.connector_retrieve(query).await?) })
    }
}

/// [`PassageRetriever`] over a [`FilingStore`] with the embedding profile.
pub struct StoreRetriever {
    store: Arc<FilingStore>,
    embedder: ProfileEmbedder,
}

impl StoreRetriever {
    pub fn new(store: Arc<FilingStore>, profiles: Arc<LlmServiceProfiles>) -> Self {
        Self {
            store,
            embedder: ProfileEmbedder::new(profiles),
        }
    }
}

impl PassageRetriever for StoreRetriever {
    fn retrieve<'a>(
        &'a self,
        query: &'a str,
        companies: &'a [String],
        top_n: u64,
        max_distance: f32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Passage>, EngineError>> + Send + 'a>> {
        Box::pin(async move {
            Ok(self
                .store
                .retrieve(query, companies, top_n, max_distance, &self.embedder)
                .await?)
        })
    }
}
