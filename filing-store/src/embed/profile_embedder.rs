//! Embedder backed by the configured LLM embedding profile.

use crate::{EmbeddingsProvider, errors::StoreError};
use llm_service::LlmServiceProfiles;
use std::sync::Arc;
use std::{future::Future, pin::Pin};

/// Adapts [`LlmServiceProfiles`] to the [`EmbeddingsProvider`] trait so the
/// retrieval layer stays decoupled from the concrete LLM stack.
pub struct ProfileEmbedder {
    profiles: Arc<LlmServiceProfiles>,
}

impl ProfileEmbedder {
    pub fn new(profiles: Arc<LlmServiceProfiles>) -> Self {
        Self { profiles }
    }
}

impl EmbeddingsProvider for ProfileEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
        Box::pin(async move {
            self.profiles
                .embed(text)
                .await
                .map_err(|e| StoreError::Embedding(e.to_string()))
        })
    }
}
