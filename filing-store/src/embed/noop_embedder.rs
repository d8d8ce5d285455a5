use crate::{EmbeddingsProvider, errors::StoreError};
use std::{future::Future, pin::Pin};

/// Embedder that always fails. Useful as a placeholder in tests that
/// never reach the embedding step.
#[derive(Clone)]
pub struct NoopEmbedder;

impl EmbeddingsProvider for NoopEmbedder {
    fn embed<'a>(
        &'a self,
        _text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
        Box::pin(async { Err(StoreError::Embedding("no embedder configured".into())) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_embedder_always_fails() {
        assert!(NoopEmbedder.embed("any text").await.is_err());
    }
}
