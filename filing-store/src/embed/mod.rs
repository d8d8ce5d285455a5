use crate::errors::StoreError;
use std::{future::Future, pin::Pin};

/// Asynchronous embedding provider.
///
/// Async is required because real providers perform HTTP requests.
///
/// Implement this trait to plug in your own embedding backend.
pub trait EmbeddingsProvider: Send + Sync {
    /// Async embedding function.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>;
}

pub mod noop_embedder;
pub mod profile_embedder;
