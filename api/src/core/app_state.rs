use std::error::Error;
use std::sync::Arc;

use answer_engine::{
    AnswerEngine, EngineConfig, ProfileConnector, ProfileGeneration, StoreRetriever,
};
use filing_store::FilingStore;
use llm_service::LlmServiceProfiles;

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// LLM profiles, also probed by the health route.
    pub profiles: Arc<LlmServiceProfiles>,
    /// The assembled answer pipeline.
    pub engine: AnswerEngine,
}

impl AppState {
    /// Load shared state from environment variables and wire up the
    /// pipeline with its production clients.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let profiles = Arc::new(LlmServiceProfiles::from_env()?);
        let store = Arc::new(FilingStore::from_env()?);

        let engine = AnswerEngine::new(
            Arc::new(ProfileGeneration::new(profiles.clone())),
            Arc::new(StoreRetriever::new(store, profiles.clone())),
            Arc::new(ProfileConnector::new(profiles.clone())),
            EngineConfig::from_env(),
        );

        Ok(Self { profiles, engine })
    }
}
