//! Shared LLM service with three active profiles: `fast`, `slow`, and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (endpoint+model+key+timeout).
//! - Provides convenience methods to chat via the fast profile, compute
//!   embeddings, and run connector-backed web retrieval via the slow one.
//! - If the `slow` profile is not provided, it falls back to `fast`.

use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
    sync::Arc,
};

use tokio::sync::RwLock;

use crate::{
    chat::ChatMessage,
    config::{
        default_config::configs_from_env, llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::{LlmError, ProviderError},
    health_service::{HealthService, HealthStatus},
    services::{
        cohere_service::{CohereService, ConnectorDocument},
        open_ai_service::OpenAiService,
    },
};

/// Shared service that manages three logical LLM profiles: **fast**, **slow**,
/// and **embedding**.
///
/// Internally, it caches Cohere/OpenAI clients keyed by their configuration to
/// avoid recreating HTTP clients on each call.
pub struct LlmServiceProfiles {
    fast: LlmModelConfig,
    slow: LlmModelConfig,
    embedding: LlmModelConfig,

    cohere: RwLock<HashMap<ClientKey, Arc<CohereService>>>,
    openai: RwLock<HashMap<ClientKey, Arc<OpenAiService>>>,

    health: HealthService,
}

impl LlmServiceProfiles {
    /// Creates a new service with three profiles.
    ///
    /// - `fast`: required light profile (filtering/refinement/composition).
    /// - `slow_opt`: optional quality profile (connector retrieval). If
    ///   `None`, falls back to `fast`.
    /// - `embedding`: required embedding profile.
    /// - `health_timeout_secs`: optional timeout for the health checker.
    pub fn new(
        fast: LlmModelConfig,
        slow_opt: Option<LlmModelConfig>,
        embedding: LlmModelConfig,
        health_timeout_secs: Option<u64>,
    ) -> Result<Self, LlmError> {
        let slow = slow_opt.unwrap_or_else(|| fast.clone());

        Ok(Self {
            fast,
            slow,
            embedding,
            cohere: RwLock::new(HashMap::new()),
            openai: RwLock::new(HashMap::new()),
            health: HealthService::new(health_timeout_secs)?,
        })
    }

    /// Builds the service from environment variables (`LLM_KIND` et al.).
    ///
    /// # Errors
    /// Returns [`LlmError::Config`] when required variables are absent.
    pub fn from_env() -> Result<Self, LlmError> {
        let (fast, slow, embedding) = configs_from_env()?;
        Self::new(fast, Some(slow), embedding, Some(10))
    }

    /// Runs a chat exchange using the **fast** profile.
    ///
    /// # Errors
    /// Returns [`LlmError`] if the provider call fails.
    pub async fn chat_fast(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.chat_with(&self.fast, messages).await
    }

    /// Computes an embedding using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`LlmError`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        match self.embedding.provider {
            LlmProvider::Cohere => {
                let cli = self.get_or_init_cohere(&self.embedding).await?;
                cli.embeddings(input).await
            }
            LlmProvider::OpenAi => {
                let cli = self.get_or_init_openai(&self.embedding).await?;
                cli.embeddings(input).await
            }
        }
    }

    /// Runs a query through the managed web-search connector using the
    /// **slow** profile.
    ///
    /// # Errors
    /// - [`ProviderError::ConnectorUnsupported`] when the slow profile is not
    ///   backed by a connector-capable provider.
    /// - Other [`LlmError`] variants for transport/decoding failures.
    pub async fn connector_retrieve(
        &self,
        query: &str,
    ) -> Result<Vec<ConnectorDocument>, LlmError> {
        match self.slow.provider {
            LlmProvider::Cohere => {
                let cli = self.get_or_init_cohere(&self.slow).await?;
                cli.connector_search(query).await
            }
            LlmProvider::OpenAi => Err(ProviderError::ConnectorUnsupported.into()),
        }
    }

    /// Returns a health snapshot for all distinct profiles.
    ///
    /// If the slow profile equals the fast profile, it is checked only once.
    pub async fn health_all(&self) -> Result<Vec<HealthStatus>, LlmError> {
        let mut list = Vec::<LlmModelConfig>::with_capacity(3);
        list.push(self.fast.clone());
        if self.slow != self.fast {
            list.push(self.slow.clone());
        }
        if self.embedding != self.fast && self.embedding != self.slow {
            list.push(self.embedding.clone());
        }
        Ok(self.health.check_many(&list).await)
    }

    /// Returns references to the current profiles `(fast, slow, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig, &LlmModelConfig) {
        (&self.fast, &self.slow, &self.embedding)
    }

    /* --------------------- Internals --------------------- */

    async fn chat_with(
        &self,
        cfg: &LlmModelConfig,
        messages: &[ChatMessage],
    ) -> Result<String, LlmError> {
        match cfg.provider {
            LlmProvider::Cohere => {
                let cli = self.get_or_init_cohere(cfg).await?;
                cli.chat(messages).await
            }
            LlmProvider::OpenAi => {
                let cli = self.get_or_init_openai(cfg).await?;
                cli.chat(messages).await
            }
        }
    }

    async fn get_or_init_cohere(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<CohereService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.cohere.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.cohere.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(CohereService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }

    async fn get_or_init_openai(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OpenAiService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.openai.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.openai.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OpenAiService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }
}

/// Internal cache key to identify unique client configs.
#[derive(Clone, Eq)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}

impl PartialEq for ClientKey {
    fn eq(&self, other: &Self) -> bool {
        self.provider == other.provider
            && self.endpoint == other.endpoint
            && self.model == other.model
            && self.api_key == other.api_key
            && self.timeout == other.timeout
    }
}

impl Hash for ClientKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.provider.hash(state);
        self.endpoint.hash(state);
        self.model.hash(state);
        if let Some(ref k) = self.api_key {
            k.hash(state);
        } else {
            0usize.hash(state);
        }
        self.timeout.hash(state);
    }
}
