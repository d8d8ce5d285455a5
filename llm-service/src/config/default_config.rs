//! Default LLM configs loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`],
//! grouped by provider and role:
//!
//! - **Slow**      → quality model used for connector-backed web retrieval
//! - **Fast**      → light model used for refinement, relevance filtering
//!                   and answer composition
//! - **Embedding** → embedding generator for vector-index queries
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`       = provider kind (`cohere` or `openai`)
//! - `LLM_MAX_TOKENS` = optional max tokens (u32)
//!
//! Cohere-specific:
//! - `COHERE_URL`        = endpoint (defaults to `https://api.cohere.com`)
//! - `COHERE_API_KEY`    = API key (mandatory)
//! - `COHERE_MODEL`      = quality model (mandatory)
//! - `COHERE_MODEL_FAST` = light model (defaults to `COHERE_MODEL`)
//! - `EMBEDDING_MODEL`   = embedding model (mandatory)
//!
//! OpenAI-compatible:
//! - `OPENAI_URL`, `OPENAI_API_KEY`, `OPENAI_MODEL`, `OPENAI_MODEL_FAST`,
//!   `EMBEDDING_MODEL` with the same roles.

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ConfigError, LlmError, env_opt_u32, must_env},
};

/// Resolves the Cohere endpoint from environment, with the public API
/// base as default.
fn cohere_endpoint() -> String {
    std::env::var("COHERE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "https://api.cohere.com".to_string())
}

/// Constructs a config for the **slow/quality** Cohere model.
///
/// Used for the connector-backed web-search fallback, where answer quality
/// matters more than latency.
///
/// # Env
/// - `COHERE_API_KEY`, `COHERE_MODEL` (required)
/// - `LLM_MAX_TOKENS` (optional)
pub fn config_cohere_slow() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("COHERE_API_KEY")?;
    let model = must_env("COHERE_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Cohere,
        model,
        endpoint: cohere_endpoint(),
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Constructs a config for the **fast/light** Cohere model.
///
/// Used for the per-passage relevance filter, query refinement and answer
/// composition. Falls back to `COHERE_MODEL` if no dedicated light model is
/// configured.
pub fn config_cohere_fast() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("COHERE_API_KEY")?;
    let model = std::env::var("COHERE_MODEL_FAST")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(Ok)
        .unwrap_or_else(|| must_env("COHERE_MODEL"))?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Cohere,
        model,
        endpoint: cohere_endpoint(),
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}

/// Constructs a config for the **embedding** Cohere model.
///
/// # Env
/// - `COHERE_API_KEY`, `EMBEDDING_MODEL` (required)
pub fn config_cohere_embedding() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("COHERE_API_KEY")?;
    let model = must_env("EMBEDDING_MODEL")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Cohere,
        model,
        endpoint: cohere_endpoint(),
        api_key: Some(api_key),
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}

/// Constructs a config for the **slow/quality** OpenAI-compatible model.
pub fn config_openai_slow() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("OPENAI_API_KEY")?;
    let endpoint = must_env("OPENAI_URL")?;
    let model = must_env("OPENAI_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAi,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Constructs a config for the **fast/light** OpenAI-compatible model.
///
/// Falls back to `OPENAI_MODEL` if `OPENAI_MODEL_FAST` is unset.
pub fn config_openai_fast() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("OPENAI_API_KEY")?;
    let endpoint = must_env("OPENAI_URL")?;
    let model = std::env::var("OPENAI_MODEL_FAST")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(Ok)
        .unwrap_or_else(|| must_env("OPENAI_MODEL"))?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAi,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}

/// Constructs a config for the **embedding** OpenAI-compatible model.
pub fn config_openai_embedding() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("OPENAI_API_KEY")?;
    let endpoint = must_env("OPENAI_URL")?;
    let model = must_env("EMBEDDING_MODEL")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAi,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}

/// Builds the `(fast, slow, embedding)` trio for the provider selected by
/// `LLM_KIND` (`cohere` by default).
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for unknown `LLM_KIND` values
/// - provider-specific [`ConfigError::MissingVar`] for absent settings
pub fn configs_from_env()
-> Result<(LlmModelConfig, LlmModelConfig, LlmModelConfig), LlmError> {
    let kind = std::env::var("LLM_KIND").unwrap_or_else(|_| "cohere".to_string());
    match kind.to_ascii_lowercase().as_str() {
        "cohere" => Ok((
            config_cohere_fast()?,
            config_cohere_slow()?,
            config_cohere_embedding()?,
        )),
        "openai" => Ok((
            config_openai_fast()?,
            config_openai_slow()?,
            config_openai_embedding()?,
        )),
        other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
    }
}
