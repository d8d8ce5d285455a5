use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// This struct contains both general and provider-specific parameters.
/// It can be extended as needed to support new backends or features.
///
/// Pipeline-internal calls run with `temperature = Some(0.0)` so the
/// generation leans deterministic; the env constructors in
/// [`crate::config::default_config`] set that up.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend (e.g., Cohere, OpenAI-compatible).
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"command-r"`, `"gpt-4o-mini"`).
    pub model: String,

    /// Inference endpoint (remote API base URL).
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 = deterministic-leaning).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
