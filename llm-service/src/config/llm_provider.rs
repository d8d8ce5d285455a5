/// Represents the provider (backend) used for large language model (LLM) inference.
///
/// This enum distinguishes between the Cohere platform API and any
/// OpenAI-compatible chat-completions endpoint.
///
/// Adding more providers in the future (e.g., Anthropic, Mistral API)
/// can be done by extending this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Cohere platform API (chat, embed, and connector-backed retrieval).
    Cohere,
    /// Any OpenAI-compatible chat-completions API.
    OpenAi,
}
