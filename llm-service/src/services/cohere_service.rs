//! Cohere service for chat, embeddings, and connector-backed retrieval.
//!
//! This module implements a thin client for the Cohere platform API:
//! - `POST {endpoint}/v2/chat`  — synchronous chat completion (`stream=false`)
//! - `POST {endpoint}/v1/embed` — embeddings retrieval
//! - `POST {endpoint}/v1/chat`  — chat with managed connectors (web search),
//!   returning the retrieved documents plus the generated text
//!
//! It uses the universal configuration [`LlmModelConfig`] and ensures
//! that the selected provider is [`LlmProvider::Cohere`].

use std::time::Duration;

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::chat::ChatMessage;
use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{LlmError, ProviderError, make_snippet};

/// A document returned by a connector-backed retrieval call.
///
/// The final element of a connector result sequence carries the generated
/// answer text with no source URL.
#[derive(Debug, Clone)]
pub struct ConnectorDocument {
    /// Document body (snippet for retrieved pages, full text for the
    /// trailing generation document).
    pub content: String,
    /// Source URL, when the document came from the web.
    pub source: Option<String>,
}

/// Thin client for the Cohere API.
///
/// Initialized with a full [`LlmModelConfig`]. Reuses an HTTP client with
/// a configurable timeout. Provides high-level calls:
/// - [`CohereService::chat`]             — non-streaming chat completion
/// - [`CohereService::embeddings`]       — embeddings retrieval
/// - [`CohereService::connector_search`] — web-search connector retrieval
pub struct CohereService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat_v2: String,
    url_chat_v1: String,
    url_embed: String,
}

impl CohereService {
    /// Creates a new [`CohereService`] from the given config.
    ///
    /// # Errors
    /// - [`ProviderError::InvalidProvider`] if `cfg.provider` is not `Cohere`
    /// - [`ProviderError::MissingApiKey`] if no API key is configured
    /// - [`ProviderError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`LlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, LlmError> {
        if cfg.provider != LlmProvider::Cohere {
            return Err(ProviderError::InvalidProvider.into());
        }

        let api_key = cfg
            .api_key
            .clone()
            .ok_or(ProviderError::MissingApiKey)?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::InvalidEndpoint(cfg.endpoint).into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                ProviderError::Decode(format!("invalid API key header: {e}"))
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat_v2 = format!("{}/v2/chat", base);
        let url_chat_v1 = format!("{}/v1/chat", base);
        let url_embed = format!("{}/v1/embed", base);

        Ok(Self {
            client,
            cfg,
            url_chat_v2,
            url_chat_v1,
            url_embed,
        })
    }

    /// Performs a **non-streaming** chat request via `/v2/chat`.
    ///
    /// Mapped options:
    /// - `model`       ← `self.cfg.model`
    /// - `messages`    ← argument
    /// - `max_tokens`  ← `self.cfg.max_tokens`
    /// - `temperature` ← `self.cfg.temperature`
    ///
    /// # Errors
    /// - [`ProviderError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client errors
    /// - [`ProviderError::Decode`] if the response cannot be parsed
    /// - [`ProviderError::EmptyResponse`] if no text blocks are returned
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.cfg.model,
            messages,
            stream: false,
            max_tokens: self.cfg.max_tokens,
            temperature: self.cfg.temperature,
        };

        debug!("POST {}", self.url_chat_v2);
        let resp = self
            .client
            .post(&self.url_chat_v2)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat_v2.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            }
            .into());
        }

        let out: ChatResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Decode(format!("serde error: {e}")))?;

        let text = out
            .message
            .content
            .into_iter()
            .filter_map(|b| b.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse.into());
        }
        Ok(text)
    }

    /// Runs a query through the managed **web-search connector** via `/v1/chat`.
    ///
    /// Returns the retrieved web documents in ranking order, followed by a
    /// final document whose `content` is the generated answer text. Callers
    /// that only want the answer take the last document.
    ///
    /// # Errors
    /// Same failure modes as [`CohereService::chat`].
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn connector_search(
        &self,
        query: &str,
    ) -> Result<Vec<ConnectorDocument>, LlmError> {
        let body = ConnectorChatRequest {
            model: &self.cfg.model,
            message: query,
            connectors: &[Connector { id: "web-search" }],
            temperature: self.cfg.temperature,
        };

        debug!("POST {}", self.url_chat_v1);
        let resp = self
            .client
            .post(&self.url_chat_v1)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat_v1.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            }
            .into());
        }

        let out: ConnectorChatResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Decode(format!("serde error: {e}")))?;

        let mut docs: Vec<ConnectorDocument> = out
            .documents
            .unwrap_or_default()
            .into_iter()
            .map(|d| ConnectorDocument {
                content: d.snippet.unwrap_or_default(),
                source: d.url,
            })
            .collect();

        // The generated text rides along as the final document.
        docs.push(ConnectorDocument {
            content: out.text,
            source: None,
        });

        Ok(docs)
    }

    /// Retrieves a query embedding via `/v1/embed`.
    ///
    /// # Errors
    /// - [`ProviderError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client errors
    /// - [`ProviderError::Decode`] if the response cannot be parsed or the
    ///   embeddings array is empty
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        let body = EmbedRequest {
            model: &self.cfg.model,
            texts: &[input],
            input_type: "search_query",
        };

        debug!("POST {}", self.url_embed);
        let resp = self.client.post(&self.url_embed).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embed.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            }
            .into());
        }

        let out: EmbedResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Decode(format!("serde error: {e}")))?;

        out.embeddings
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Decode("empty embeddings array".into()).into())
    }
}

/* ==========================
HTTP payloads & options
========================== */

/// Request body for `/v2/chat` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Response body for `/v2/chat`. Only the text blocks are used.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Request body for `/v1/chat` with managed connectors.
#[derive(Debug, Serialize)]
struct ConnectorChatRequest<'a> {
    model: &'a str,
    message: &'a str,
    connectors: &'a [Connector],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct Connector {
    id: &'static str,
}

/// Response body for `/v1/chat`: generated `text` plus retrieved `documents`.
#[derive(Debug, Deserialize)]
struct ConnectorChatResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    documents: Option<Vec<ConnectorDocumentPayload>>,
}

#[derive(Debug, Deserialize)]
struct ConnectorDocumentPayload {
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Request body for `/v1/embed`.
#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: &'a [&'a str],
    input_type: &'static str,
}

/// Response body for `/v1/embed`.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}
