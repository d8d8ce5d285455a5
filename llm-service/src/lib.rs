//! Shared LLM service crate for the filings QA backend.
//!
//! Provides:
//! - Unified provider configs ([`config`]) for Cohere and OpenAI-compatible
//!   backends, loaded strictly from environment variables.
//! - Thin HTTP services per provider ([`services`]).
//! - A shared profile service ([`service_profiles::LlmServiceProfiles`])
//!   with **fast**, **slow**, and **embedding** roles and a client cache.
//! - Resilient health checks ([`health_service`]).
//! - Unified errors ([`error_handler`]).

pub mod chat;
pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use chat::{ChatMessage, Role};
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmError;
pub use service_profiles::LlmServiceProfiles;
pub use services::cohere_service::ConnectorDocument;
