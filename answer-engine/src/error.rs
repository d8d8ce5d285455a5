//! Typed error for the answer-engine crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Errors from the underlying filing-store crate.
    #[error("store error: {0}")]
    Store(#[from] filing_store::StoreError),

    /// Errors from the LLM service layer.
    #[error("LLM error: {0}")]
    Llm(#[from] llm_service::LlmError),
}
