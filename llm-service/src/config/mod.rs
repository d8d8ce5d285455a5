//! Provider configuration: model config struct, provider enum, and
//! environment-driven default constructors.

pub mod default_config;
pub mod llm_model_config;
pub mod llm_provider;
