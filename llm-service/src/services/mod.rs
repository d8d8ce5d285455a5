//! Thin per-provider HTTP services.

pub mod cohere_service;
pub mod open_ai_service;
