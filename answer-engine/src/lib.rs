//! Persona-aware RAG pipeline over SEC filings.
//!
//! Public API: [`AnswerEngine`]. It optionally refines the question from
//! chat history, plans per-company retrieval queries, fetches passages
//! from the filings index, filters them through a per-passage relevance
//! check, and composes a grounded answer with citations. When retrieval
//! or filtering leaves nothing, it falls back to the web-search connector.

mod cfg;
mod clients;
mod compose;
mod error;
mod pipeline;
mod plan;
mod prompt;
mod refine;
mod relevance;
mod websearch;

mod api_types;

pub use api_types::{
    AnswerResult, AskRequest, Persona, RelevantPassage, SearchType, SourceSet,
};
pub use cfg::EngineConfig;
pub use clients::{
    ConnectorClient, GenerationClient, PassageRetriever, ProfileConnector, ProfileGeneration,
    StoreRetriever,
};
pub use error::EngineError;
pub use pipeline::{AnswerEngine, NO_RESULT_MESSAGE};
pub use plan::{CompanyQuery, DEFAULT_METRICS, plan};
pub use relevance::{IRRELEVANT_SENTINEL, classify_relevance};
