//! The answer pipeline: refine, plan, retrieve, filter, compose, with a
//! web-search fallback when grounding comes up empty.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use filing_store::Passage;

use crate::api_types::{AnswerResult, AskRequest, SearchType, SourceSet};
use crate::cfg::EngineConfig;
use crate::clients::{ConnectorClient, GenerationClient, PassageRetriever};
use crate::{compose, plan, refine, relevance, websearch};

/// Fixed user-facing message when neither grounding nor web search
/// produced an answer.
pub const NO_RESULT_MESSAGE: &str = "No relevant information found. Please try again later.";

/// The answer pipeline with its injected clients.
///
/// Stateless between invocations; one instance serves concurrent requests.
pub struct AnswerEngine {
    generation: Arc<dyn GenerationClient>,
    retriever: Arc<dyn PassageRetriever>,
    connector: Arc<dyn ConnectorClient>,
    cfg: EngineConfig,
}

impl AnswerEngine {
    pub fn new(
        generation: Arc<dyn GenerationClient>,
        retriever: Arc<dyn PassageRetriever>,
        connector: Arc<dyn ConnectorClient>,
        cfg: EngineConfig,
    ) -> Self {
        Self {
            generation,
            retriever,
            connector,
            cfg,
        }
    }

    /// Answers a question about the requested companies.
    ///
    /// External-call failures are downgraded along the way (a failed
    /// retrieval behaves like an empty one, a failed relevance check drops
    /// that passage), so this never returns an error. When nothing usable
    /// comes back from either grounding or web search, the result carries
    /// [`NO_RESULT_MESSAGE`] with empty sources and search type.
    pub async fn answer(&self, req: &AskRequest) -> AnswerResult {
        let query = refine::refine_query(
            self.generation.as_ref(),
            &req.query,
            req.chat_history.as_deref(),
        )
        .await;

        let passages = self.retrieve_planned(&query, &req.companies).await;
        if passages.is_empty() {
            info!("retrieval returned nothing, falling back to web search");
            return self.fallback(&query, req).await;
        }

        let relevant =
            relevance::filter_passages(self.generation.as_ref(), &query, passages, &self.cfg)
                .await;
        if relevant.is_empty() {
            info!("all passages judged irrelevant, falling back to web search");
            return self.fallback(&query, req).await;
        }

        let sources: BTreeSet<String> = relevant.iter().map(|p| p.source.clone()).collect();
        let answer = match compose::compose_answer(
            self.generation.as_ref(),
            &req.persona,
            &query,
            &req.companies,
            &relevant,
        )
        .await
        {
            Ok(a) => a,
            Err(e) => {
                warn!("answer composition failed: {e}");
                String::new()
            }
        };

        finish(answer, SourceSet::Documents(sources), SearchType::Grounded)
    }

    /// Plans the retrieval queries and runs them concurrently.
    ///
    /// Batches are collected in plan order and deduplicated by content
    /// across queries, so the result is deterministic regardless of
    /// completion order. A failed retrieval behaves like an empty one.
    async fn retrieve_planned(&self, query: &str, companies: &[String]) -> Vec<Passage> {
        let comparison = companies.len() > 1;
        let planned = plan::plan(query, companies, None);
        let top_n = if comparison {
            self.cfg.comparison_top_n
        } else {
            self.cfg.single_top_n
        };

        let batches: Vec<Vec<Passage>> = stream::iter(planned)
            .map(|cq| {
                let scope = if comparison {
                    vec![cq.company_name.clone()]
                } else {
                    companies.to_vec()
                };
                async move {
                    match self
                        .retriever
                        .retrieve(&cq.query_text, &scope, top_n, self.cfg.max_distance)
                        .await
                    {
                        Ok(passages) => passages,
                        Err(e) => {
                            warn!("retrieval failed for '{}': {e}", cq.company_name);
                            Vec::new()
                        }
                    }
                }
            })
            .buffered(self.cfg.retrieve_concurrency.max(1))
            .collect()
            .await;

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for batch in batches {
            for passage in batch {
                if seen.insert(passage.content.clone()) {
                    out.push(passage);
                }
            }
        }
        debug!("retrieved {} unique passages", out.len());
        out
    }

    async fn fallback(&self, query: &str, req: &AskRequest) -> AnswerResult {
        let answer = websearch::web_search_answer(
            self.connector.as_ref(),
            query,
            &req.persona,
            &req.companies,
        )
        .await
        .unwrap_or_default();

        finish(answer, SourceSet::WebSearch, SearchType::Connector)
    }
}

fn finish(answer: String, sources: SourceSet, search_type: SearchType) -> AnswerResult {
    if answer.is_empty() {
        return AnswerResult {
            answer: NO_RESULT_MESSAGE.to_string(),
            sources: SourceSet::empty(),
            search_type: None,
        };
    }
    AnswerResult {
        answer,
        sources,
        search_type: Some(search_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_becomes_the_fixed_message() {
        let res = finish(String::new(), SourceSet::WebSearch, SearchType::Connector);
        assert_eq!(res.answer, NO_RESULT_MESSAGE);
        assert_eq!(res.sources, SourceSet::empty());
        assert!(res.search_type.is_none());
    }

    #[test]
    fn non_empty_answer_keeps_sources_and_type() {
        let res = finish(
            "answer".to_string(),
            SourceSet::WebSearch,
            SearchType::Connector,
        );
        assert_eq!(res.sources, SourceSet::WebSearch);
        assert_eq!(res.search_type, Some(SearchType::Connector));
    }
}
