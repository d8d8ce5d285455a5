//! Per-passage relevance filtering with extractive summarization.
//!
//! Vector similarity alone over-retrieves, so every candidate passage is
//! judged by the fast model: either it partially answers the question and
//! comes back as an extractive summary, or the model returns the sentinel
//! token and the passage is dropped.

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::api_types::RelevantPassage;
use crate::cfg::EngineConfig;
use crate::clients::GenerationClient;
use filing_store::Passage;

/// Token the model is instructed to return for irrelevant passages.
pub const IRRELEVANT_SENTINEL: &str = "irrelevant";

/// Prompt asking for an extractive summary or the sentinel token.
pub fn relevance_prompt(query: &str, content: &str) -> String {
    format!(
        "If Document_Content partially answer the User_Query create the extractive \
         summary of the relevant part of the document.\n\
         Do not add any additional explanation.\n\
         Otherwise, return \"irrelevant\"\n\n\
         User_Query: '{query}'\n\
         Document_Content: {content}."
    )
}

/// Classifies a raw model reply into a relevant summary or a rejection.
///
/// The sentinel check is a case-insensitive containment test, so replies
/// like `Irrelevant.` also count as rejections.
pub fn classify_relevance(raw: &str) -> Option<String> {
    if raw.to_lowercase().contains(IRRELEVANT_SENTINEL) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Filters passages down to relevant extractive summaries.
///
/// Passages are judged concurrently, bounded by `filter_concurrency`, and
/// results keep the input order. A failed model call drops that passage
/// only; an empty reply is retried once when `retry_on_empty` is set.
pub async fn filter_passages(
    generation: &dyn GenerationClient,
    query: &str,
    passages: Vec<Passage>,
    cfg: &EngineConfig,
) -> Vec<RelevantPassage> {
    let total = passages.len();
    let relevant: Vec<RelevantPassage> = stream::iter(passages)
        .map(|passage| async move { judge_passage(generation, query, passage, cfg).await })
        .buffered(cfg.filter_concurrency.max(1))
        .filter_map(|judged| async move { judged })
        .collect()
        .await;

    debug!("relevance filter kept {}/{} passages", relevant.len(), total);
    relevant
}

async fn judge_passage(
    generation: &dyn GenerationClient,
    query: &str,
    passage: Passage,
    cfg: &EngineConfig,
) -> Option<RelevantPassage> {
    let prompt = relevance_prompt(query, &passage.content);

    let mut reply = match generation.generate(&prompt).await {
        Ok(r) => r,
        Err(e) => {
            warn!("relevance check failed, dropping passage: {e}");
            return None;
        }
    };

    if reply.trim().is_empty() && cfg.retry_on_empty {
        reply = match generation.generate(&prompt).await {
            Ok(r) => r,
            Err(e) => {
                warn!("relevance retry failed, dropping passage: {e}");
                return None;
            }
        };
    }
    if reply.trim().is_empty() {
        return None;
    }

    classify_relevance(&reply).map(|content| RelevantPassage {
        content,
        source: passage.source,
    })
}
