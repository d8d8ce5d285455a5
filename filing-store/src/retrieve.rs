//! High-level retrieval: embed queries, search, and map hits to passages.

use std::collections::HashSet;

use crate::config::StoreConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use crate::filters::companies_filter;
use crate::qdrant_facade::QdrantFacade;
use crate::record::{
    FIELD_COMPANY, FIELD_CONTENT, FIELD_SECTION_SUMMARY, FIELD_SOURCE, Passage,
};

use tracing::{debug, trace};

/// Read-only handle over the filings vector collection.
pub struct FilingStore {
    facade: QdrantFacade,
    cfg: StoreConfig,
}

impl FilingStore {
    /// Connects to Qdrant using the given configuration.
    pub fn new(cfg: StoreConfig) -> Result<Self, StoreError> {
        let facade = QdrantFacade::new(&cfg)?;
        Ok(Self { facade, cfg })
    }

    /// Connects using environment-driven configuration.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::new(StoreConfig::from_env())
    }

    /// Retrieves passages for a query, constrained to the given companies.
    ///
    /// The query is embedded, searched against the collection, and hits are
    /// mapped to [`Passage`] values with a content seen-set so a section
    /// page stored twice is returned once.
    ///
    /// An empty result is not an error: callers decide what to do when
    /// nothing matches.
    pub async fn retrieve(
        &self,
        query: &str,
        companies: &[String],
        top_n: u64,
        max_distance: f32,
        embedder: &dyn EmbeddingsProvider,
    ) -> Result<Vec<Passage>, StoreError> {
        trace!(
            "retrieve companies={} top_n={} max_distance={}",
            companies.len(),
            top_n,
            max_distance
        );

        let filter = companies_filter(companies);
        let vector = embedder.embed(query).await?;
        let hits = self
            .facade
            .search(vector, top_n, filter, self.cfg.exact_search)
            .await?;

        let mut seen = HashSet::new();
        let out = passages_from_hits(hits, max_distance, &mut seen);
        debug!("retrieve passages={}", out.len());
        Ok(out)
    }
}

/// Maps raw search hits to passages, applying the distance cutoff and
/// content-level deduplication.
///
/// Qdrant reports cosine similarity scores; the cutoff is expressed as a
/// distance, so a hit passes when `1.0 - score <= max_distance`. Hits
/// without a content field are skipped.
pub fn passages_from_hits(
    hits: Vec<(f32, serde_json::Value)>,
    max_distance: f32,
    seen: &mut HashSet<String>,
) -> Vec<Passage> {
    let mut out = Vec::with_capacity(hits.len());
    for (score, payload) in hits {
        if (1.0 - score) > max_distance {
            continue;
        }
        let content = payload
            .get(FIELD_CONTENT)
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        if content.is_empty() || !seen.insert(content.to_string()) {
            continue;
        }
        out.push(Passage {
            content: content.to_string(),
            source: payload
                .get(FIELD_SOURCE)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            company: payload
                .get(FIELD_COMPANY)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            section_summary: payload
                .get(FIELD_SECTION_SUMMARY)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(score: f32, content: &str, source: &str) -> (f32, serde_json::Value) {
        (
            score,
            json!({
                FIELD_CONTENT: content,
                FIELD_SOURCE: source,
                FIELD_COMPANY: "Acme Corp",
            }),
        )
    }

    #[test]
    fn duplicate_content_is_returned_once() {
        let hits = vec![
            hit(0.9, "revenue grew 12%", "https://sec.gov/a"),
            hit(0.8, "revenue grew 12%", "https://sec.gov/b"),
            hit(0.7, "net income fell", "https://sec.gov/c"),
        ];
        let mut seen = HashSet::new();
        let out = passages_from_hits(hits, 999.0, &mut seen);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].source, "https://sec.gov/a");
    }

    #[test]
    fn seen_set_spans_calls() {
        let mut seen = HashSet::new();
        let first = passages_from_hits(vec![hit(0.9, "same text", "u1")], 999.0, &mut seen);
        let second = passages_from_hits(vec![hit(0.9, "same text", "u2")], 999.0, &mut seen);
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn distance_cutoff_drops_far_hits() {
        let hits = vec![hit(0.95, "close", "u1"), hit(0.2, "far", "u2")];
        let mut seen = HashSet::new();
        let out = passages_from_hits(hits, 0.5, &mut seen);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].content, "close");
    }

    #[test]
    fn hits_without_content_are_skipped() {
        let hits = vec![(0.9, json!({ FIELD_SOURCE: "u1" }))];
        let mut seen = HashSet::new();
        assert!(passages_from_hits(hits, 999.0, &mut seen).is_empty());
    }

    #[test]
    fn section_summary_is_optional() {
        let hits = vec![(
            0.9,
            json!({
                FIELD_CONTENT: "body",
                FIELD_SOURCE: "u1",
                FIELD_COMPANY: "Acme Corp",
                FIELD_SECTION_SUMMARY: "risk factors",
            }),
        )];
        let mut seen = HashSet::new();
        let out = passages_from_hits(hits, 999.0, &mut seen);
        assert_eq!(out[0].section_summary.as_deref(), Some("risk factors"));
    }
}
