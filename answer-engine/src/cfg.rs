//! Runtime configuration loaded from environment variables.

/// Config bag for the answer pipeline. All fields have defaults via
/// `from_env`.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Passages fetched for a single-company question.
    pub single_top_n: u64,
    /// Passages fetched per company for a comparison question.
    pub comparison_top_n: u64,
    /// Upper cosine-distance bound on retrieval hits. The default keeps
    /// retrieval unbounded.
    pub max_distance: f32,
    /// Relevance checks in flight at once.
    pub filter_concurrency: usize,
    /// Per-company retrievals in flight at once.
    pub retrieve_concurrency: usize,
    /// Retry a relevance check once when the model returns empty output.
    pub retry_on_empty: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            single_top_n: 20,
            comparison_top_n: 10,
            max_distance: 999.0,
            filter_concurrency: 4,
            retrieve_concurrency: 4,
            retry_on_empty: true,
        }
    }
}

impl EngineConfig {
    /// Build from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            single_top_n: parse("ANSWER_SINGLE_TOP_N", 20),
            comparison_top_n: parse("ANSWER_COMPARISON_TOP_N", 10),
            max_distance: parse("ANSWER_MAX_DISTANCE", 999.0f32),
            filter_concurrency: parse("RELEVANCE_CONCURRENCY", 4usize),
            retrieve_concurrency: parse("RETRIEVE_CONCURRENCY", 4usize),
            retry_on_empty: env("RELEVANCE_RETRY_ON_EMPTY", "true") == "true",
        }
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k).unwrap_or_else(|_| dflt.to_string())
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_pipeline_contract() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.single_top_n, 20);
        assert_eq!(cfg.comparison_top_n, 10);
        assert_eq!(cfg.max_distance, 999.0);
        assert!(cfg.retry_on_empty);
    }
}
