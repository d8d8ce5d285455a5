//! Web-search fallback via the connector endpoint.

use tracing::warn;

use crate::clients::ConnectorClient;

/// Builds the connector search query, widened with persona and companies
/// so the web results stay on topic.
pub fn search_query(query: &str, persona_name: &str, companies: &[String]) -> String {
    format!(
        "{query} related to user persona of {persona_name} and companies {}",
        companies.join(" ")
    )
}

/// Runs the web-search connector and extracts the generated answer.
///
/// The connector returns retrieved documents with the model's generated
/// text appended as the final document, so the last document's content is
/// the answer. Returns `None` when the connector fails or comes back
/// empty; the caller treats that as exhaustion, not as an error.
pub async fn web_search_answer(
    connector: &dyn ConnectorClient,
    query: &str,
    persona_name: &str,
    companies: &[String],
) -> Option<String> {
    let search = search_query(query, persona_name, companies);
    match connector.search(&search).await {
        Ok(docs) => docs.into_iter().last().map(|d| d.content),
        Err(e) => {
            warn!("web-search connector failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_includes_persona_and_companies() {
        let q = search_query(
            "What was revenue?",
            "Financial Analyst",
            &["Acme Corp".to_string(), "Beta Inc".to_string()],
        );
        assert_eq!(
            q,
            "What was revenue? related to user persona of Financial Analyst \
             and companies Acme Corp Beta Inc"
        );
    }
}
