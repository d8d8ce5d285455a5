//! Conversational query refinement.
//!
//! A follow-up question ("what about their debt?") only makes sense with
//! the transcript; this step rewrites it into a self-contained question
//! before retrieval.

use tracing::warn;

use crate::clients::GenerationClient;

/// Prompt asking the model to rewrite the conversation into one question.
pub fn refine_prompt(combined_history: &str) -> String {
    format!(
        "You are an intelligent assistant for generating the most concise and accurate \
         user query based on the chat history.\n\
         Use the following pieces of context to generate the new user query.\n\
         Use two sentences maximum and keep the answer concise.\n\
         User Query should be in a form of a question.\n\
         Chat History: {combined_history}\n\
         User Query:"
    )
}

/// Rewrites `query` into a standalone question when history is present.
///
/// With empty or absent history the query is returned unchanged. A failed
/// or empty model call also falls back to the raw query; refinement is
/// best-effort and never fails the request.
pub async fn refine_query(
    generation: &dyn GenerationClient,
    query: &str,
    chat_history: Option<&str>,
) -> String {
    let Some(history) = chat_history.filter(|h| !h.is_empty()) else {
        return query.to_string();
    };

    let combined = format!("{history}\n{query}");
    match generation.generate(&refine_prompt(&combined)).await {
        Ok(refined) if !refined.trim().is_empty() => refined,
        Ok(_) => {
            warn!("query refinement returned empty output, using raw query");
            query.to_string()
        }
        Err(e) => {
            warn!("query refinement failed, using raw query: {e}");
            query.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_the_combined_history() {
        let p = refine_prompt("User: hello\nAssistant: hi\nwhat about debt?");
        assert!(p.contains("Chat History: User: hello"));
        assert!(p.ends_with("User Query:"));
    }
}
