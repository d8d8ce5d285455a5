//! Grounded answer composition.

use crate::api_types::RelevantPassage;
use crate::clients::GenerationClient;
use crate::error::EngineError;
use crate::prompt;

/// Composes the final grounded answer from the relevant passages.
///
/// Callers must not reach this step with an empty passage list; the
/// fallback branch handles that case before composition.
pub async fn compose_answer(
    generation: &dyn GenerationClient,
    persona_name: &str,
    query: &str,
    companies: &[String],
    passages: &[RelevantPassage],
) -> Result<String, EngineError> {
    debug_assert!(!passages.is_empty(), "compose called without passages");

    let prompt = prompt::build_answer_prompt(persona_name, query, companies, passages);
    generation.generate(&prompt).await
}
