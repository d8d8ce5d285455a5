//! Persona-aware answer prompt builder.

use crate::api_types::{Persona, RelevantPassage};

/// Short description of what the persona is after, shown in the prompt.
pub fn persona_description(persona: Option<Persona>) -> &'static str {
    match persona {
        Some(Persona::IndividualInvestor) => {
            "Seeking insights from financial reports to inform investment decisions."
        }
        Some(Persona::FinancialAnalyst) => {
            "Conducting in-depth analysis of financial data to provide insights and recommendations."
        }
        Some(Persona::SalesRepresentative) => {
            "Researching competitor strategies and market trends to inform sales strategies and market positioning."
        }
        None => "No description available.",
    }
}

/// Persona-specific closing request steering the analysis style.
pub fn persona_request(persona: Option<Persona>) -> &'static str {
    match persona {
        Some(Persona::IndividualInvestor) => {
            "Please generate insights and key trends from the reports to assist with investment decision-making."
        }
        Some(Persona::FinancialAnalyst) => {
            "Please provide in-depth analysis and financial metrics extracted from the reports to facilitate detailed financial modeling."
        }
        Some(Persona::SalesRepresentative) => {
            "Please identify competitor strategies, market trends, and other insights from the reports to inform sales strategies and market positioning."
        }
        None => {
            " Please generate a detailed analysis based on the information extracted from the reports."
        }
    }
}

/// Builds the final answer prompt from persona, query, companies, and the
/// relevant passage summaries.
///
/// An unrecognized persona name is kept in the header verbatim and falls
/// back to the generic description and request texts.
pub fn build_answer_prompt(
    persona_name: &str,
    query: &str,
    companies: &[String],
    passages: &[RelevantPassage],
) -> String {
    let persona = Persona::from_name(persona_name);
    let context = passages
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "User Persona: {persona_name} - {description}\n\
         User Query: {query}\n\
         Context: Analyzing 10-K and 10-Q reports of companies: {companies}.\n\
         source_documents: \n\
         {context}{request}",
        description = persona_description(persona),
        companies = companies.join(", "),
        request = persona_request(persona),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(content: &str) -> RelevantPassage {
        RelevantPassage {
            content: content.to_string(),
            source: "https://sec.gov/doc".to_string(),
        }
    }

    #[test]
    fn analyst_persona_gets_its_dedicated_texts() {
        let p = build_answer_prompt(
            "Financial Analyst",
            "What was revenue?",
            &["Acme Corp".to_string()],
            &[passage("Revenue was $10B.")],
        );
        assert!(p.starts_with(
            "User Persona: Financial Analyst - Conducting in-depth analysis of financial data"
        ));
        assert!(p.contains("User Query: What was revenue?"));
        assert!(p.contains("Analyzing 10-K and 10-Q reports of companies: Acme Corp."));
        assert!(p.contains("Revenue was $10B."));
        assert!(p.ends_with("to facilitate detailed financial modeling."));
    }

    #[test]
    fn unknown_persona_falls_back_to_generic_texts() {
        let p = build_answer_prompt(
            "Hedge Fund Manager",
            "q",
            &["Acme Corp".to_string()],
            &[passage("c")],
        );
        assert!(p.contains("User Persona: Hedge Fund Manager - No description available."));
        assert!(p.ends_with(
            "Please generate a detailed analysis based on the information extracted from the reports."
        ));
    }

    #[test]
    fn passages_are_joined_with_blank_lines() {
        let p = build_answer_prompt(
            "Individual Investor",
            "q",
            &["Acme Corp".to_string(), "Beta Inc".to_string()],
            &[passage("first"), passage("second")],
        );
        assert!(p.contains("first\n\nsecond"));
        assert!(p.contains("companies: Acme Corp, Beta Inc."));
    }
}
