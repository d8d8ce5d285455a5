//! Public API types re-used by external crates (e.g., the HTTP API layer).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize, Serializer};

/// A single answer request as received from the chat frontend.
///
/// `chat_history` is one serialized transcript string; the engine never
/// mutates session state, so the frontend owns the conversation.
#[derive(Clone, Debug, Deserialize)]
pub struct AskRequest {
    /// The user question.
    pub query: String,
    /// Prior conversation, already serialized to one string. Empty or
    /// absent means a fresh conversation.
    #[serde(default)]
    pub chat_history: Option<String>,
    /// Free-form persona name. Unrecognized names fall back to a generic
    /// analytical framing.
    #[serde(default = "default_persona")]
    pub persona: String,
    /// Companies the question is scoped to.
    #[serde(default = "default_companies")]
    pub companies: Vec<String>,
}

fn default_persona() -> String {
    "Individual Investor".to_string()
}

fn default_companies() -> Vec<String> {
    vec!["UNITEDHEALTH GROUP INC".to_string()]
}

/// Recognized user personas with dedicated prompt framing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persona {
    IndividualInvestor,
    FinancialAnalyst,
    SalesRepresentative,
}

impl Persona {
    /// Resolves a persona from its display name. `None` selects the
    /// generic prompt branch, it is not an error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Individual Investor" => Some(Self::IndividualInvestor),
            "Financial Analyst" => Some(Self::FinancialAnalyst),
            "Sales Representative" => Some(Self::SalesRepresentative),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::IndividualInvestor => "Individual Investor",
            Self::FinancialAnalyst => "Financial Analyst",
            Self::SalesRepresentative => "Sales Representative",
        }
    }
}

/// How the returned answer was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchType {
    /// Answer grounded in retrieved filing passages.
    Grounded,
    /// Answer produced by the web-search connector fallback.
    Connector,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grounded => "Grounded Search",
            Self::Connector => "Connector",
        }
    }
}

impl Serialize for SearchType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Citations attached to an answer.
///
/// Grounded answers carry the distinct set of filing URLs; fallback
/// answers carry the `"Web Search"` marker instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSet {
    Documents(BTreeSet<String>),
    WebSearch,
}

impl SourceSet {
    pub fn empty() -> Self {
        Self::Documents(BTreeSet::new())
    }
}

impl Serialize for SourceSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Documents(set) => set.serialize(serializer),
            Self::WebSearch => serializer.serialize_str("Web Search"),
        }
    }
}

/// Final pipeline output handed back to the frontend.
#[derive(Clone, Debug, Serialize)]
pub struct AnswerResult {
    pub answer: String,
    pub sources: SourceSet,
    /// `None` when no answer could be produced at all; serialized as an
    /// empty string for the frontend.
    #[serde(serialize_with = "serialize_search_type")]
    pub search_type: Option<SearchType>,
}

fn serialize_search_type<S: Serializer>(
    value: &Option<SearchType>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.map(|t| t.as_str()).unwrap_or(""))
}

/// A passage judged relevant, reduced to its extractive summary.
///
/// `source` always traces back to the filing URL of the passage the
/// summary was produced from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelevantPassage {
    pub content: String,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_resolution_is_exact() {
        assert_eq!(
            Persona::from_name("Financial Analyst"),
            Some(Persona::FinancialAnalyst)
        );
        assert_eq!(Persona::from_name("financial analyst"), None);
        assert_eq!(Persona::from_name("Hedge Fund Manager"), None);
    }

    #[test]
    fn grounded_result_serializes_sources_as_list() {
        let mut set = BTreeSet::new();
        set.insert("https://sec.gov/b".to_string());
        set.insert("https://sec.gov/a".to_string());
        let res = AnswerResult {
            answer: "ok".into(),
            sources: SourceSet::Documents(set),
            search_type: Some(SearchType::Grounded),
        };
        let v = serde_json::to_value(&res).unwrap();
        assert_eq!(
            v["sources"],
            serde_json::json!(["https://sec.gov/a", "https://sec.gov/b"])
        );
        assert_eq!(v["search_type"], "Grounded Search");
    }

    #[test]
    fn fallback_result_serializes_web_search_marker() {
        let res = AnswerResult {
            answer: "from the web".into(),
            sources: SourceSet::WebSearch,
            search_type: Some(SearchType::Connector),
        };
        let v = serde_json::to_value(&res).unwrap();
        assert_eq!(v["sources"], "Web Search");
        assert_eq!(v["search_type"], "Connector");
    }

    #[test]
    fn exhausted_result_serializes_empty_search_type() {
        let res = AnswerResult {
            answer: "No relevant information found. Please try again later.".into(),
            sources: SourceSet::empty(),
            search_type: None,
        };
        let v = serde_json::to_value(&res).unwrap();
        assert_eq!(v["sources"], serde_json::json!([]));
        assert_eq!(v["search_type"], "");
    }

    #[test]
    fn request_defaults_apply() {
        let req: AskRequest = serde_json::from_str(r#"{"query":"What was revenue?"}"#).unwrap();
        assert_eq!(req.persona, "Individual Investor");
        assert_eq!(req.companies, vec!["UNITEDHEALTH GROUP INC".to_string()]);
        assert!(req.chat_history.is_none());
    }
}
