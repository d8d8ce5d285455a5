//! End-to-end pipeline tests against stub clients.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::{future::Future, pin::Pin};

use answer_engine::{
    AnswerEngine, AskRequest, ConnectorClient, EngineConfig, EngineError, GenerationClient,
    NO_RESULT_MESSAGE, PassageRetriever, SearchType, SourceSet,
};
use filing_store::{Passage, StoreError};
use llm_service::ConnectorDocument;

/// Generation stub driven by a closure inspecting the prompt.
struct FnGeneration<F>(F);

impl<F> GenerationClient for FnGeneration<F>
where
    F: Fn(&str) -> Result<String, EngineError> + Send + Sync,
{
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, EngineError>> + Send + 'a>> {
        let out = (self.0)(prompt);
        Box::pin(async move { out })
    }
}

/// Retriever stub returning canned passages per query, recording calls.
#[derive(Default)]
struct StubRetriever {
    results: HashMap<String, Vec<Passage>>,
    fail: bool,
    calls: Mutex<Vec<(String, Vec<String>, u64)>>,
}

impl PassageRetriever for StubRetriever {
    fn retrieve<'a>(
        &'a self,
        query: &'a str,
        companies: &'a [String],
        top_n: u64,
        _max_distance: f32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Passage>, EngineError>> + Send + 'a>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), companies.to_vec(), top_n));
        let out = if self.fail {
            Err(EngineError::Store(StoreError::Qdrant("down".into())))
        } else {
            Ok(self.results.get(query).cloned().unwrap_or_default())
        };
        Box::pin(async move { out })
    }
}

/// Connector stub with canned documents, recording the search query.
#[derive(Default)]
struct StubConnector {
    docs: Vec<ConnectorDocument>,
    calls: Mutex<Vec<String>>,
}

impl ConnectorClient for StubConnector {
    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ConnectorDocument>, EngineError>> + Send + 'a>>
    {
        self.calls.lock().unwrap().push(query.to_string());
        let docs = self.docs.clone();
        Box::pin(async move { Ok(docs) })
    }
}

fn passage(content: &str, source: &str, company: &str) -> Passage {
    Passage {
        content: content.to_string(),
        source: source.to_string(),
        company: company.to_string(),
        section_summary: None,
    }
}

/// Generation behavior: summaries for relevant content, the sentinel for
/// anything containing "boilerplate", a fixed composed answer.
fn default_generation() -> Arc<dyn GenerationClient> {
    Arc::new(FnGeneration(|prompt: &str| {
        if prompt.starts_with("If Document_Content") {
            if prompt.contains("boilerplate") {
                Ok("irrelevant".to_string())
            } else {
                Ok("extracted summary".to_string())
            }
        } else if prompt.starts_with("User Persona:") {
            Ok("Grounded answer.".to_string())
        } else {
            Ok("Refined question?".to_string())
        }
    }))
}

fn request(query: &str, companies: &[&str]) -> AskRequest {
    AskRequest {
        query: query.to_string(),
        chat_history: None,
        persona: "Individual Investor".to_string(),
        companies: companies.iter().map(|s| s.to_string()).collect(),
    }
}

#[tokio::test]
async fn grounded_single_company_flow() {
    let query = "What was Acme's revenue?";
    let retriever = Arc::new(StubRetriever {
        results: HashMap::from([(
            query.to_string(),
            vec![
                passage("Revenue was $10B.", "https://sec.gov/a", "Acme Corp"),
                passage("Revenue grew 12%.", "https://sec.gov/b", "Acme Corp"),
            ],
        )]),
        ..Default::default()
    });
    let connector = Arc::new(StubConnector::default());
    let engine = AnswerEngine::new(
        default_generation(),
        retriever.clone(),
        connector.clone(),
        EngineConfig::default(),
    );

    let res = engine.answer(&request(query, &["Acme Corp"])).await;

    assert_eq!(res.answer, "Grounded answer.");
    assert_eq!(res.search_type, Some(SearchType::Grounded));
    match &res.sources {
        SourceSet::Documents(set) => {
            assert_eq!(set.len(), 2);
            assert!(set.contains("https://sec.gov/a"));
            assert!(set.contains("https://sec.gov/b"));
        }
        SourceSet::WebSearch => panic!("expected grounded sources"),
    }

    let calls = retriever.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, vec!["Acme Corp".to_string()]);
    assert_eq!(calls[0].2, 20);
    assert!(connector.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn comparison_fans_out_per_company() {
    let acme_query = answer_engine::plan(
        "",
        &["Acme Corp".to_string(), "Beta Inc".to_string()],
        None,
    )[0]
    .query_text
    .clone();
    let beta_query = answer_engine::plan(
        "",
        &["Acme Corp".to_string(), "Beta Inc".to_string()],
        None,
    )[1]
    .query_text
    .clone();

    let retriever = Arc::new(StubRetriever {
        results: HashMap::from([
            (
                acme_query.clone(),
                vec![passage("Acme revenue $10B.", "https://sec.gov/a", "Acme Corp")],
            ),
            (
                beta_query.clone(),
                vec![passage("Beta revenue $7B.", "https://sec.gov/b", "Beta Inc")],
            ),
        ]),
        ..Default::default()
    });
    let connector = Arc::new(StubConnector::default());
    let engine = AnswerEngine::new(
        default_generation(),
        retriever.clone(),
        connector.clone(),
        EngineConfig::default(),
    );

    let res = engine
        .answer(&request("Compare revenues", &["Acme Corp", "Beta Inc"]))
        .await;

    assert_eq!(res.search_type, Some(SearchType::Grounded));
    let calls = retriever.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    for (query, scope, top_n) in calls.iter() {
        assert!(query.starts_with("Extract the following metrics for"));
        assert!(query.contains("Debt to Equity Ratio"));
        assert_eq!(scope.len(), 1);
        assert_eq!(*top_n, 10);
    }
    assert_eq!(calls[0].1, vec!["Acme Corp".to_string()]);
    assert_eq!(calls[1].1, vec!["Beta Inc".to_string()]);
}

#[tokio::test]
async fn duplicate_content_across_companies_is_deduplicated() {
    let planned = answer_engine::plan(
        "",
        &["Acme Corp".to_string(), "Beta Inc".to_string()],
        None,
    );
    let retriever = Arc::new(StubRetriever {
        results: HashMap::from([
            (
                planned[0].query_text.clone(),
                vec![passage("shared index page", "https://sec.gov/a", "Acme Corp")],
            ),
            (
                planned[1].query_text.clone(),
                vec![passage("shared index page", "https://sec.gov/b", "Beta Inc")],
            ),
        ]),
        ..Default::default()
    });
    let engine = AnswerEngine::new(
        default_generation(),
        retriever,
        Arc::new(StubConnector::default()),
        EngineConfig::default(),
    );

    let res = engine
        .answer(&request("Compare", &["Acme Corp", "Beta Inc"]))
        .await;

    match &res.sources {
        SourceSet::Documents(set) => {
            assert_eq!(set.len(), 1);
            assert!(set.contains("https://sec.gov/a"));
        }
        SourceSet::WebSearch => panic!("expected grounded sources"),
    }
}

#[tokio::test]
async fn empty_retrieval_falls_back_to_web_search() {
    let connector = Arc::new(StubConnector {
        docs: vec![
            ConnectorDocument {
                content: "web snippet".to_string(),
                source: Some("https://example.com".to_string()),
            },
            ConnectorDocument {
                content: "Generated web answer.".to_string(),
                source: None,
            },
        ],
        ..Default::default()
    });
    let engine = AnswerEngine::new(
        default_generation(),
        Arc::new(StubRetriever::default()),
        connector.clone(),
        EngineConfig::default(),
    );

    let res = engine
        .answer(&request("What was revenue?", &["Acme Corp"]))
        .await;

    assert_eq!(res.answer, "Generated web answer.");
    assert_eq!(res.sources, SourceSet::WebSearch);
    assert_eq!(res.search_type, Some(SearchType::Connector));

    let calls = connector.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        "What was revenue? related to user persona of Individual Investor \
         and companies Acme Corp"
    );
}

#[tokio::test]
async fn all_passages_filtered_out_falls_back_to_web_search() {
    let query = "What was revenue?";
    let retriever = Arc::new(StubRetriever {
        results: HashMap::from([(
            query.to_string(),
            vec![passage("legal boilerplate", "https://sec.gov/a", "Acme Corp")],
        )]),
        ..Default::default()
    });
    let connector = Arc::new(StubConnector {
        docs: vec![ConnectorDocument {
            content: "Web fallback answer.".to_string(),
            source: None,
        }],
        ..Default::default()
    });
    let engine = AnswerEngine::new(
        default_generation(),
        retriever,
        connector.clone(),
        EngineConfig::default(),
    );

    let res = engine.answer(&request(query, &["Acme Corp"])).await;

    assert_eq!(res.answer, "Web fallback answer.");
    assert_eq!(res.sources, SourceSet::WebSearch);
    assert_eq!(res.search_type, Some(SearchType::Connector));
    assert_eq!(connector.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn retrieval_failure_behaves_like_empty_retrieval() {
    let retriever = Arc::new(StubRetriever {
        fail: true,
        ..Default::default()
    });
    let connector = Arc::new(StubConnector {
        docs: vec![ConnectorDocument {
            content: "Web answer.".to_string(),
            source: None,
        }],
        ..Default::default()
    });
    let engine = AnswerEngine::new(
        default_generation(),
        retriever,
        connector.clone(),
        EngineConfig::default(),
    );

    let res = engine
        .answer(&request("What was revenue?", &["Acme Corp"]))
        .await;

    assert_eq!(res.search_type, Some(SearchType::Connector));
    assert_eq!(connector.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn total_exhaustion_yields_the_fixed_message() {
    let engine = AnswerEngine::new(
        default_generation(),
        Arc::new(StubRetriever::default()),
        Arc::new(StubConnector::default()),
        EngineConfig::default(),
    );

    let res = engine
        .answer(&request("What was revenue?", &["Acme Corp"]))
        .await;

    assert_eq!(res.answer, NO_RESULT_MESSAGE);
    assert_eq!(res.sources, SourceSet::empty());
    assert!(res.search_type.is_none());
}

#[tokio::test]
async fn chat_history_triggers_query_refinement() {
    let refined = "Refined question?";
    let retriever = Arc::new(StubRetriever {
        results: HashMap::from([(
            refined.to_string(),
            vec![passage("Revenue was $10B.", "https://sec.gov/a", "Acme Corp")],
        )]),
        ..Default::default()
    });
    let engine = AnswerEngine::new(
        default_generation(),
        retriever.clone(),
        Arc::new(StubConnector::default()),
        EngineConfig::default(),
    );

    let mut req = request("what about revenue?", &["Acme Corp"]);
    req.chat_history = Some("User: tell me about Acme.\nAssistant: Acme files 10-Ks.".to_string());
    let res = engine.answer(&req).await;

    assert_eq!(res.search_type, Some(SearchType::Grounded));
    let calls = retriever.calls.lock().unwrap();
    assert_eq!(calls[0].0, refined);
}

#[tokio::test]
async fn fresh_conversation_skips_refinement() {
    let query = "What was revenue?";
    let retriever = Arc::new(StubRetriever {
        results: HashMap::from([(
            query.to_string(),
            vec![passage("Revenue was $10B.", "https://sec.gov/a", "Acme Corp")],
        )]),
        ..Default::default()
    });
    let engine = AnswerEngine::new(
        default_generation(),
        retriever.clone(),
        Arc::new(StubConnector::default()),
        EngineConfig::default(),
    );

    engine.answer(&request(query, &["Acme Corp"])).await;

    let calls = retriever.calls.lock().unwrap();
    assert_eq!(calls[0].0, query);
}
