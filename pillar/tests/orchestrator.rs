//! Orchestrator end to end over [`MockBackend`]: one grounded request per topic, sources
//! attached, backend and parse failures surfaced unchanged.


use std::sync::Arc;

use pillar::{
    BackendError, KeywordDifficulty, MockBackend, Orchestrator, ParseFailure, SearchIntent,
    Session, SessionState, StrategyError,
};

const FIXTURE: &str = include_str!("fixtures/generate_content.json");
const NO_PAYLOAD_FIXTURE: &str = include_str!("fixtures/no_payload.json");

#[tokio::test]
async fn sends_one_grounded_request_naming_the_topic() {
    let backend = Arc::new(MockBackend::from_generate_content_body(FIXTURE).unwrap());
    let orchestrator = Orchestrator::new(backend.clone());

    orchestrator
        .generate("Sustainable Coffee Farming")
        .await
        .unwrap();

    assert_eq!(backend.call_count(), 1);
    let request = &backend.requests()[0];
    assert!(request.web_search, "search grounding must be enabled");
    assert!(request.instruction.contains("Sustainable Coffee Farming"));
    assert!(request.instruction.contains("```json"));
}

#[tokio::test]
async fn replayed_response_becomes_a_full_strategy() {
    let backend = Arc::new(MockBackend::from_generate_content_body(FIXTURE).unwrap());
    let strategy = Orchestrator::new(backend)
        .generate("Sustainable Coffee Farming")
        .await
        .unwrap();

    assert_eq!(
        strategy.pillar.page_title,
        "Sustainable Coffee Farming: The Complete Guide"
    );
    assert_eq!(strategy.sub_pillars.len(), 10);
    let first = &strategy.sub_pillars[0];
    assert_eq!(first.primary_keyword, "coffee farm certification");
    assert_eq!(first.keyword_difficulty, KeywordDifficulty::Medium);
    assert_eq!(first.search_intent, SearchIntent::Informational);
    assert_eq!(
        strategy.sub_pillars[9].search_intent,
        SearchIntent::Navigational
    );

    let titles: Vec<&str> = strategy.sources.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["worldcoffeeresearch.org", "rainforest-alliance.org", "Source"]
    );
}

#[tokio::test]
async fn backend_failure_is_surfaced_unchanged() {
    let backend = Arc::new(MockBackend::failing(BackendError::Api {
        status: 429,
        body: "quota exceeded".into(),
    }));
    let err = Orchestrator::new(backend.clone())
        .generate("coffee")
        .await
        .unwrap_err();

    assert_eq!(backend.call_count(), 1, "no retry");
    match &err {
        StrategyError::Backend(BackendError::Api { status, body }) => {
            assert_eq!(*status, 429);
            assert_eq!(body, "quota exceeded");
        }
        other => panic!("expected backend error, got {:?}", other),
    }
    assert!(err.to_string().contains("quota exceeded"));
}

#[tokio::test]
async fn refusal_text_is_a_parse_failure() {
    let backend = Arc::new(MockBackend::from_generate_content_body(NO_PAYLOAD_FIXTURE).unwrap());
    let err = Orchestrator::new(backend)
        .generate("coffee")
        .await
        .unwrap_err();
    assert_eq!(err, StrategyError::Parse(ParseFailure::NoPayload));
}

#[tokio::test]
async fn session_runs_through_to_ready_then_failed() {
    let ok = Orchestrator::new(Arc::new(
        MockBackend::from_generate_content_body(FIXTURE).unwrap(),
    ));
    let failing = Orchestrator::new(Arc::new(MockBackend::failing(BackendError::Transport(
        "connection reset".into(),
    ))));

    let mut session = Session::new();
    let state = session.run(&ok, "  Sustainable Coffee Farming ").await.unwrap();
    assert!(matches!(state, SessionState::Ready { topic, .. } if topic == "Sustainable Coffee Farming"));
    assert_eq!(session.strategy().map(|s| s.sub_pillars.len()), Some(10));

    session.run(&failing, "coffee").await.unwrap();
    assert!(session.strategy().is_none());
    assert!(session.error().unwrap().contains("connection reset"));
}

#[tokio::test]
async fn empty_topic_never_reaches_the_backend() {
    let backend = Arc::new(MockBackend::with_text("{}"));
    let orchestrator = Orchestrator::new(backend.clone());
    let mut session = Session::new();
    assert!(session.run(&orchestrator, "   ").await.is_err());
    assert_eq!(backend.call_count(), 0);
}
