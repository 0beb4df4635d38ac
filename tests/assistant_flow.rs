mod common;

use std::{sync::Arc, time::Duration};

use devtoolhub_api::{
    dto::chat::{ChatRequest, RecommendationRequest},
    error::AppError,
    seed::seed_store,
    services::assistant_service::{self, FALLBACK_MESSAGE},
    store::{MemoryStore, Store},
};
use serde_json::json;

use common::{FailingProvider, ScriptedProvider, SlowProvider, state_with};

fn chat(message: &str, session_id: &str) -> ChatRequest {
    serde_json::from_value(json!({ "message": message, "sessionId": session_id }))
        .expect("valid chat body")
}

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    seed_store(store.as_ref()).await.expect("seed");
    store
}

#[tokio::test]
async fn reply_uses_catalog_context_and_records_the_turn() -> anyhow::Result<()> {
    let store = seeded_store().await;
    let provider = Arc::new(ScriptedProvider::new(
        "Great question!\n- I recommend the Premium Wireless Headphones for travel\nEnjoy.",
    ));
    let state = state_with(store.clone(), provider.clone());

    let resp = assistant_service::reply(&state, chat("Which headphones?", "session-1")).await?;
    let reply = resp.data.expect("reply");
    assert!(reply.message.starts_with("Great question!"));
    assert_eq!(
        reply.recommendations,
        vec!["I recommend the Premium Wireless Headphones for travel".to_string()]
    );

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].user, "Which headphones?");
    assert_eq!(requests[0].max_tokens, 500);
    assert!(!requests[0].json_output);
    assert!(
        requests[0]
            .system
            .contains("Premium Wireless Headphones - Audio & Electronics - $299.00 - ")
    );

    let history = store.list_chat_messages("session-1").await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].message, "Which headphones?");
    assert_eq!(history[0].response, reply.message);
    Ok(())
}

#[tokio::test]
async fn provider_failure_degrades_to_fallback() -> anyhow::Result<()> {
    let store = seeded_store().await;
    let state = state_with(store.clone(), Arc::new(FailingProvider));

    let reply = assistant_service::reply(&state, chat("Hello", "session-2"))
        .await?
        .data
        .expect("reply");
    assert_eq!(reply.message, FALLBACK_MESSAGE);
    assert!(reply.recommendations.is_empty());

    let history = store.list_chat_messages("session-2").await?;
    assert!(history.is_empty());
    Ok(())
}

#[tokio::test]
async fn slow_provider_times_out_into_fallback() -> anyhow::Result<()> {
    let store = seeded_store().await;
    let mut state = state_with(
        store,
        Arc::new(SlowProvider {
            delay: Duration::from_secs(5),
        }),
    );
    state.provider_timeout = Duration::from_millis(50);

    let reply = assistant_service::reply(&state, chat("Anyone there?", "session-3"))
        .await?
        .data
        .expect("reply");
    assert_eq!(reply.message, FALLBACK_MESSAGE);
    Ok(())
}

#[tokio::test]
async fn invalid_chat_requests_are_rejected_before_the_provider() {
    let provider = Arc::new(ScriptedProvider::new("unused"));
    let state = state_with(Arc::new(MemoryStore::new()), provider.clone());

    let blank = assistant_service::reply(&state, chat("   ", "session")).await;
    assert!(matches!(blank, Err(AppError::InvalidInput(_))));

    let too_long = assistant_service::reply(&state, chat(&"x".repeat(2001), "session")).await;
    assert!(matches!(too_long, Err(AppError::InvalidInput(_))));

    let no_session = assistant_service::reply(&state, chat("Hi", "")).await;
    assert!(matches!(no_session, Err(AppError::InvalidInput(_))));

    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn history_is_returned_oldest_first_per_session() -> anyhow::Result<()> {
    let store = seeded_store().await;
    let state = state_with(
        store,
        Arc::new(ScriptedProvider::new("Happy to help with that.")),
    );

    for message in ["first", "second", "third"] {
        assistant_service::reply(&state, chat(message, "history-session")).await?;
    }
    assistant_service::reply(&state, chat("elsewhere", "other-session")).await?;

    let history = assistant_service::get_history(&state, "history-session")
        .await?
        .data
        .expect("history");
    let messages: Vec<_> = history.iter().map(|m| m.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);

    let unknown = assistant_service::get_history(&state, "never-used")
        .await?
        .data
        .expect("history");
    assert!(unknown.is_empty());
    Ok(())
}

#[tokio::test]
async fn recommendations_are_limited_to_catalog_names() -> anyhow::Result<()> {
    let store = seeded_store().await;
    let provider = Arc::new(ScriptedProvider::new(
        r#"{"recommendations": ["smart home hub", "Flux Capacitor", "Smart Fitness Tracker"]}"#,
    ));
    let state = state_with(store, provider.clone());

    let request: RecommendationRequest = serde_json::from_value(json!({ "query": "home gadgets" }))?;
    let list = assistant_service::recommend_products(&state, request)
        .await?
        .data
        .expect("recommendations");
    assert_eq!(
        list.recommendations,
        vec!["Smart Home Hub".to_string(), "Smart Fitness Tracker".to_string()]
    );

    let requests = provider.requests();
    assert!(requests[0].json_output);
    assert_eq!(requests[0].max_tokens, 200);
    Ok(())
}

#[tokio::test]
async fn unparseable_recommendations_become_an_empty_list() -> anyhow::Result<()> {
    let store = seeded_store().await;
    let state = state_with(store, Arc::new(ScriptedProvider::new("Sure! Try the hub.")));

    let request: RecommendationRequest = serde_json::from_value(json!({ "query": "anything" }))?;
    let list = assistant_service::recommend_products(&state, request)
        .await?
        .data
        .expect("recommendations");
    assert!(list.recommendations.is_empty());

    let blank: RecommendationRequest = serde_json::from_value(json!({ "query": "  " }))?;
    assert!(matches!(
        assistant_service::recommend_products(&state, blank).await,
        Err(AppError::InvalidInput(_))
    ));
    Ok(())
}
