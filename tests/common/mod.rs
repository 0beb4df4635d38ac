#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

use async_trait::async_trait;
use devtoolhub_api::{
    ai::{GenerationRequest, ProviderError, TextGenerator},
    config::AuthConfig,
    services::auth_service::hash_password,
    state::AppState,
    store::{MemoryStore, Store},
};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse";

/// Always fails, as an unreachable provider would.
pub struct FailingProvider;

#[async_trait]
impl TextGenerator for FailingProvider {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, ProviderError> {
        Err(ProviderError::Status {
            status: 503,
            body: "upstream unavailable".into(),
        })
    }
}

/// Answers only after `delay`.
pub struct SlowProvider {
    pub delay: Duration,
}

#[async_trait]
impl TextGenerator for SlowProvider {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok("I recommend waiting a little longer next time".into())
    }
}

/// Returns a fixed reply and records every request it receives.
pub struct ScriptedProvider {
    reply: String,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request);
        Ok(self.reply.clone())
    }
}

// Argon2 is slow in debug builds; hash once per test binary.
pub fn auth_config() -> AuthConfig {
    static HASH: OnceLock<String> = OnceLock::new();
    let hash = HASH.get_or_init(|| hash_password(ADMIN_PASSWORD).unwrap());
    AuthConfig {
        jwt_secret: "integration-test-secret".into(),
        admin_username: ADMIN_USERNAME.into(),
        admin_password_hash: Some(hash.clone()),
    }
}

pub fn state_with(store: Arc<dyn Store>, provider: Arc<dyn TextGenerator>) -> AppState {
    AppState {
        store,
        provider,
        auth: Arc::new(auth_config()),
        provider_timeout: Duration::from_millis(200),
    }
}

/// Empty in-memory store with a provider that always fails.
pub fn memory_state() -> AppState {
    state_with(Arc::new(MemoryStore::new()), Arc::new(FailingProvider))
}

pub fn product_json(name: &str, category: &str, price: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": format!("{name} for everyday development work"),
        "category": category,
        "price": price,
        "imageUrl": "https://example.com/img.png",
        "affiliateUrl": "https://example.com/buy",
    })
}

pub fn post_json(title: &str, slug: &str, category: &str, published: bool) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "slug": slug,
        "excerpt": "Short summary",
        "content": "Long body text",
        "category": category,
        "imageUrl": "https://example.com/cover.png",
        "tags": ["rust"],
        "isPublished": published,
    })
}
