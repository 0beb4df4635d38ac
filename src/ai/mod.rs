//! Text-generation provider boundary used by the shopping assistant.

use async_trait::async_trait;
use thiserror::Error;

pub mod openai;

pub use openai::OpenAiProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider API key is not configured")]
    MissingApiKey,

    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned no content")]
    EmptyResponse,

    #[error("provider call timed out")]
    Timeout,
}

/// One single-turn generation: a system instruction and a user message.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    /// Ask the provider for a JSON object instead of free text.
    pub json_output: bool,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;
}
