//! Text completion port - a hosted generative-text model.

use async_trait::async_trait;

#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Send a prompt and return the generated text.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Completion service not configured")]
    NotConfigured,

    #[error("Completion request failed: {0}")]
    Transport(String),

    #[error("Completion service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion response had no text")]
    EmptyResponse,
}
