//! Text completion implementations.

mod gemini;

pub use gemini::{GeminiCompletion, GeminiConfig};

use async_trait::async_trait;

use quill_core::ports::{CompletionError, TextCompletion};

/// Stand-in used when no API key is configured; every call fails.
pub struct UnavailableCompletion;

#[async_trait]
impl TextCompletion for UnavailableCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        Err(CompletionError::NotConfigured)
    }
}
