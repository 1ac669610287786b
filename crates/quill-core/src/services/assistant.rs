//! Writing assistant backed by a text-completion collaborator.

use std::sync::Arc;

use crate::domain::{Section, chat_prompt, section_prompt};
use crate::error::DomainError;
use crate::ports::TextCompletion;

pub struct AssistantService {
    completion: Arc<dyn TextCompletion>,
}

impl AssistantService {
    pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
        Self { completion }
    }

    /// Draft one section of a post from its title.
    pub async fn draft_section(&self, title: &str, section: Section) -> Result<String, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::missing("title"));
        }
        tracing::debug!(%section, "Drafting post section");
        self.complete(&section_prompt(title, section)).await
    }

    /// Answer a visitor question.
    pub async fn answer(&self, message: &str) -> Result<String, DomainError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::missing("message"));
        }
        self.complete(&chat_prompt(message)).await
    }

    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        self.completion.complete(prompt).await.map_err(|e| {
            tracing::error!(error = %e, "Text completion failed");
            DomainError::Upstream(e.to_string())
        })
    }
}
