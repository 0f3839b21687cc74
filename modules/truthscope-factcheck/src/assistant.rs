use std::sync::Arc;

use ai_client::{ChatCompletion, CompletionRequest};
use tracing::warn;
use truthscope_common::config::DEFAULT_CHAT_MODEL;
use truthscope_common::TruthScopeError;

const ASSISTANT_PROMPT: &str = "You are TruthScope, an AI fact-checking assistant. \
Answer clearly and cite evidence when possible.";

/// One-shot chat proxy with a fact-checking persona.
pub struct ChatAssistant {
    model: Option<Arc<dyn ChatCompletion>>,
    model_name: String,
}

impl ChatAssistant {
    pub fn new(model: Option<Arc<dyn ChatCompletion>>) -> Self {
        Self {
            model,
            model_name: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    pub async fn reply(&self, message: &str) -> Result<String, TruthScopeError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(TruthScopeError::Validation("No message provided".into()));
        }
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| TruthScopeError::NotConfigured("OPENAI_API_KEY not set".into()))?;

        let request = CompletionRequest::new(&self.model_name)
            .system(ASSISTANT_PROMPT)
            .user(message);

        model.complete(request).await.map_err(|e| {
            warn!(model = %self.model_name, error = %e, "assistant: completion failed");
            TruthScopeError::Provider(e.to_string())
        })
    }
}
