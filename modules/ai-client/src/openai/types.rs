use serde::{Deserialize, Serialize};

use crate::traits::{Message, MessageRole};

// =============================================================================
// Chat Completion
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WireMessage {
    pub role: Role,
    #[serde(default)]
    pub content: Option<String>,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::System => Role::System,
            MessageRole::User => Role::User,
        };
        Self {
            role,
            content: Some(message.content.clone()),
        }
    }
}

// =============================================================================
// Chat Request
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            max_tokens: None,
            max_completion_tokens: None,
        }
    }

    pub fn messages(mut self, messages: impl IntoIterator<Item = WireMessage>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Reasoning models reject `max_tokens`; route the budget to the field the
    /// model accepts.
    pub fn output_budget(mut self, tokens: u32) -> Self {
        if uses_max_completion_tokens(&self.model) {
            self.max_completion_tokens = Some(tokens);
        } else {
            self.max_tokens = Some(tokens);
        }
        self
    }
}

// =============================================================================
// Chat Response
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Choice {
    pub message: WireMessage,
}

// =============================================================================
// Utilities
// =============================================================================

/// Check if a model requires max_completion_tokens instead of max_tokens.
pub(crate) fn uses_max_completion_tokens(model: &str) -> bool {
    model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("gpt-5")
        || model.contains("-o1")
        || model.contains("-o3")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_goes_to_max_tokens_for_chat_models() {
        let request = ChatRequest::new("gpt-4o-mini").output_budget(512);
        assert_eq!(request.max_tokens, Some(512));
        assert_eq!(request.max_completion_tokens, None);
    }

    #[test]
    fn budget_goes_to_max_completion_tokens_for_reasoning_models() {
        let request = ChatRequest::new("o3-mini").output_budget(512);
        assert_eq!(request.max_tokens, None);
        assert_eq!(request.max_completion_tokens, Some(512));
    }

    #[test]
    fn response_with_null_content_deserializes() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null},"finish_reason":"stop"}]}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }
}
