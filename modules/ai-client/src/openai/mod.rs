mod client;
pub(crate) mod types;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::AiError;
use crate::traits::{ChatCompletion, CompletionRequest};

use client::{OpenAiClient, OPENAI_API_URL};
use types::{ChatRequest, WireMessage};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// =============================================================================
// OpenAi
// =============================================================================

/// Chat-completion client for the OpenAI API (or any compatible endpoint).
#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    base_url: Option<String>,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(OPENAI_API_URL)
    }

    fn client(&self) -> Result<OpenAiClient, AiError> {
        OpenAiClient::new(&self.api_key, self.base_url(), REQUEST_TIMEOUT)
    }
}

#[async_trait]
impl ChatCompletion for OpenAi {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
        let mut wire = ChatRequest::new(&request.model)
            .messages(request.messages.iter().map(WireMessage::from));

        if let Some(tokens) = request.max_tokens {
            wire = wire.output_budget(tokens);
        }

        let response = self.client()?.chat(&wire).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AiError::EmptyCompletion(format!("no choices from {}", request.model)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn defaults_to_public_endpoint() {
        let ai = OpenAi::new("sk-test");
        assert_eq!(ai.api_key(), "sk-test");
        assert_eq!(ai.base_url(), "https://api.openai.com/v1");
    }

    #[test]
    fn base_url_override() {
        let ai = OpenAi::new("sk-test").with_base_url("https://proxy.internal/v1");
        assert_eq!(ai.base_url(), "https://proxy.internal/v1");
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let router = Router::new().route(
            "/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], "gpt-4o-mini");
                assert_eq!(body["max_tokens"], 512);
                assert_eq!(body["messages"][0]["role"], "system");
                Json(json!({
                    "choices": [{
                        "message": {"role": "assistant", "content": "Verified Real."},
                        "finish_reason": "stop"
                    }]
                }))
            }),
        );
        let base = serve(router).await;

        let ai = OpenAi::new("sk-test").with_base_url(base);
        let request = CompletionRequest::new("gpt-4o-mini")
            .system("fact-check")
            .user("claim")
            .max_tokens(512);

        assert_eq!(ai.complete(request).await.unwrap(), "Verified Real.");
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { (axum::http::StatusCode::NOT_FOUND, "model_not_found") }),
        );
        let base = serve(router).await;

        let ai = OpenAi::new("sk-test").with_base_url(base);
        let err = ai
            .complete(CompletionRequest::new("gpt-4o-mini").user("claim"))
            .await
            .unwrap_err();

        match err {
            AiError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "model_not_found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let base = serve(router).await;

        let ai = OpenAi::new("sk-test").with_base_url(base);
        let err = ai
            .complete(CompletionRequest::new("gpt-4o-mini").user("claim"))
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::EmptyCompletion(_)));
    }
}
