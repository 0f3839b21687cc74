use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::warn;

use truthscope_common::TruthScopeError;

use crate::AppState;

const DEFAULT_COUNTRY: &str = "us";

// --- Request structs ---

#[derive(Deserialize)]
pub struct CheckRequest {
    headline: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    message: Option<String>,
}

#[derive(Deserialize)]
pub struct TrustedQuery {
    country: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

// --- Helpers ---

fn error(status: StatusCode, message: &str) -> axum::response::Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Trimmed, non-empty field from a JSON body that may not have parsed.
fn required<T>(
    body: Result<Json<T>, JsonRejection>,
    field: impl Fn(T) -> Option<String>,
) -> Option<String> {
    body.ok()
        .and_then(|Json(b)| field(b))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// --- Handlers ---

pub async fn api_check_news(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Some(headline) = required(body, |b| b.headline) else {
        return error(StatusCode::BAD_REQUEST, "No headline provided");
    };

    let result = state.service.checker.check(&headline).await;
    Json(result).into_response()
}

pub async fn api_trusted_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrustedQuery>,
) -> impl IntoResponse {
    let country = params
        .country
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

    Json(state.service.headlines.trusted(&country).await)
}

pub async fn api_search_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let query = params.q.unwrap_or_default();
    Json(state.service.headlines.search(&query).await)
}

pub async fn api_chatbot(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> impl IntoResponse {
    let message = required(body, |b| b.message).unwrap_or_default();

    match state.service.assistant.reply(&message).await {
        Ok(response) => Json(serde_json::json!({ "response": response })).into_response(),
        Err(TruthScopeError::Validation(_)) => {
            error(StatusCode::BAD_REQUEST, "No message provided")
        }
        Err(e @ TruthScopeError::NotConfigured(_)) => {
            warn!(error = %e, "chatbot unavailable");
            error(StatusCode::SERVICE_UNAVAILABLE, &e.to_string())
        }
        Err(e) => {
            warn!(error = %e, "chatbot failed");
            error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use truthscope_factcheck::headlines::{HeadlineProvider, NewsSearch};
    use truthscope_factcheck::testing::*;
    use truthscope_factcheck::{
        ChatAssistant, EvidenceCollector, EvidenceProvider, FactCheckService, FactChecker,
        FeedCache, TrustedHeadlines, VerdictSummarizer,
    };

    use crate::{router, AppState};

    const BBC: &str = "https://feeds.bbci.co.uk/news/rss.xml";

    fn state(chat: Option<MockChat>) -> Arc<AppState> {
        let feeds = MockFeedSource::new().on_feed(
            BBC,
            vec![entry("Economy grows by 3% in Q2", "https://bbc.co.uk/news/business-1")],
        );
        let cache = Arc::new(
            FeedCache::new(Arc::new(feeds), Arc::new(FixedClock::default()), 100).with_urls([BBC]),
        );
        let model = chat.map(|c| Arc::new(c) as Arc<dyn ai_client::ChatCompletion>);

        let evidence: Vec<Box<dyn EvidenceProvider>> = vec![];
        let headline_providers: Vec<Box<dyn HeadlineProvider>> = vec![Box::new(
            MockProvider::new("NewsAPI").returning(vec![article("Rates held", "https://n/1")]),
        )];
        let search: Option<Box<dyn NewsSearch>> = Some(Box::new(
            MockProvider::new("NewsAPI")
                .returning(vec![article("Storm batters coast", "https://n/2")]),
        ));

        let service = FactCheckService::new(
            FactChecker::new(
                EvidenceCollector::new(cache.clone(), evidence),
                VerdictSummarizer::new(model.clone()),
            ),
            TrustedHeadlines::new(headline_providers, search, cache),
            ChatAssistant::new(model),
        );
        Arc::new(AppState { service })
    }

    async fn send(
        state: Arc<AppState>,
        request: Request<Body>,
    ) -> (StatusCode, Option<String>, Value) {
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let cache_control = response
            .headers()
            .get(header::CACHE_CONTROL)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, cache_control, body)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn check_news_returns_verdict_and_evidence() {
        let chat = MockChat::new().reply("Verified: the BBC reported 3% growth.");
        let (status, cache_control, body) = send(
            state(Some(chat)),
            post_json("/check_news", r#"{"headline": "Economy grew 3% last quarter"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["verdict"], "Verified Real");
        assert_eq!(
            body["evidence"][0],
            "Economy grows by 3% in Q2 (https://bbc.co.uk/news/business-1)"
        );
        assert_eq!(body["explanation"], "Verified: the BBC reported 3% growth.");
    }

    #[tokio::test]
    async fn check_news_without_headline_is_bad_request() {
        for payload in [r#"{}"#, r#"{"headline": "   "}"#, "not json"] {
            let (status, _, body) = send(state(None), post_json("/check_news", payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload:?}");
            assert_eq!(body["error"], "No headline provided");
        }
    }

    #[tokio::test]
    async fn trusted_news_lists_provider_headlines() {
        let (status, _, body) = send(state(None), get("/trusted_news?country=gb")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["headline"], "Rates held");
        assert_eq!(body[0]["url"], "https://n/1");
    }

    #[tokio::test]
    async fn search_news_maps_results() {
        let (status, _, body) = send(state(None), get("/search_news?q=storm")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["headline"], "Storm batters coast");
    }

    #[tokio::test]
    async fn chatbot_status_codes() {
        let (status, _, body) = send(
            state(Some(MockChat::new().reply("Happy to help."))),
            post_json("/chatbot", r#"{"message": "Is this real?"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Happy to help.");

        let (status, _, body) = send(state(None), post_json("/chatbot", r#"{}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No message provided");

        let (status, _, _) = send(state(None), post_json("/chatbot", r#"{"message": "hi"}"#)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, _, _) = send(
            state(Some(MockChat::new().fail("overloaded"))),
            post_json("/chatbot", r#"{"message": "hi"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_check_is_ok() {
        let response = router(state(None)).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
