use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use truthscope_common::Config;
use truthscope_factcheck::FactCheckService;

mod rest;

pub struct AppState {
    pub service: FactCheckService,
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // REST API
        .route("/check_news", post(rest::api_check_news))
        .route("/trusted_news", get(rest::api_trusted_news))
        .route("/search_news", get(rest::api_search_news))
        .route("/chatbot", post(rest::api_chatbot))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Verdicts depend on live sources; never cache them
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency only (no bodies)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("truthscope=info".parse()?))
        .init();

    let config = Config::from_env()?;
    let service = FactCheckService::from_config(&config)?;
    let state = Arc::new(AppState { service });

    let addr = config.bind_addr();
    info!("TruthScope API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
