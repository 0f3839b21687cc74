// GNews (gnews.io) adapter.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use super::{build_client, get_articles, Article, EvidenceProvider, EVIDENCE_PAGE_SIZE};

const GNEWS_URL: &str = "https://gnews.io/api/v4";

#[derive(Clone)]
pub struct GNews {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl GNews {
    pub fn new(token: &str) -> Result<Self> {
        Ok(Self {
            token: token.to_string(),
            base_url: GNEWS_URL.to_string(),
            client: build_client()?,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// English `/search`.
    pub async fn search_articles(&self, query: &str, max: u32) -> Result<Vec<Article>> {
        debug!(query, max, "gnews: search");
        get_articles(
            &self.client,
            &format!("{}/search", self.base_url),
            &[
                ("q", query.to_string()),
                ("lang", "en".to_string()),
                ("max", max.to_string()),
                ("token", self.token.clone()),
            ],
        )
        .await
    }

    /// English `/top-headlines` for a country code.
    pub async fn top_headlines(&self, country: &str) -> Result<Vec<Article>> {
        let articles = get_articles(
            &self.client,
            &format!("{}/top-headlines", self.base_url),
            &[
                ("country", country.to_string()),
                ("lang", "en".to_string()),
                ("token", self.token.clone()),
            ],
        )
        .await?;
        info!(country, count = articles.len(), "gnews: top headlines");
        Ok(articles)
    }
}

#[async_trait]
impl EvidenceProvider for GNews {
    fn name(&self) -> &str {
        "GNews API"
    }

    async fn search(&self, headline: &str) -> Result<Vec<Article>> {
        self.search_articles(headline, EVIDENCE_PAGE_SIZE).await
    }
}
