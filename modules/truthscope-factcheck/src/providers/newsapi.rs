// NewsAPI (newsapi.org) adapter.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use super::{build_client, get_articles, Article, EvidenceProvider, EVIDENCE_PAGE_SIZE};

const NEWSAPI_URL: &str = "https://newsapi.org/v2";

#[derive(Clone)]
pub struct NewsApi {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl NewsApi {
    pub fn new(api_key: &str) -> Result<Self> {
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: NEWSAPI_URL.to_string(),
            client: build_client()?,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// `/everything` search restricted to English.
    pub async fn everything(&self, query: &str, page_size: u32) -> Result<Vec<Article>> {
        debug!(query, page_size, "newsapi: everything");
        get_articles(
            &self.client,
            &format!("{}/everything", self.base_url),
            &[
                ("q", query.to_string()),
                ("language", "en".to_string()),
                ("pageSize", page_size.to_string()),
                ("apiKey", self.api_key.clone()),
            ],
        )
        .await
    }

    /// `/everything` ranked by relevancy, any language.
    pub async fn search_relevant(&self, query: &str, page_size: u32) -> Result<Vec<Article>> {
        debug!(query, page_size, "newsapi: relevancy search");
        get_articles(
            &self.client,
            &format!("{}/everything", self.base_url),
            &[
                ("q", query.to_string()),
                ("sortBy", "relevancy".to_string()),
                ("pageSize", page_size.to_string()),
                ("apiKey", self.api_key.clone()),
            ],
        )
        .await
    }

    /// English `/top-headlines` for a country code.
    pub async fn top_headlines(&self, country: &str, page_size: u32) -> Result<Vec<Article>> {
        let articles = get_articles(
            &self.client,
            &format!("{}/top-headlines", self.base_url),
            &[
                ("country", country.to_string()),
                ("language", "en".to_string()),
                ("pageSize", page_size.to_string()),
                ("apiKey", self.api_key.clone()),
            ],
        )
        .await?;
        info!(country, count = articles.len(), "newsapi: top headlines");
        Ok(articles)
    }
}

#[async_trait]
impl EvidenceProvider for NewsApi {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn search(&self, headline: &str) -> Result<Vec<Article>> {
        self.everything(headline, EVIDENCE_PAGE_SIZE).await
    }
}
