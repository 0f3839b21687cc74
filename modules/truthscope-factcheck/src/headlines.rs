// Trusted headline listing and free-text news search.
//
// Listing: each headline provider in order until one returns something, then
// the feed cache as the last resort. Search: NewsAPI relevancy search, empty
// on any failure.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};
use truthscope_common::Headline;

use crate::feed_cache::FeedCache;
use crate::providers::{Article, GNews, NewsApi};

/// Items returned from the feed cache when every provider comes up empty.
pub const FEED_FALLBACK_COUNT: usize = 15;

pub const TOP_HEADLINES_PAGE_SIZE: u32 = 10;
pub const SEARCH_PAGE_SIZE: u32 = 10;

#[async_trait]
pub trait HeadlineProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn top_headlines(&self, country: &str) -> Result<Vec<Article>>;
}

#[async_trait]
impl HeadlineProvider for NewsApi {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn top_headlines(&self, country: &str) -> Result<Vec<Article>> {
        NewsApi::top_headlines(self, country, TOP_HEADLINES_PAGE_SIZE).await
    }
}

#[async_trait]
impl HeadlineProvider for GNews {
    fn name(&self) -> &str {
        "GNews"
    }

    async fn top_headlines(&self, country: &str) -> Result<Vec<Article>> {
        GNews::top_headlines(self, country).await
    }
}

#[async_trait]
pub trait NewsSearch: Send + Sync {
    async fn search_news(&self, query: &str) -> Result<Vec<Article>>;
}

#[async_trait]
impl NewsSearch for NewsApi {
    async fn search_news(&self, query: &str) -> Result<Vec<Article>> {
        self.search_relevant(query, SEARCH_PAGE_SIZE).await
    }
}

pub struct TrustedHeadlines {
    providers: Vec<Box<dyn HeadlineProvider>>,
    search: Option<Box<dyn NewsSearch>>,
    cache: Arc<FeedCache>,
}

impl TrustedHeadlines {
    pub fn new(
        providers: Vec<Box<dyn HeadlineProvider>>,
        search: Option<Box<dyn NewsSearch>>,
        cache: Arc<FeedCache>,
    ) -> Self {
        Self {
            providers,
            search,
            cache,
        }
    }

    /// Top headlines for `country`, falling back provider by provider and
    /// finally to the most recent cached feed items.
    pub async fn trusted(&self, country: &str) -> Vec<Headline> {
        for provider in &self.providers {
            match provider.top_headlines(country).await {
                Ok(articles) => {
                    let headlines = to_headlines(&articles);
                    if !headlines.is_empty() {
                        return headlines;
                    }
                    info!(
                        provider = provider.name(),
                        country,
                        "headlines: provider returned nothing"
                    );
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        country,
                        error = ?e,
                        "headlines: provider failed"
                    );
                }
            }
        }

        self.cache.refresh().await;
        self.cache
            .latest(FEED_FALLBACK_COUNT)
            .await
            .iter()
            .map(Headline::from)
            .collect()
    }

    /// Free-text search; empty when search is not configured or fails.
    pub async fn search(&self, query: &str) -> Vec<Headline> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let Some(search) = &self.search else {
            return Vec::new();
        };

        match search.search_news(query).await {
            Ok(articles) => to_headlines(&articles),
            Err(e) => {
                warn!(query, error = ?e, "search: failed");
                Vec::new()
            }
        }
    }
}

fn to_headlines(articles: &[Article]) -> Vec<Headline> {
    articles.iter().filter_map(Article::headline).collect()
}
