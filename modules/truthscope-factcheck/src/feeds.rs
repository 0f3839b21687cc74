// RSS/Atom feed fetching.
//
// FeedSource is the seam between the feed cache and the network: the cache
// only sees parsed entries, tests swap in MockFeedSource.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Trusted syndication feeds polled on every refresh, in order.
pub const TRUSTED_FEEDS: &[&str] = &[
    // Reuters
    "http://feeds.reuters.com/reuters/worldNews",
    "http://feeds.reuters.com/reuters/businessNews",
    // BBC
    "https://feeds.bbci.co.uk/news/rss.xml",
    "https://feeds.bbci.co.uk/news/world/rss.xml",
    "https://feeds.bbci.co.uk/news/uk/rss.xml",
    "https://feeds.bbci.co.uk/news/technology/rss.xml",
    "https://feeds.bbci.co.uk/news/politics/rss.xml",
    "https://feeds.bbci.co.uk/news/us_and_canada/rss.xml",
    "https://feeds.bbci.co.uk/news/business/rss.xml",
    // Al Jazeera
    "https://www.aljazeera.com/xml/rss/all.xml",
    // WHO
    "https://www.who.int/feeds/entity/mediacentre/news/en/rss.xml",
];

const FEED_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "truthscope/0.1";

/// One parsed feed entry. Entries without a title are dropped at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub published: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse the feed at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>>;
}

/// reqwest + feed-rs implementation.
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FEED_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build feed HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>> {
        debug!(url, "feed: fetching");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context("Feed fetch failed")?
            .error_for_status()
            .context("Feed returned error status")?;

        let bytes = resp.bytes().await.context("Failed to read feed body")?;
        parse_feed(&bytes)
    }
}

/// Parse an RSS, Atom or JSON Feed document.
pub fn parse_feed(body: &[u8]) -> Result<Vec<FeedEntry>> {
    let feed = feed_rs::parser::parse(body).context("Failed to parse RSS/Atom feed")?;

    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry.title.map(|t| t.content.trim().to_string())?;
            if title.is_empty() {
                return None;
            }

            // Article page: the alternate link, else whichever link is listed first.
            let link = entry
                .links
                .iter()
                .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
                .or_else(|| entry.links.first())
                .map(|l| l.href.clone())
                .or_else(|| entry.id.starts_with("http").then(|| entry.id.clone()))
                .unwrap_or_default();

            Some(FeedEntry {
                title,
                link,
                published: entry.published.or(entry.updated),
            })
        })
        .collect())
}
