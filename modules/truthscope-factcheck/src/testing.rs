// Test mocks for the fact-check pipeline.
//
// One mock per trait boundary:
// - MockFeedSource (FeedSource): HashMap-based URL→entries
// - MockProvider (EvidenceProvider, HeadlineProvider, NewsSearch): canned articles or an error
// - MockChat (ChatCompletion): scripted replies, records every request
// - FixedClock (Clock): always the same instant
//
// Plus small constructors for entries, items and articles.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ai_client::{AiError, ChatCompletion, CompletionRequest};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use truthscope_common::FeedItem;

use crate::clock::Clock;
use crate::feeds::{FeedEntry, FeedSource};
use crate::headlines::{HeadlineProvider, NewsSearch};
use crate::providers::{Article, EvidenceProvider};

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

pub fn entry(title: &str, link: &str) -> FeedEntry {
    FeedEntry {
        title: title.to_string(),
        link: link.to_string(),
        published: None,
    }
}

pub fn item(headline: &str, link: &str) -> FeedItem {
    FeedItem {
        source: "https://feeds.bbci.co.uk/news/rss.xml".to_string(),
        headline: headline.to_string(),
        link: link.to_string(),
        timestamp: FixedClock::default().now(),
    }
}

pub fn article(title: &str, url: &str) -> Article {
    Article {
        title: Some(title.to_string()),
        url: Some(url.to_string()),
    }
}

/// Parse an RFC 3339 timestamp. Panics on bad input.
pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap_or_else(|e| panic!("bad timestamp {s:?}: {e}"))
        .with_timezone(&Utc)
}

// ---------------------------------------------------------------------------
// FixedClock
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(ts("2025-01-15T12:00:00Z"))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ---------------------------------------------------------------------------
// MockFeedSource
// ---------------------------------------------------------------------------

/// Returns `Err` for unregistered URLs.
#[derive(Default)]
pub struct MockFeedSource {
    feeds: HashMap<String, Vec<FeedEntry>>,
}

impl MockFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_feed(mut self, url: &str, entries: Vec<FeedEntry>) -> Self {
        self.feeds.insert(url.to_string(), entries);
        self
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>> {
        self.feeds
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("MockFeedSource: no feed registered for {url}"))
    }
}

// ---------------------------------------------------------------------------
// MockProvider
// ---------------------------------------------------------------------------

/// Canned articles (or a canned error) for any query.
pub struct MockProvider {
    name: String,
    outcome: std::result::Result<Vec<Article>, String>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Ok(Vec::new()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn returning(mut self, articles: Vec<Article>) -> Self {
        self.outcome = Ok(articles);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.outcome = Err(message.to_string());
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    fn respond(&self) -> Result<Vec<Article>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(|m| anyhow!(m))
    }
}

#[async_trait]
impl EvidenceProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, _headline: &str) -> Result<Vec<Article>> {
        self.respond()
    }
}

#[async_trait]
impl HeadlineProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn top_headlines(&self, _country: &str) -> Result<Vec<Article>> {
        self.respond()
    }
}

#[async_trait]
impl NewsSearch for MockProvider {
    async fn search_news(&self, _query: &str) -> Result<Vec<Article>> {
        self.respond()
    }
}

// ---------------------------------------------------------------------------
// MockChat
// ---------------------------------------------------------------------------

/// Replies are consumed in the order they were scripted. Once the script
/// runs out every call fails.
#[derive(Default)]
pub struct MockChat {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.script.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.script.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for MockChat {
    async fn complete(&self, request: CompletionRequest) -> std::result::Result<String, AiError> {
        self.requests.lock().unwrap().push(request);
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(AiError::Api { status: 500, message }),
            None => Err(AiError::EmptyCompletion("MockChat script exhausted".into())),
        }
    }
}
