// In-memory cache of headlines seen on the trusted feeds.
//
// Items are kept in insertion order and deduplicated by exact headline text
// (case-sensitive, no normalization). The cache is bounded: once `capacity`
// is reached the oldest item is evicted and its headline forgotten.
//
// Concurrency: refreshes are serialized by `refresh_gate` so two requests
// cannot interleave fetch-and-append and double-insert a headline. Readers
// only take the short `state` lock and never wait on the network.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};
use truthscope_common::FeedItem;

use crate::clock::Clock;
use crate::feeds::{FeedEntry, FeedSource, TRUSTED_FEEDS};

#[derive(Default)]
struct CacheState {
    items: VecDeque<FeedItem>,
    headlines: HashSet<String>,
}

impl CacheState {
    fn insert(&mut self, item: FeedItem, capacity: usize) -> bool {
        if self.headlines.contains(&item.headline) {
            return false;
        }
        while self.items.len() >= capacity {
            match self.items.pop_front() {
                Some(evicted) => {
                    self.headlines.remove(&evicted.headline);
                }
                None => break,
            }
        }
        self.headlines.insert(item.headline.clone());
        self.items.push_back(item);
        true
    }
}

pub struct FeedCache {
    urls: Vec<String>,
    source: Arc<dyn FeedSource>,
    clock: Arc<dyn Clock>,
    capacity: usize,
    refresh_gate: Mutex<()>,
    state: RwLock<CacheState>,
}

impl FeedCache {
    /// Cache over [`TRUSTED_FEEDS`] with the given capacity.
    pub fn new(source: Arc<dyn FeedSource>, clock: Arc<dyn Clock>, capacity: usize) -> Self {
        Self {
            urls: TRUSTED_FEEDS.iter().map(|u| u.to_string()).collect(),
            source,
            clock,
            capacity: capacity.max(1),
            refresh_gate: Mutex::new(()),
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Replace the feed list.
    pub fn with_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.urls = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Poll every feed once and append unseen headlines.
    ///
    /// A feed that fails to fetch or parse is skipped; the rest still run.
    /// Returns the items that were new in this refresh.
    pub async fn refresh(&self) -> Vec<FeedItem> {
        let _gate = self.refresh_gate.lock().await;

        let mut added = Vec::new();
        let mut failed = 0usize;

        for url in &self.urls {
            let entries = match self.source.fetch(url).await {
                Ok(entries) => entries,
                Err(e) => {
                    failed += 1;
                    warn!(feed = url.as_str(), error = %e, "feed: skipped");
                    continue;
                }
            };

            let mut state = self.state.write().await;
            for entry in entries {
                let item = self.to_item(url, entry);
                if state.insert(item.clone(), self.capacity) {
                    added.push(item);
                }
            }
        }

        let cached = self.len().await;
        info!(
            feeds = self.urls.len(),
            failed,
            new_items = added.len(),
            cached,
            "feed cache refreshed"
        );

        added
    }

    /// Append `item` unless a cached item has the identical headline.
    pub async fn insert(&self, item: FeedItem) -> bool {
        self.state.write().await.insert(item, self.capacity)
    }

    /// The `n` most recently appended items, oldest first.
    pub async fn latest(&self, n: usize) -> Vec<FeedItem> {
        let state = self.state.read().await;
        let skip = state.items.len().saturating_sub(n);
        state.items.iter().skip(skip).cloned().collect()
    }

    /// Every cached item in insertion order.
    pub async fn snapshot(&self) -> Vec<FeedItem> {
        self.state.read().await.items.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn to_item(&self, url: &str, entry: FeedEntry) -> FeedItem {
        FeedItem {
            source: url.to_string(),
            headline: entry.title,
            link: entry.link,
            timestamp: entry.published.unwrap_or_else(|| self.clock.now()),
        }
    }
}
