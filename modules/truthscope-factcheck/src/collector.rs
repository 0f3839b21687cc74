use std::sync::Arc;

use tracing::{info, warn};

use crate::feed_cache::FeedCache;
use crate::matching::is_match;
use crate::normalize::normalize;
use crate::providers::EvidenceProvider;

/// Gathers evidence lines for a claim: fuzzy matches from the feed cache
/// first, then each search provider in order.
///
/// Never fails. A provider error becomes a single `⚠ <name> error: ...` line
/// and the remaining providers still run.
pub struct EvidenceCollector {
    cache: Arc<FeedCache>,
    providers: Vec<Box<dyn EvidenceProvider>>,
}

impl EvidenceCollector {
    pub fn new(cache: Arc<FeedCache>, providers: Vec<Box<dyn EvidenceProvider>>) -> Self {
        Self { cache, providers }
    }

    pub fn cache(&self) -> &Arc<FeedCache> {
        &self.cache
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Evidence lines for `headline`; may be empty.
    pub async fn collect(&self, headline: &str) -> Vec<String> {
        self.cache.refresh().await;

        let mut evidence = self.feed_matches(headline).await;
        let from_feeds = evidence.len();

        for provider in &self.providers {
            match provider.search(headline).await {
                Ok(articles) => {
                    let before = evidence.len();
                    evidence.extend(articles.iter().filter_map(|a| a.evidence_line()));
                    info!(
                        provider = provider.name(),
                        count = evidence.len() - before,
                        "evidence: provider results"
                    );
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = ?e, "evidence: provider failed");
                    evidence.push(format!("⚠ {} error: {e:#}", provider.name()));
                }
            }
        }

        info!(from_feeds, total = evidence.len(), "evidence collected");
        evidence
    }

    /// Cached headlines scoring above the match threshold, in cache order.
    pub async fn feed_matches(&self, headline: &str) -> Vec<String> {
        let claim = normalize(headline);
        self.cache
            .snapshot()
            .await
            .iter()
            .filter(|item| is_match(&claim, &normalize(&item.headline)))
            .map(|item| item.evidence_line())
            .collect()
    }
}
