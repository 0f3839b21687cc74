use std::sync::Arc;

use ai_client::{ChatCompletion, OpenAi};
use anyhow::Result;
use tracing::info;
use truthscope_common::Config;

use crate::assistant::ChatAssistant;
use crate::checker::FactChecker;
use crate::clock::SystemClock;
use crate::collector::EvidenceCollector;
use crate::feed_cache::FeedCache;
use crate::feeds::HttpFeedSource;
use crate::headlines::{HeadlineProvider, NewsSearch, TrustedHeadlines};
use crate::providers::{EvidenceProvider, GNews, NewsApi};
use crate::summarizer::VerdictSummarizer;

/// Everything the HTTP layer calls into, wired from one [`Config`].
pub struct FactCheckService {
    pub checker: FactChecker,
    pub headlines: TrustedHeadlines,
    pub assistant: ChatAssistant,
}

impl FactCheckService {
    pub fn new(
        checker: FactChecker,
        headlines: TrustedHeadlines,
        assistant: ChatAssistant,
    ) -> Self {
        Self {
            checker,
            headlines,
            assistant,
        }
    }

    /// Build the live service. Sources whose credential is missing are left
    /// out rather than failing.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Arc::new(FeedCache::new(
            Arc::new(HttpFeedSource::new()?),
            Arc::new(SystemClock),
            config.feed_cache_capacity,
        ));

        let news_api = config.news_api_key.as_deref().map(NewsApi::new).transpose()?;
        let gnews = config.gnews_api_key.as_deref().map(GNews::new).transpose()?;

        let mut evidence_providers: Vec<Box<dyn EvidenceProvider>> = Vec::new();
        let mut headline_providers: Vec<Box<dyn HeadlineProvider>> = Vec::new();
        if let Some(api) = &news_api {
            evidence_providers.push(Box::new(api.clone()));
            headline_providers.push(Box::new(api.clone()));
        }
        if let Some(api) = &gnews {
            evidence_providers.push(Box::new(api.clone()));
            headline_providers.push(Box::new(api.clone()));
        }
        let search = news_api.map(|api| Box::new(api) as Box<dyn NewsSearch>);

        let model: Option<Arc<dyn ChatCompletion>> = config.openai_api_key.as_deref().map(|key| {
            let mut ai = OpenAi::new(key);
            if let Some(url) = &config.openai_base_url {
                ai = ai.with_base_url(url);
            }
            Arc::new(ai) as Arc<dyn ChatCompletion>
        });

        let collector = EvidenceCollector::new(cache.clone(), evidence_providers);
        info!(
            providers = ?collector.provider_names(),
            chat = model.is_some(),
            feeds = cache.urls().len(),
            capacity = cache.capacity(),
            "fact check service configured"
        );

        let summarizer = VerdictSummarizer::new(model.clone())
            .with_models(&config.chat_model, &config.fallback_model);

        Ok(Self {
            checker: FactChecker::new(collector, summarizer),
            headlines: TrustedHeadlines::new(headline_providers, search, cache),
            assistant: ChatAssistant::new(model).with_model_name(&config.chat_model),
        })
    }
}
