pub mod assistant;
pub mod checker;
pub mod clock;
pub mod collector;
pub mod feed_cache;
pub mod feeds;
pub mod headlines;
pub mod labels;
pub mod matching;
pub mod normalize;
pub mod providers;
pub mod service;
pub mod summarizer;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use assistant::ChatAssistant;
pub use checker::{FactChecker, NO_DIRECT_EVIDENCE};
pub use clock::{Clock, SystemClock};
pub use collector::EvidenceCollector;
pub use feed_cache::FeedCache;
pub use feeds::{FeedEntry, FeedSource, HttpFeedSource, TRUSTED_FEEDS};
pub use headlines::TrustedHeadlines;
pub use labels::{derive_label, LabelRule, LABEL_RULES};
pub use matching::{token_set_ratio, MATCH_THRESHOLD};
pub use normalize::normalize;
pub use providers::{Article, EvidenceProvider, GNews, NewsApi};
pub use service::FactCheckService;
pub use summarizer::VerdictSummarizer;
