use tracing::info;
use truthscope_common::FactCheckResult;

use crate::collector::EvidenceCollector;
use crate::summarizer::VerdictSummarizer;

pub use crate::summarizer::NO_DIRECT_EVIDENCE;

/// Headline in, verdict out: collect evidence, then summarize it.
pub struct FactChecker {
    collector: EvidenceCollector,
    summarizer: VerdictSummarizer,
}

impl FactChecker {
    pub fn new(collector: EvidenceCollector, summarizer: VerdictSummarizer) -> Self {
        Self {
            collector,
            summarizer,
        }
    }

    pub fn collector(&self) -> &EvidenceCollector {
        &self.collector
    }

    /// Always returns a well-formed result; every failure along the way is
    /// folded into the evidence list or the explanation.
    pub async fn check(&self, headline: &str) -> FactCheckResult {
        info!(headline, "fact check started");
        let evidence = self.collector.collect(headline).await;
        self.summarizer.summarize(headline, evidence).await
    }
}
