use std::sync::Arc;

use ai_client::{ChatCompletion, CompletionRequest};
use tracing::{info, warn};
use truthscope_common::config::{DEFAULT_CHAT_MODEL, DEFAULT_FALLBACK_MODEL};
use truthscope_common::FactCheckResult;

use crate::labels::derive_label;

/// Evidence placeholder returned to callers when nothing was collected.
pub const NO_DIRECT_EVIDENCE: &str = "No direct evidence found.";

/// Context line sent to the model when nothing was collected.
pub const NO_EVIDENCE_CONTEXT: &str = "No evidence found in trusted sources.";

pub const NOT_CONFIGURED: &str = "⚠ OpenAI client not available or OPENAI_API_KEY not set.";

pub const MAX_OUTPUT_TOKENS: u32 = 512;

const SYSTEM_PROMPT: &str = "You are a careful fact-checker. Given a short statement and a list of \
evidence links/headlines, decide whether the statement is true, false, misleading, or unverified. \
Provide a short verdict label (one line) and then a brief, human-friendly explanation that cites \
the evidence when possible. Keep it concise and clear.";

/// Asks a chat model to judge a claim against collected evidence and turns
/// the reply into a [`FactCheckResult`].
///
/// Never fails: a model error falls back to `fallback_model` once, and a
/// second error becomes the explanation text.
pub struct VerdictSummarizer {
    model: Option<Arc<dyn ChatCompletion>>,
    primary_model: String,
    fallback_model: String,
    max_tokens: u32,
}

impl VerdictSummarizer {
    pub fn new(model: Option<Arc<dyn ChatCompletion>>) -> Self {
        Self {
            model,
            primary_model: DEFAULT_CHAT_MODEL.to_string(),
            fallback_model: DEFAULT_FALLBACK_MODEL.to_string(),
            max_tokens: MAX_OUTPUT_TOKENS,
        }
    }

    pub fn with_models(mut self, primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        self.primary_model = primary.into();
        self.fallback_model = fallback.into();
        self
    }

    pub async fn summarize(&self, headline: &str, evidence: Vec<String>) -> FactCheckResult {
        let explanation = self.explain(headline, &evidence).await;
        let verdict = derive_label(&explanation);

        info!(%verdict, evidence = evidence.len(), "fact check summarized");

        let evidence = if evidence.is_empty() {
            vec![NO_DIRECT_EVIDENCE.to_string()]
        } else {
            evidence
        };

        FactCheckResult {
            verdict,
            evidence,
            explanation,
        }
    }

    /// The model's free-text judgement, or a diagnostic line.
    pub async fn explain(&self, headline: &str, evidence: &[String]) -> String {
        let Some(model) = &self.model else {
            return NOT_CONFIGURED.to_string();
        };

        let request = CompletionRequest::new(&self.primary_model)
            .system(SYSTEM_PROMPT)
            .user(user_prompt(headline, evidence))
            .max_tokens(self.max_tokens);

        let first_err = match model.complete(request.clone()).await {
            Ok(text) => return text.trim().to_string(),
            Err(e) => e,
        };

        warn!(
            model = %self.primary_model,
            fallback = %self.fallback_model,
            error = %first_err,
            "verdict: primary model failed, retrying with fallback"
        );

        match model.complete(request.with_model(&self.fallback_model)).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(model = %self.fallback_model, error = %e, "verdict: fallback model failed");
                format!("⚠ OpenAI error: {e}")
            }
        }
    }
}

/// User message: the claim, the evidence block, and the answer format.
pub fn user_prompt(headline: &str, evidence: &[String]) -> String {
    let context = if evidence.is_empty() {
        NO_EVIDENCE_CONTEXT.to_string()
    } else {
        evidence.join("\n")
    };

    format!(
        "Statement to fact-check:\n{headline}\n\n\
         Evidence collected:\n{context}\n\n\
         Please respond with a short verdict label (like 'Verified Real' or 'Likely Fake') \
         followed by a 2-5 sentence explanation in plain human language that cites any of \
         the listed evidence links/headlines."
    )
}
