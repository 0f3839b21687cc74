// News search providers.
//
// Each provider is an adapter over one search API. The evidence collector
// holds them as an ordered Vec<Box<dyn EvidenceProvider>>, so adding or
// dropping a provider is a config change, not a control-flow change.

mod gnews;
mod newsapi;

pub use gnews::GNews;
pub use newsapi::NewsApi;

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use truthscope_common::{evidence_line, Headline};

/// Articles requested per provider when gathering evidence.
pub const EVIDENCE_PAGE_SIZE: u32 = 5;

pub(crate) const PROVIDER_TIMEOUT: Duration = Duration::from_secs(8);

/// A search result as both providers return it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Article {
    /// Evidence line for a titled article.
    pub fn evidence_line(&self) -> Option<String> {
        let title = self.title.as_deref().filter(|t| !t.trim().is_empty())?;
        Some(evidence_line(title, self.url.as_deref().unwrap_or_default()))
    }

    /// Listing entry for a titled article.
    pub fn headline(&self) -> Option<Headline> {
        let title = self.title.as_deref().filter(|t| !t.trim().is_empty())?;
        Some(Headline {
            headline: title.to_string(),
            url: self.url.clone().unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ArticlesResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
    #[serde(default)]
    articles: Vec<Article>,
}

/// Decode a provider body of the form `{"articles": [{"title", "url"}, ...]}`.
///
/// Non-JSON bodies and explicit API errors (`"status": "error"` or an
/// `errors` array) are errors.
pub fn parse_articles(body: &str) -> Result<Vec<Article>> {
    let response: ArticlesResponse =
        serde_json::from_str(body).context("failed to decode response body")?;

    if response.status.as_deref() == Some("error") {
        bail!(
            "{}",
            response.message.unwrap_or_else(|| "unknown API error".to_string())
        );
    }
    if let Some(errors) = response.errors.filter(|e| !e.is_null()) {
        return Err(anyhow!("{}", describe_errors(&errors)));
    }

    Ok(response.articles)
}

fn describe_errors(errors: &serde_json::Value) -> String {
    match errors {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

/// GET `url` with `query` and decode the articles array.
pub(crate) async fn get_articles(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<Vec<Article>> {
    let resp = client
        .get(url)
        .query(query)
        .send()
        .await
        .context("request failed")?;

    let body = resp.text().await.context("failed to read response body")?;
    parse_articles(&body)
}

pub(crate) fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(PROVIDER_TIMEOUT)
        .build()
        .context("Failed to build provider HTTP client")
}

/// One source of search-based evidence.
#[async_trait]
pub trait EvidenceProvider: Send + Sync {
    /// Name used in logs and diagnostic evidence lines.
    fn name(&self) -> &str;

    /// Up to [`EVIDENCE_PAGE_SIZE`] English articles matching `headline`.
    async fn search(&self, headline: &str) -> Result<Vec<Article>>;
}
