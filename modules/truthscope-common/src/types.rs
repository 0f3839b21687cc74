use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Feed cache ---

/// A headline seen on one of the trusted syndication feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// URL of the feed the entry came from.
    pub source: String,
    pub headline: String,
    pub link: String,
    /// Published time, or the time the entry was first seen when the feed
    /// carries none.
    pub timestamp: DateTime<Utc>,
}

impl FeedItem {
    /// Display form used as an evidence line: `"<headline> (<link>)"`.
    pub fn evidence_line(&self) -> String {
        evidence_line(&self.headline, &self.link)
    }
}

/// Format a headline and its URL as one evidence string.
pub fn evidence_line(headline: &str, link: &str) -> String {
    format!("{headline} ({link})")
}

// --- Fact check ---

/// Coarse three-way credibility label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Potential Fake")]
    PotentialFake,
    #[serde(rename = "Verified Real")]
    VerifiedReal,
    #[serde(rename = "Unverified")]
    Unverified,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::PotentialFake => write!(f, "Potential Fake"),
            Verdict::VerifiedReal => write!(f, "Verified Real"),
            Verdict::Unverified => write!(f, "Unverified"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub verdict: Verdict,
    /// Never empty: a placeholder line stands in when nothing was found.
    pub evidence: Vec<String>,
    pub explanation: String,
}

// --- Headline listings ---

/// One entry of the trusted-news listing or a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub headline: String,
    pub url: String,
}

impl From<&FeedItem> for Headline {
    fn from(item: &FeedItem) -> Self {
        Self {
            headline: item.headline.clone(),
            url: item.link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_serializes_to_display_label() {
        for verdict in [Verdict::PotentialFake, Verdict::VerifiedReal, Verdict::Unverified] {
            let json = serde_json::to_value(verdict).unwrap();
            assert_eq!(json, serde_json::Value::String(verdict.to_string()));
        }
    }

    #[test]
    fn evidence_line_format() {
        let item = FeedItem {
            source: "https://feeds.bbci.co.uk/news/rss.xml".into(),
            headline: "Economy grows by 3% in Q2".into(),
            link: "https://www.bbc.co.uk/news/business-1".into(),
            timestamp: Utc::now(),
        };
        assert_eq!(
            item.evidence_line(),
            "Economy grows by 3% in Q2 (https://www.bbc.co.uk/news/business-1)"
        );
    }

    #[test]
    fn fact_check_result_wire_shape() {
        let result = FactCheckResult {
            verdict: Verdict::Unverified,
            evidence: vec!["No direct evidence found.".into()],
            explanation: "n/a".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["verdict"], "Unverified");
        assert_eq!(json["evidence"][0], "No direct evidence found.");
        assert_eq!(json["explanation"], "n/a");
    }
}
