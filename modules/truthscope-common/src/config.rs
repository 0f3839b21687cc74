use std::env;

use crate::error::TruthScopeError;

pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_FALLBACK_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_FEED_CACHE_CAPACITY: usize = 2000;

/// Application configuration loaded from environment variables.
///
/// Every credential is optional: a missing key disables that source rather
/// than failing startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Search providers
    pub news_api_key: Option<String>,
    pub gnews_api_key: Option<String>,

    // Language model
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub chat_model: String,
    pub fallback_model: String,

    // Feed cache
    pub feed_cache_capacity: usize,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            news_api_key: None,
            gnews_api_key: None,
            openai_api_key: None,
            openai_base_url: None,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            fallback_model: DEFAULT_FALLBACK_MODEL.to_string(),
            feed_cache_capacity: DEFAULT_FEED_CACHE_CAPACITY,
            web_host: "0.0.0.0".to_string(),
            web_port: 3000,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, TruthScopeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TruthScopeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            news_api_key: optional("NEWS_API_KEY"),
            gnews_api_key: optional("GNEWS_API_KEY"),
            openai_api_key: optional("OPENAI_API_KEY"),
            openai_base_url: optional("OPENAI_BASE_URL"),
            chat_model: optional("OPENAI_MODEL").unwrap_or(defaults.chat_model),
            fallback_model: optional("OPENAI_FALLBACK_MODEL").unwrap_or(defaults.fallback_model),
            feed_cache_capacity: parse_or(
                "FEED_CACHE_CAPACITY",
                optional("FEED_CACHE_CAPACITY"),
                defaults.feed_cache_capacity,
            )?,
            web_host: optional("WEB_HOST").unwrap_or(defaults.web_host),
            web_port: parse_or("WEB_PORT", optional("WEB_PORT"), defaults.web_port)?,
        })
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, TruthScopeError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| TruthScopeError::Config(format!("{key} must be a number, got {v:?}"))),
    }
}
