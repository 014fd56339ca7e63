use std::env;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio::time::Duration;
use tracing::error;

use crate::{Args, HuntError};

pub const DEFAULT_BASE_URL: &str = "https://2.intelx.io:443";
pub const API_KEY_VAR: &str = "INTELX_TOKEN";

const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "user-agent",
        "Mozilla/5.0 (Windows NT 11.0; WOW64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/111.0.5520.225 Safari/537.36",
    ),
    ("accept", "*/*"),
    ("accept-language", "en-US,en;q=0.5"),
    ("origin", "https://phonebook.cz"),
    ("dnt", "1"),
    ("referer", "https://phonebook.cz/"),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "cross-site"),
    ("te", "trailers"),
];

/// Fixed parameters of a phonebook search, sent as the submit payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub max_results: u32,
    pub media: u32,
    pub target: u32,
    /// Server-side search timeout, in seconds.
    pub timeout: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            max_results: 10_000,
            media: 0,
            target: 2,
            timeout: 20,
        }
    }
}

/// Everything the API client needs, built once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub key: String,
    pub headers: HeaderMap,
    pub search: SearchParams,
    /// `limit` query parameter of the result fetch.
    pub result_limit: u64,
    pub request_timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            key: key.into(),
            headers: browser_headers(),
            search: SearchParams::default(),
            result_limit: 1_000_000,
            request_timeout: Duration::from_secs(5),
        }
    }

    /// Resolve the configuration from command line arguments, falling back to
    /// the environment for the API key.
    pub fn from_args(args: &Args) -> Result<Self, HuntError> {
        let key = match &args.key {
            Some(k) if !k.trim().is_empty() => k.trim().to_string(),
            _ => match env::var(API_KEY_VAR) {
                Ok(key) if !key.trim().is_empty() => key.trim().to_string(),
                _ => {
                    error!("{} not provided or found in environment", API_KEY_VAR);
                    return Err(HuntError::MissingApiKey);
                }
            },
        };

        Ok(ApiConfig::new(args.base_url.as_str(), key))
    }

    pub fn search_url(&self) -> String {
        format!("{}/phonebook/search", self.base_url)
    }

    pub fn result_url(&self) -> String {
        format!("{}/phonebook/search/result", self.base_url)
    }
}

fn browser_headers() -> HeaderMap {
    BROWSER_HEADERS
        .iter()
        .map(|&(name, value)| {
            (
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            )
        })
        .collect()
}
