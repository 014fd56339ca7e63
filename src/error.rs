use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Which API call an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Search,
    Results,
}

impl Stage {
    fn rate_limit_message(&self) -> &'static str {
        match self {
            Stage::Search => "Your IP is rate limited or you have reached your daily limit.",
            Stage::Results => "Your IP is rate limited. Try switching your IP address then re-run.",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Search => write!(f, "search"),
            Stage::Results => write!(f, "search result"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HuntError {
    #[error("IntelX API key not provided or found in environment")]
    MissingApiKey,

    #[error("Empty domain provided.")]
    EmptyDomain,

    #[error("Empty search token provided.")]
    EmptyToken,

    #[error("Invalid JSON format for the search token: {0}")]
    InvalidToken(#[source] serde_json::Error),

    #[error("Search token has no job id.")]
    MissingJobId,

    /// The request URL is stripped, it carries the API key.
    #[error("Request Failed! {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Request Failed. Invalid credentials.")]
    InvalidCredentials,

    #[error("{}", .0.rate_limit_message())]
    RateLimited(Stage),

    #[error("Request Failed! Your IP address might have been blacklisted.")]
    Blacklisted,

    #[error("Request Failed! {stage} endpoint answered {status}")]
    UnexpectedStatus { stage: Stage, status: StatusCode },

    #[error("Error decoding JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response has no 'selectors' list.")]
    MissingSelectors,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for HuntError {
    fn from(e: reqwest::Error) -> Self {
        HuntError::Transport(e.without_url())
    }
}

impl HuntError {
    /// Map a non-success status to the error it stands for.
    /// Returns `None` for 2xx.
    pub fn from_status(stage: Stage, status: StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }
        Some(match status {
            StatusCode::UNAUTHORIZED => HuntError::InvalidCredentials,
            StatusCode::PAYMENT_REQUIRED => HuntError::RateLimited(stage),
            StatusCode::FORBIDDEN => HuntError::Blacklisted,
            status => HuntError::UnexpectedStatus { stage, status },
        })
    }
}
