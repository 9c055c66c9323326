use thiserror::Error;

use crate::types::{DecodedBody, Headers};

#[derive(Error, Debug)]
pub enum SlackError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("HTTP error {status}")]
    Http {
        status: u16,
        headers: Headers,
        body: DecodedBody,
    },

    #[error("Rate limited, retry after {retry_after}s")]
    RateLimited {
        retry_after: i64,
        headers: Headers,
        body: DecodedBody,
    },

    #[error("Slack API error: {error}")]
    Api {
        error: String,
        headers: Headers,
        data: DecodedBody,
    },

    #[error("Iteration not supported for: {endpoint}")]
    IterationNotFound { endpoint: String },

    #[error("Invalid iteration mode: {0}, expected one of: cursor, page, timeline")]
    InvalidIterMode(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Event verification failed")]
    FailedVerification {
        token: Option<String>,
        team_id: Option<String>,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
