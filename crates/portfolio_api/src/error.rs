use std::fmt;

use portfolio_source::SourceError;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum PortfolioApiError {
    InvalidBaseUrl(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    Decode { endpoint: String, source: JsonError },
}

/// Error envelope emitted by the backend on 4xx/5xx responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorPayload {
    pub error: Option<String>,
    pub message: Option<String>,
    #[allow(dead_code)]
    pub status_code: Option<u16>,
}

impl fmt::Display for PortfolioApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Decode { endpoint, source } => {
                write!(f, "unexpected response body from {endpoint}: {source}")
            }
        }
    }
}

impl std::error::Error for PortfolioApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(error) => Some(error),
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PortfolioApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl PortfolioApiError {
    /// Returns the HTTP status for status failures.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status, _) => Some(*status),
            Self::Request(error) => error.status(),
            _ => None,
        }
    }

    /// Maps a transport failure onto the facade taxonomy.
    ///
    /// A 404 only means "no such project" when a slug was requested; on the
    /// collection endpoints it means the backend is misrouted.
    #[must_use]
    pub fn into_source_error(self, slug: Option<&str>) -> SourceError {
        match (&self, slug) {
            (Self::Status(status, _), Some(slug)) if *status == StatusCode::NOT_FOUND => {
                SourceError::NotFound {
                    slug: slug.to_string(),
                }
            }
            (Self::Decode { .. }, _) => SourceError::malformed(self.to_string()),
            _ => SourceError::unavailable(self.to_string()),
        }
    }
}

pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body.to_string()
        }
    };

    let Ok(parsed) = serde_json::from_str::<ErrorPayload>(body) else {
        return fallback();
    };

    parsed
        .message
        .as_deref()
        .and_then(non_empty_string)
        .or_else(|| parsed.error.as_deref().and_then(non_empty_string))
        .map(str::to_owned)
        .unwrap_or_else(fallback)
}

fn non_empty_string(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
