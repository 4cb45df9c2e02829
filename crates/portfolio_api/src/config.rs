use std::time::Duration;

use crate::url::DEFAULT_API_BASE_URL;

/// Transport configuration for portfolio API requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioApiConfig {
    /// Backend origin; `/api/...` paths are appended per endpoint.
    pub base_url: String,
    /// Optional per-request timeout.
    pub timeout: Option<Duration>,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
}

impl Default for PortfolioApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
            user_agent: None,
        }
    }
}

impl PortfolioApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
