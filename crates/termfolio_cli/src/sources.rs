use std::sync::Arc;

use anyhow::{Context, Result};
use portfolio_api::{PortfolioApiClient, PortfolioApiConfig};
use portfolio_source::PortfolioSource;
use portfolio_source_mock::MockSource;

use crate::config::{EnvConfig, SourceKind};

pub const USER_AGENT: &str = concat!("termfolio/", env!("CARGO_PKG_VERSION"));

/// Builds the facade selected by `config`.
pub fn source_for_config(config: &EnvConfig) -> Result<Arc<dyn PortfolioSource>> {
    match config.source {
        SourceKind::Mock => Ok(Arc::new(MockSource::default())),
        SourceKind::Http => {
            let api_config = PortfolioApiConfig::new(&config.api_url)
                .with_timeout(config.timeout)
                .with_user_agent(USER_AGENT);
            let client = PortfolioApiClient::new(api_config)
                .with_context(|| format!("invalid portfolio API URL '{}'", config.api_url))?;
            Ok(Arc::new(client))
        }
    }
}
