//! HTTP client for the portfolio REST backend.
//!
//! This crate owns request building and response parsing for the read-only
//! portfolio endpoints and adapts them to the `portfolio_source` facade. It
//! performs no retries; a failed request is reported once.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod url;

pub use client::{PortfolioApiClient, HTTP_SOURCE_ID};
pub use config::PortfolioApiConfig;
pub use error::PortfolioApiError;
pub use payload::{HealthStatus, ProjectEnvelope, ProjectsEnvelope};
pub use url::{endpoint, normalize_base_url, DEFAULT_API_BASE_URL};
