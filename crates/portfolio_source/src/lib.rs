//! Transport-neutral contract for reading portfolio data.
//!
//! This crate defines only the record types served by the portfolio backend and
//! the read-only [`PortfolioSource`] facade the terminal core fetches through.
//! It contains no transport code; see `portfolio_api` for the HTTP client and
//! `portfolio_source_mock` for deterministic fixtures.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Archived,
    Wip,
}

impl ProjectStatus {
    /// Returns the wire label for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Wip => "wip",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One portfolio project as served by `GET /api/projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

/// Optional social profile links attached to [`About`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl SocialLinks {
    /// Returns `(label, url)` pairs for every present link in display order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("github", self.github.as_deref()),
            ("linkedin", self.linkedin.as_deref()),
            ("twitter", self.twitter.as_deref()),
            ("website", self.website.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.map(|url| (label, url)))
        .collect()
    }

    /// Looks up a link by its label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find_map(|(candidate, url)| (candidate == label).then_some(url))
    }
}

/// Profile record served by `GET /api/about`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub social: SocialLinks,
}

/// Failure reported by a [`PortfolioSource`].
///
/// Messages carried here may contain transport detail; the terminal core only
/// shows generic text to the user and logs the detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The requested project slug does not exist.
    NotFound { slug: String },
    /// The backend could not be reached or answered with a failure status.
    Unavailable(String),
    /// The backend answered with a payload that does not match the contract.
    Malformed(String),
}

impl SourceError {
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Returns true for the not-found variant.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { slug } => write!(f, "project not found: {slug}"),
            Self::Unavailable(message) => write!(f, "source unavailable: {message}"),
            Self::Malformed(message) => write!(f, "malformed source payload: {message}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Read-only facade the terminal core fetches portfolio data through.
#[async_trait]
pub trait PortfolioSource: Send + Sync + 'static {
    /// Short identifier used in logs and the start-up banner.
    fn source_id(&self) -> &str;

    /// Returns every project in backend order.
    async fn list_projects(&self) -> Result<Vec<Project>, SourceError>;

    /// Returns one project by slug, or [`SourceError::NotFound`].
    async fn get_project(&self, slug: &str) -> Result<Project, SourceError>;

    /// Returns the profile record.
    async fn get_about(&self) -> Result<About, SourceError>;
}
