use ::url::Url;
use async_trait::async_trait;
use portfolio_source::{About, PortfolioSource, Project, SourceError};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::PortfolioApiConfig;
use crate::error::{parse_error_message, PortfolioApiError};
use crate::payload::{HealthStatus, ProjectEnvelope, ProjectsEnvelope};
use crate::url::endpoint;

/// Stable source identifier used for explicit startup selection.
pub const HTTP_SOURCE_ID: &str = "http";

#[derive(Debug)]
pub struct PortfolioApiClient {
    http: Client,
    config: PortfolioApiConfig,
}

impl PortfolioApiClient {
    pub fn new(config: PortfolioApiConfig) -> Result<Self, PortfolioApiError> {
        // Fail on a bad base URL at construction rather than on first command.
        endpoint(&config.base_url, &[])?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = config.user_agent.as_deref() {
            builder = builder.user_agent(user_agent.to_owned());
        }
        let http = builder.build().map_err(PortfolioApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &PortfolioApiConfig {
        &self.config
    }

    pub fn projects_url(&self) -> Result<Url, PortfolioApiError> {
        endpoint(&self.config.base_url, &["api", "projects"])
    }

    pub fn project_url(&self, slug: &str) -> Result<Url, PortfolioApiError> {
        endpoint(&self.config.base_url, &["api", "projects", slug])
    }

    pub fn about_url(&self) -> Result<Url, PortfolioApiError> {
        endpoint(&self.config.base_url, &["api", "about"])
    }

    pub fn health_url(&self) -> Result<Url, PortfolioApiError> {
        endpoint(&self.config.base_url, &["health"])
    }

    pub fn build_request(&self, url: Url) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
    }

    pub async fn projects(&self) -> Result<Vec<Project>, PortfolioApiError> {
        let envelope: ProjectsEnvelope = self.get_json(self.projects_url()?).await?;
        Ok(envelope.projects)
    }

    pub async fn project(&self, slug: &str) -> Result<Project, PortfolioApiError> {
        let envelope: ProjectEnvelope = self.get_json(self.project_url(slug)?).await?;
        Ok(envelope.project)
    }

    pub async fn about(&self) -> Result<About, PortfolioApiError> {
        self.get_json(self.about_url()?).await
    }

    pub async fn health(&self) -> Result<HealthStatus, PortfolioApiError> {
        self.get_json(self.health_url()?).await
    }

    async fn get_json<T>(&self, url: Url) -> Result<T, PortfolioApiError>
    where
        T: DeserializeOwned,
    {
        let endpoint = url.to_string();
        debug!(%endpoint, "portfolio api request");

        let response = self.build_request(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = parse_error_message(status, &body);
            debug!(%endpoint, %status, %message, "portfolio api request failed");
            return Err(PortfolioApiError::Status(status, message));
        }

        serde_json::from_str(&body).map_err(|source| PortfolioApiError::Decode { endpoint, source })
    }
}

#[async_trait]
impl PortfolioSource for PortfolioApiClient {
    fn source_id(&self) -> &str {
        HTTP_SOURCE_ID
    }

    async fn list_projects(&self) -> Result<Vec<Project>, SourceError> {
        self.projects().await.map_err(|error| {
            warn!(error = %error, "listing projects failed");
            error.into_source_error(None)
        })
    }

    async fn get_project(&self, slug: &str) -> Result<Project, SourceError> {
        self.project(slug).await.map_err(|error| {
            if error.status() != Some(reqwest::StatusCode::NOT_FOUND) {
                warn!(error = %error, slug, "loading project failed");
            }
            error.into_source_error(Some(slug))
        })
    }

    async fn get_about(&self) -> Result<About, SourceError> {
        self.about().await.map_err(|error| {
            warn!(error = %error, "loading about failed");
            error.into_source_error(None)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;

    use super::PortfolioApiClient;
    use crate::config::PortfolioApiConfig;
    use crate::error::PortfolioApiError;

    fn client(base_url: &str) -> PortfolioApiClient {
        PortfolioApiClient::new(PortfolioApiConfig::new(base_url)).expect("client")
    }

    #[test]
    fn endpoint_urls_hang_off_the_normalized_origin() {
        let client = client("http://localhost:3001/api/");

        assert_eq!(
            client.projects_url().expect("projects").as_str(),
            "http://localhost:3001/api/projects"
        );
        assert_eq!(
            client.about_url().expect("about").as_str(),
            "http://localhost:3001/api/about"
        );
        assert_eq!(
            client.health_url().expect("health").as_str(),
            "http://localhost:3001/health"
        );
    }

    #[test]
    fn project_url_escapes_the_slug_as_one_segment() {
        let client = client("http://localhost:3001");

        assert_eq!(
            client.project_url("a/b c").expect("project").as_str(),
            "http://localhost:3001/api/projects/a%2Fb%20c"
        );
    }

    #[test]
    fn build_request_sets_json_accept_header() {
        let client = client("http://localhost:3001");
        let request = client
            .build_request(client.projects_url().expect("projects"))
            .build()
            .expect("request");

        assert_eq!(request.method(), "GET");
        assert_eq!(
            request
                .headers()
                .get("accept")
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn new_rejects_unparseable_base_url() {
        let error = PortfolioApiClient::new(
            PortfolioApiConfig::new("not a url").with_timeout(Duration::from_secs(1)),
        )
        .expect_err("invalid base url must fail");

        assert!(matches!(error, PortfolioApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn not_found_maps_to_source_not_found_only_for_slug_lookups() {
        let not_found = || PortfolioApiError::Status(StatusCode::NOT_FOUND, "missing".to_string());

        assert!(not_found().into_source_error(Some("ghost")).is_not_found());
        assert!(!not_found().into_source_error(None).is_not_found());
    }
}
