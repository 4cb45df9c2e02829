//! Deterministic in-memory implementation of the `portfolio_source` contract.
//!
//! Used by `termfolio` tests and by the binary when no backend is configured.
//! Latency and failure switches let tests drive slow, fast, and failing fetches
//! without any transport.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use portfolio_source::{About, PortfolioSource, Project, ProjectStatus, SocialLinks, SourceError};

/// Stable source identifier used for explicit startup selection.
pub const MOCK_SOURCE_ID: &str = "mock";

/// Number of facade calls observed by a [`MockSource`], per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list_projects: usize,
    pub get_project: usize,
    pub get_about: usize,
}

impl CallCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.list_projects + self.get_project + self.get_about
    }
}

#[derive(Debug, Default)]
struct Counters {
    list_projects: AtomicUsize,
    get_project: AtomicUsize,
    get_about: AtomicUsize,
}

/// Deterministic mock source backed by fixture records.
#[derive(Debug)]
pub struct MockSource {
    projects: Vec<Project>,
    about: About,
    latency: Duration,
    project_latency: HashMap<String, Duration>,
    failing: bool,
    counters: Counters,
}

impl MockSource {
    /// Creates a mock source serving the given records.
    #[must_use]
    pub fn new(projects: Vec<Project>, about: About) -> Self {
        Self {
            projects,
            about,
            latency: Duration::ZERO,
            project_latency: HashMap::new(),
            failing: false,
            counters: Counters::default(),
        }
    }

    /// Applies a fixed delay before every response.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Overrides the delay applied to `get_project` for one slug.
    #[must_use]
    pub fn with_project_latency(mut self, slug: impl Into<String>, latency: Duration) -> Self {
        self.project_latency.insert(slug.into(), latency);
        self
    }

    /// Makes every call fail with [`SourceError::Unavailable`].
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Returns how many calls each operation has received.
    #[must_use]
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            list_projects: self.counters.list_projects.load(Ordering::SeqCst),
            get_project: self.counters.get_project.load(Ordering::SeqCst),
            get_about: self.counters.get_about.load(Ordering::SeqCst),
        }
    }

    async fn delay(&self, latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn check_available(&self) -> Result<(), SourceError> {
        if self.failing {
            Err(SourceError::unavailable("mock source configured to fail"))
        } else {
            Ok(())
        }
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(fixture_projects(), fixture_about())
    }
}

#[async_trait]
impl PortfolioSource for MockSource {
    fn source_id(&self) -> &str {
        MOCK_SOURCE_ID
    }

    async fn list_projects(&self) -> Result<Vec<Project>, SourceError> {
        self.counters.list_projects.fetch_add(1, Ordering::SeqCst);
        self.delay(self.latency).await;
        self.check_available()?;
        Ok(self.projects.clone())
    }

    async fn get_project(&self, slug: &str) -> Result<Project, SourceError> {
        self.counters.get_project.fetch_add(1, Ordering::SeqCst);
        let latency = self
            .project_latency
            .get(slug)
            .copied()
            .unwrap_or(self.latency);
        self.delay(latency).await;
        self.check_available()?;

        self.projects
            .iter()
            .find(|project| project.slug == slug)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                slug: slug.to_string(),
            })
    }

    async fn get_about(&self) -> Result<About, SourceError> {
        self.counters.get_about.fetch_add(1, Ordering::SeqCst);
        self.delay(self.latency).await;
        self.check_available()?;
        Ok(self.about.clone())
    }
}

/// Fixture projects served by [`MockSource::default`].
#[must_use]
pub fn fixture_projects() -> Vec<Project> {
    vec![
        Project {
            name: "Termfolio".to_string(),
            slug: "termfolio".to_string(),
            description: "Terminal-style portfolio with a command dispatcher core.".to_string(),
            url: "https://termfolio.example.dev".to_string(),
            tech_stack: vec![
                "rust".to_string(),
                "tokio".to_string(),
                "serde".to_string(),
            ],
            status: ProjectStatus::Active,
            long_description: Some(
                "Commands are parsed, resolved against a fixed registry, and rendered as immutable output lines."
                    .to_string(),
            ),
            github_url: Some("https://github.com/example/termfolio".to_string()),
        },
        Project {
            name: "Ledger Sync".to_string(),
            slug: "ledger-sync".to_string(),
            description: "Bank statement importer with rule-based categorisation.".to_string(),
            url: "https://ledger.example.dev".to_string(),
            tech_stack: vec!["rust".to_string(), "sqlite".to_string()],
            status: ProjectStatus::Wip,
            long_description: None,
            github_url: Some("https://github.com/example/ledger-sync".to_string()),
        },
        Project {
            name: "Pixel Garden".to_string(),
            slug: "pixel-garden".to_string(),
            description: "Generative plant sprites rendered to a tiny canvas.".to_string(),
            url: "https://garden.example.dev".to_string(),
            tech_stack: vec!["typescript".to_string(), "canvas".to_string()],
            status: ProjectStatus::Archived,
            long_description: None,
            github_url: None,
        },
    ]
}

/// Fixture profile served by [`MockSource::default`].
#[must_use]
pub fn fixture_about() -> About {
    About {
        name: "Alex Doe".to_string(),
        title: "Software Engineer".to_string(),
        bio: "Builds small, sharp tools for terminals and the web.".to_string(),
        email: "alex@example.dev".to_string(),
        location: Some("Lisbon, PT".to_string()),
        social: SocialLinks {
            github: Some("https://github.com/example".to_string()),
            linkedin: Some("https://linkedin.com/in/example".to_string()),
            twitter: None,
            website: Some("https://example.dev".to_string()),
        },
    }
}
