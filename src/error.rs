use portfolio_source::SourceError;
use thiserror::Error;

/// Failure of one command invocation.
///
/// Every variant is converted to exactly one error line at the dispatcher
/// boundary; none of them end the session.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command not found: {name}")]
    CommandNotFound { name: String },

    #[error("usage: {usage}")]
    Usage { usage: String },

    #[error("{}", describe_fetch_failure(resource, source))]
    DataFetch {
        resource: &'static str,
        #[source]
        source: SourceError,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl CommandError {
    #[must_use]
    pub fn usage(usage: impl Into<String>) -> Self {
        Self::Usage {
            usage: usage.into(),
        }
    }

    #[must_use]
    pub fn fetch(resource: &'static str, source: SourceError) -> Self {
        Self::DataFetch { resource, source }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

fn describe_fetch_failure(resource: &str, source: &SourceError) -> String {
    match source {
        SourceError::NotFound { slug } => format!("no such project: {slug}"),
        SourceError::Unavailable(_) | SourceError::Malformed(_) => {
            format!("failed to load {resource}")
        }
    }
}
