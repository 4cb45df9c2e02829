use std::path::PathBuf;
use std::time::Duration;

use portfolio_api::DEFAULT_API_BASE_URL;
use thiserror::Error;

pub const SOURCE_ENV_VAR: &str = "TERMFOLIO_SOURCE";
pub const API_URL_ENV_VAR: &str = "TERMFOLIO_API_URL";
pub const TIMEOUT_ENV_VAR: &str = "TERMFOLIO_TIMEOUT_SEC";
pub const STATE_PATH_ENV_VAR: &str = "TERMFOLIO_STATE_PATH";
pub const LOG_FILE_ENV_VAR: &str = "TERMFOLIO_LOG_FILE";
pub const NO_COLOR_ENV_VAR: &str = "TERMFOLIO_NO_COLOR";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Mock,
    Http,
}

impl SourceKind {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "http" => Ok(Self::Http),
            _ => Err(ConfigError::UnknownSource(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unsupported TERMFOLIO_SOURCE '{0}'; expected 'mock' or 'http'")]
    UnknownSource(String),

    #[error("TERMFOLIO_TIMEOUT_SEC must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

/// Start-up settings read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub source: SourceKind,
    pub api_url: String,
    pub timeout: Duration,
    /// Explicit state file; `None` means the XDG default.
    pub state_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub no_color: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Mock,
            api_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            state_path: None,
            log_file: None,
            no_color: false,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let source = match read(SOURCE_ENV_VAR) {
            Some(value) => SourceKind::parse(&value)?,
            None => defaults.source,
        };
        let timeout = match read(TIMEOUT_ENV_VAR) {
            Some(value) => parse_timeout(&value)?,
            None => defaults.timeout,
        };

        Ok(Self {
            source,
            api_url: read(API_URL_ENV_VAR).unwrap_or(defaults.api_url),
            timeout,
            state_path: read(STATE_PATH_ENV_VAR).map(PathBuf::from),
            log_file: read(LOG_FILE_ENV_VAR).map(PathBuf::from),
            no_color: read(NO_COLOR_ENV_VAR).is_some_and(|value| is_truthy(&value)),
        })
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ => Err(ConfigError::InvalidTimeout(value.to_string())),
    }
}

fn is_truthy(value: &str) -> bool {
    !matches!(value.to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}
