use ::url::Url;

use crate::error::PortfolioApiError;

/// Default backend origin used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3001";

/// Normalize a configured base URL to the backend origin.
///
/// Normalization rules:
/// 1) blank input falls back to [`DEFAULT_API_BASE_URL`]
/// 2) trailing slashes are dropped
/// 3) a trailing `/api` segment is dropped, since endpoints add it back
pub fn normalize_base_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_API_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    trimmed
        .strip_suffix("/api")
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .to_string()
}

/// Builds an endpoint URL by appending escaped path segments to the base.
pub fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, PortfolioApiError> {
    let normalized = normalize_base_url(base_url);
    let mut url = Url::parse(&normalized)
        .map_err(|error| PortfolioApiError::InvalidBaseUrl(format!("{normalized}: {error}")))?;

    {
        let mut path = url.path_segments_mut().map_err(|_| {
            PortfolioApiError::InvalidBaseUrl(format!("{normalized}: cannot be a base URL"))
        })?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }

    Ok(url)
}
