//! Remote endpoint configuration.

use crate::model::release::ReleaseId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

/// Base URL of the hosted changelog service.
pub const DEFAULT_BASE_URL: &str = "https://lushlog.web.app";

const RELEASES_PATH: &str = "api/v1/releases";
const ITEMS_SEGMENT: &str = "items";

/// Endpoint configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidUrl(String),
    UnsupportedScheme(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUrl(message) => write!(f, "invalid base url: {message}"),
            Self::UnsupportedScheme(scheme) => {
                write!(f, "unsupported base url scheme `{scheme}`; expected http|https")
            }
        }
    }
}

impl Error for ConfigError {}

/// Location of the release API.
///
/// # Invariants
/// - `base_url` is an `http`/`https` URL whose path ends with `/`, so a
///   path prefix such as `https://host/changelog` is preserved on join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    releases_url: Url,
}

impl ApiConfig {
    /// Parses and normalizes a base URL.
    ///
    /// # Errors
    /// - `InvalidUrl` when `base_url` is blank or does not parse.
    /// - `UnsupportedScheme` for anything other than `http`/`https`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidUrl("base url cannot be empty".to_string()));
        }

        let mut base_url =
            Url::parse(trimmed).map_err(|err| ConfigError::InvalidUrl(format!("`{trimmed}`: {err}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        base_url.set_query(None);
        base_url.set_fragment(None);

        let releases_url = base_url
            .join(RELEASES_PATH)
            .map_err(|err| ConfigError::InvalidUrl(err.to_string()))?;

        Ok(Self {
            base_url,
            releases_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET`/`POST` target: `{base}/api/v1/releases`.
    pub fn releases_url(&self) -> Url {
        self.releases_url.clone()
    }

    /// `DELETE` target: `{base}/api/v1/releases/{id}`.
    pub fn release_url(&self, release_id: &ReleaseId) -> Url {
        self.with_segments(&[release_id.as_str()])
    }

    /// Add-item target: `{base}/api/v1/releases/{id}/items`.
    pub fn release_items_url(&self, release_id: &ReleaseId) -> Url {
        self.with_segments(&[release_id.as_str(), ITEMS_SEGMENT])
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.releases_url.clone();
        // http(s) URLs always have a hierarchical path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("default base url is valid")
    }
}
