//! Connection settings of the client: where the API lives, the access key and
//! where cache files go.

use bon::Builder;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://api.wunderground.com/api";

pub const API_KEY_VAR: &str = "WUNDERGROUND_API_KEY";
pub const BASE_URL_VAR: &str = "WUNDERGROUND_BASE_URL";
pub const CACHE_DIR_VAR: &str = "WUNDERGROUND_CACHE_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("No API key configured (set WUNDERGROUND_API_KEY)")]
    MissingApiKey,
}

/// Client configuration.
///
/// # Examples
///
/// ```
/// use wunderground::WundergroundConfig;
///
/// let config = WundergroundConfig::builder()
///     .api_key("0123456789abcdef")
///     .cache_dir("/tmp/wunderground")
///     .build();
/// assert_eq!(config.base_url, "http://api.wunderground.com/api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct WundergroundConfig {
    /// Access key, sent as the first path segment of every request.
    #[builder(into)]
    pub api_key: String,
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    /// Root of the cache files. `None` uses the system cache directory.
    #[builder(into)]
    pub cache_dir: Option<PathBuf>,
}

impl WundergroundConfig {
    /// Reads [`API_KEY_VAR`], [`BASE_URL_VAR`] and [`CACHE_DIR_VAR`] from the environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingApiKey`] when no non-empty key is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = non_empty(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        Ok(Self {
            api_key,
            base_url: non_empty(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            cache_dir: non_empty(CACHE_DIR_VAR).map(PathBuf::from),
        })
    }
}
