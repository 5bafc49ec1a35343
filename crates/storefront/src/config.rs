//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ROCKETSHOES_API_URL` - Base URL of the catalog API (default: `http://localhost:3333`)
//! - `ROCKETSHOES_STORAGE_PATH` - File backing local storage (default: `.rocketshoes/local-storage.json`)
//! - `ROCKETSHOES_HTTP_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `ROCKETSHOES_CATALOG_CACHE_TTL_SECS` - Product listing cache TTL, 0 disables (default: 300)
//! - `ROCKETSHOES_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_PATH: &str = ".rocketshoes/local-storage.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CATALOG_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API settings
    pub catalog: CatalogConfig,
    /// Path of the JSON file backing local storage
    pub storage_path: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., production, staging)
    pub sentry_environment: Option<String>,
}

/// Catalog API client configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the API serving `/products` and `/stock`
    pub api_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// TTL of the cached product listing (zero disables the cache)
    pub listing_ttl: Duration,
}

impl CatalogConfig {
    /// Catalog settings with default timeout and cache TTL.
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            listing_ttl: Duration::from_secs(DEFAULT_CATALOG_CACHE_TTL_SECS),
        }
    }
}

impl StorefrontConfig {
    /// Configuration with defaults for everything except the API URL.
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self {
            catalog: CatalogConfig::new(api_url),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            log_format: LogFormat::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = parse_api_url(
            "ROCKETSHOES_API_URL",
            &lookup("ROCKETSHOES_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;
        let timeout_secs = parse_or_default(
            &lookup,
            "ROCKETSHOES_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ROCKETSHOES_HTTP_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let ttl_secs = parse_or_default(
            &lookup,
            "ROCKETSHOES_CATALOG_CACHE_TTL_SECS",
            DEFAULT_CATALOG_CACHE_TTL_SECS,
        )?;
        let log_format = parse_or_default(&lookup, "ROCKETSHOES_LOG_FORMAT", LogFormat::Pretty)?;
        let storage_path = lookup("ROCKETSHOES_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        Ok(Self {
            catalog: CatalogConfig {
                api_url,
                timeout: Duration::from_secs(timeout_secs),
                listing_ttl: Duration::from_secs(ttl_secs),
            },
            storage_path,
            log_format,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an absolute http(s) base URL.
///
/// A trailing slash is ensured so that relative joins keep any path prefix.
fn parse_api_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.catalog.api_url.as_str(), "http://localhost:3333/");
        assert_eq!(config.catalog.timeout, Duration::from_secs(10));
        assert_eq!(config.catalog.listing_ttl, Duration::from_secs(300));
        assert_eq!(config.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("ROCKETSHOES_API_URL", "https://api.example.com/v1"),
            ("ROCKETSHOES_STORAGE_PATH", "/tmp/cart.json"),
            ("ROCKETSHOES_HTTP_TIMEOUT_SECS", "3"),
            ("ROCKETSHOES_CATALOG_CACHE_TTL_SECS", "0"),
            ("ROCKETSHOES_LOG_FORMAT", "JSON"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ]))
        .unwrap();

        assert_eq!(config.catalog.api_url.as_str(), "https://api.example.com/v1/");
        assert_eq!(config.catalog.timeout, Duration::from_secs(3));
        assert_eq!(config.catalog.listing_ttl, Duration::ZERO);
        assert_eq!(config.storage_path, PathBuf::from("/tmp/cart.json"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_invalid_url() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[("ROCKETSHOES_API_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "ROCKETSHOES_API_URL"));
    }

    #[test]
    fn test_unsupported_scheme() {
        let result =
            StorefrontConfig::from_lookup(lookup_from(&[("ROCKETSHOES_API_URL", "ftp://host/")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = StorefrontConfig::from_lookup(lookup_from(&[(
            "ROCKETSHOES_HTTP_TIMEOUT_SECS",
            "0",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_number() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[(
            "ROCKETSHOES_CATALOG_CACHE_TTL_SECS",
            "five",
        )]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid environment variable ROCKETSHOES_CATALOG_CACHE_TTL_SECS: invalid digit found in string"
        );
    }

    #[test]
    fn test_empty_sentry_dsn_is_none() {
        let config =
            StorefrontConfig::from_lookup(lookup_from(&[("SENTRY_DSN", "")])).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
