//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `NEBULA_HOST` - Bind address (default: 127.0.0.1)
//! - `NEBULA_PORT` - Listen port (default: 3000)
//! - `NEBULA_BASE_URL` - Public URL; `https://` enables secure cookies (default: <http://localhost:3000>)
//! - `NEBULA_AUTH_API_URL` - Base URL of the authentication API (default: <http://localhost:5000>)
//! - `NEBULA_CATALOG_PATH` - JSON catalog file; the generated catalog is used when unset
//! - `NEBULA_CATALOG_SIZE` - Generated catalog size (default: 50)
//! - `NEBULA_CATALOG_SEED` - Generated catalog price seed
//! - `NEBULA_PAGE_SIZE` - Products per explore page (default: 12)
//! - `NEBULA_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `NEBULA_TRUSTED_PROXIES` - Comma-separated proxy IPs whose `X-Forwarded-For` is honored (default: none)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use nebula_core::catalog::{DEFAULT_CATALOG_SIZE, DEFAULT_PAGE_SIZE};
use thiserror::Error;
use url::Url;

/// Seed used for the generated catalog when `NEBULA_CATALOG_SEED` is unset.
pub const DEFAULT_CATALOG_SEED: u64 = 0x4E45_4255_4C41;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Authentication API configuration
    pub auth: AuthApiConfig,
    /// Product catalog configuration
    pub catalog: CatalogConfig,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Peers allowed to report the client address via forwarding headers
    pub trusted_proxies: Vec<IpAddr>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// External authentication API configuration.
#[derive(Debug, Clone)]
pub struct AuthApiConfig {
    /// Base URL; the login endpoint is `{base_url}/login`
    pub base_url: Url,
}

/// Where the catalog comes from and how it is paged.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// JSON catalog file (overrides the generator)
    pub path: Option<PathBuf>,
    /// Generated catalog size
    pub size: u32,
    /// Generated catalog price seed
    pub seed: u64,
    /// Products per explore page
    pub page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            size: DEFAULT_CATALOG_SIZE,
            seed: DEFAULT_CATALOG_SEED,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or("NEBULA_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_env_or("NEBULA_PORT", 3000_u16)?;
        let base_url = get_env_or_default("NEBULA_BASE_URL", "http://localhost:3000");

        Ok(Self {
            host,
            port,
            base_url,
            auth: AuthApiConfig::from_env()?,
            catalog: CatalogConfig::from_env()?,
            static_dir: PathBuf::from(get_env_or_default(
                "NEBULA_STATIC_DIR",
                "crates/storefront/static",
            )),
            trusted_proxies: get_optional_env("NEBULA_TRUSTED_PROXIES")
                .map_or_else(|| Ok(Vec::new()), |raw| parse_ip_list(&raw))
                .map_err(|e| ConfigError::InvalidEnvVar("NEBULA_TRUSTED_PROXIES".to_string(), e))?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl AuthApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_env_or_default("NEBULA_AUTH_API_URL", "http://localhost:5000");
        let base_url = parse_base_url(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("NEBULA_AUTH_API_URL".to_string(), e))?;
        Ok(Self { base_url })
    }

    /// The login endpoint, resolved against the base URL.
    #[must_use]
    pub fn login_url(&self) -> Url {
        // Join on a trailing-slash base keeps any path prefix intact
        self.base_url
            .join("login")
            .unwrap_or_else(|_| self.base_url.clone())
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let page_size = parse_env_or("NEBULA_PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "NEBULA_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            path: get_optional_env("NEBULA_CATALOG_PATH").map(PathBuf::from),
            size: parse_env_or("NEBULA_CATALOG_SIZE", defaults.size)?,
            seed: parse_env_or("NEBULA_CATALOG_SEED", defaults.seed)?,
            page_size,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an http(s) base URL, normalizing it to end with `/`.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Parse a comma-separated list of IP addresses, ignoring blank entries.
fn parse_ip_list(raw: &str) -> Result<Vec<IpAddr>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<IpAddr>()
                .map_err(|e| format!("'{entry}': {e}"))
        })
        .collect()
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
