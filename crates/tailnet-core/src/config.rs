//! Configuration for Tailscale API clients.
//!
//! The configuration is set once at construction and never changes afterwards.
//! It can be built in code with the `with_*` setters or deserialized from any
//! serde source; omitted fields take the defaults below.

use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Public Tailscale API v2 root.
pub const DEFAULT_BASE_URL: &str = "https://api.tailscale.com/api/v2";

/// Tailnet sentinel meaning "the tailnet the API key belongs to".
pub const DEFAULT_TAILNET: &str = "-";

/// Default idle timeout for pooled connections (seconds)
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("tailnet-api/", env!("CARGO_PKG_VERSION"));

/// Configuration for a Tailscale API client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientConfig {
    /// API access token, sent as the basic-auth username
    pub api_key: SecretString,

    /// Tailnet name, or `-` for the key's default tailnet
    #[validate(length(min = 1))]
    #[serde(default = "default_tailnet")]
    pub tailnet: String,

    /// API root every request path is joined onto
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds; `None` lets requests block indefinitely
    #[validate(range(min = 1))]
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Idle timeout for pooled connections in seconds
    #[serde(default = "default_pool_idle_timeout_secs")]
    pub pool_idle_timeout_secs: u64,

    /// Maximum idle connections kept per host
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,

    /// Custom `User-Agent` header
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_tailnet() -> String {
    DEFAULT_TAILNET.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_pool_idle_timeout_secs() -> u64 {
    DEFAULT_POOL_IDLE_TIMEOUT
}

const fn default_pool_max_idle_per_host() -> usize {
    DEFAULT_POOL_MAX_IDLE_PER_HOST
}

impl ClientConfig {
    /// Create a configuration for the given API key with default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            tailnet: default_tailnet(),
            base_url: default_base_url(),
            timeout_secs: None,
            pool_idle_timeout_secs: DEFAULT_POOL_IDLE_TIMEOUT,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            user_agent: None,
        }
    }

    /// Set the tailnet name.
    #[must_use]
    pub fn with_tailnet(mut self, tailnet: impl Into<String>) -> Self {
        self.tailnet = tailnet.into();
        self
    }

    /// Set the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = Some(seconds);
        self
    }

    /// Set the connection pool idle timeout in seconds.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, seconds: u64) -> Self {
        self.pool_idle_timeout_secs = seconds;
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Set a custom `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// The API key in clear text.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Connection pool idle timeout.
    #[must_use]
    pub const fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout_secs)
    }

    /// `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Check field constraints and that the API key is not blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first violated constraint.
    pub fn check(&self) -> Result<(), Error> {
        if self.api_key().trim().is_empty() {
            return Err(Error::ConfigError("API key must not be empty".to_string()));
        }
        self.validate()?;
        Ok(())
    }

    /// Parse the API root, normalised to end with `/` so relative paths
    /// are appended instead of replacing the last segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        let trimmed = self.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{trimmed}/"))?)
    }
}
