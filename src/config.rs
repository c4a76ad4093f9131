//! Client configuration types.
//!
//! Configuration is explicit at construction: the target environment, the
//! shared secret used as signing key material, and HTTP transport settings.
//! All of it deserializes from TOML with per-field defaults.
//!
//! # Examples
//!
//! ```
//! use klarna_checkout::config::{ClientConfig, Environment};
//!
//! let config = ClientConfig::from_toml(
//!     r#"
//!     environment = "production"
//!     shared_secret = "my-shared-secret"
//!
//!     [http]
//!     timeout_secs = 20
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.environment, Environment::Production);
//! ```

use std::{fmt, str::FromStr, time::Duration};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Target Klarna Checkout environment.
///
/// Only two values are recognized; anything else is a configuration error
/// raised when the value is parsed, before any network activity.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Testdrive (sandbox) environment.
    #[default]
    Test,
    /// Production environment.
    Production,
}

impl Environment {
    /// Returns the base URL for this environment.
    ///
    /// The mapping is pure and total: production resolves to the live host,
    /// test to the sandbox host.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://checkout.klarna.com",
            Self::Test => "https://checkout.testdrive.klarna.com",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "test" => Ok(Self::Test),
            "production" => Ok(Self::Production),
            other => Err(Error::Config(format!(
                "environment must be one of: test, production (got {other:?})"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Test => f.write_str("test"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// Shared secret used as signing key material.
///
/// The secret is never transmitted and never logged; the `Debug`
/// representation is redacted so it cannot leak through tracing spans or
/// error context.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SharedSecret(String);

impl SharedSecret {
    /// Wraps a secret string.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the secret as bytes for digest input.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Maximum idle connections per host.
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: default_pool_max_idle(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl HttpConfig {
    /// Validates configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if timeout values are outside valid ranges:
    /// - `timeout_secs`: must be 1-300 seconds
    /// - `connect_timeout_secs`: must be 1-60 seconds
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(Error::Config("timeout_secs must be between 1 and 300".to_owned()));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(Error::Config("connect_timeout_secs must be between 1 and 60".to_owned()));
        }
        Ok(())
    }

    /// Returns timeout as Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns connect timeout as Duration.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Root client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Target environment. Defaults to test.
    #[serde(default)]
    pub environment: Environment,

    /// Shared secret for request signing. Required; there is no
    /// process-wide default.
    pub shared_secret: SharedSecret,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl ClientConfig {
    /// Creates a configuration with the given secret and default settings.
    #[must_use]
    pub fn new(environment: Environment, shared_secret: SharedSecret) -> Self {
        Self { environment, shared_secret, http: HttpConfig::default() }
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the TOML is malformed, a required field
    /// is missing, or a value fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| Error::Config(e.to_string()))?;
        config.http.validate()?;
        Ok(config)
    }
}

fn default_pool_max_idle() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
