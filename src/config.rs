//! Process configuration.
//!
//! Loaded once at process start and passed explicitly to the components
//! that need it; no component re-reads the environment after startup.

use thiserror::Error;

/// Default port for the liveness endpoint served by the hosting process.
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Environment variable naming the remote store endpoint.
const STORE_URL_VAR: &str = "TASKDECK_STORE_URL";
/// Environment variable naming the remote store credential.
const STORE_KEY_VAR: &str = "TASKDECK_STORE_KEY";
/// Environment variable naming the liveness-endpoint port.
const HTTP_PORT_VAR: &str = "TASKDECK_HTTP_PORT";

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable was absent or empty.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// An environment variable held an unparsable value.
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue {
        /// Variable that failed to parse.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Immutable process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Endpoint of the remote key-record store.
    pub store_url: String,
    /// Credential for the remote key-record store.
    pub store_key: String,
    /// Port the hosting process serves its liveness endpoint on.
    pub http_port: u16,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an injectable variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let store_url = require(STORE_URL_VAR)?;
        let store_key = require(STORE_KEY_VAR)?;
        let http_port = match lookup(HTTP_PORT_VAR) {
            None => DEFAULT_HTTP_PORT,
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: HTTP_PORT_VAR,
                value: raw.clone(),
            })?,
        };

        Ok(Self {
            store_url,
            store_key,
            http_port,
        })
    }
}
