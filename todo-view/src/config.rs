//! Configuration for the to-do list view.
//!
//! Loaded from environment variables with defaults suited to a local
//! static file server.

use std::time::Duration;
use thiserror::Error;
use todo_view_runtime::StoreConfig;

/// Base URL variable
pub const BASE_URL_VAR: &str = "TODO_VIEW_BASE_URL";
/// Resource path variable
pub const RESOURCE_VAR: &str = "TODO_VIEW_RESOURCE";
/// Shutdown timeout variable, in milliseconds
pub const SHUTDOWN_TIMEOUT_VAR: &str = "TODO_VIEW_SHUTDOWN_TIMEOUT_MS";
/// Action broadcast capacity variable
pub const BROADCAST_CAPACITY_VAR: &str = "TODO_VIEW_BROADCAST_CAPACITY";

/// Errors raised while loading or resolving configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL or resource path does not form a valid URL
    #[error("invalid resource URL {base}{path}: {message}")]
    InvalidUrl {
        /// Configured base URL
        base: String,
        /// Configured resource path
        path: String,
        /// Parser error message
        message: String,
    },

    /// A variable holds a value that does not parse
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoViewConfig {
    /// URL the resource path is resolved against
    pub base_url: String,
    /// Path of the JSON resource, relative to `base_url`
    pub resource_path: String,
    /// How long shutdown waits for running effects
    pub shutdown_timeout: Duration,
    /// Capacity of the store's action broadcast
    pub broadcast_capacity: usize,
}

impl Default for TodoViewConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/".to_string(),
            resource_path: "todos.json".to_string(),
            shutdown_timeout: Duration::from_secs(5),
            broadcast_capacity: 16,
        }
    }
}

impl TodoViewConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let shutdown_timeout = match lookup(SHUTDOWN_TIMEOUT_VAR) {
            Some(raw) => Duration::from_millis(parse(SHUTDOWN_TIMEOUT_VAR, raw)?),
            None => defaults.shutdown_timeout,
        };

        let broadcast_capacity = match lookup(BROADCAST_CAPACITY_VAR) {
            Some(raw) => parse(BROADCAST_CAPACITY_VAR, raw)?,
            None => defaults.broadcast_capacity,
        };

        Ok(Self {
            base_url: lookup(BASE_URL_VAR).unwrap_or(defaults.base_url),
            resource_path: lookup(RESOURCE_VAR).unwrap_or(defaults.resource_path),
            shutdown_timeout,
            broadcast_capacity,
        })
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the resource path
    #[must_use]
    pub fn with_resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = path.into();
        self
    }

    /// Set the shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Set the broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Resolve the resource path against the base URL
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the base is not an absolute URL
    /// or the path cannot be joined onto it.
    pub fn resource_url(&self) -> Result<reqwest::Url, ConfigError> {
        reqwest::Url::parse(&self.base_url)
            .and_then(|base| base.join(&self.resource_path))
            .map_err(|error| ConfigError::InvalidUrl {
                base: self.base_url.clone(),
                path: self.resource_path.clone(),
                message: error.to_string(),
            })
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.broadcast_capacity, self.shutdown_timeout)
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}
