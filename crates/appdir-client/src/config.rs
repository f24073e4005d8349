//! Client configuration.
//!
//! Uses Figment to merge a TOML file with `APPDIR_*` environment variables
//! (nested keys separated by `__`, e.g. `APPDIR_PAGINATION__PAGE_SIZE`).
//! Programmatic construction goes through [`ClientConfig::new`] and the
//! `with_*` builders.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::Path;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable prefix recognised by [`ClientConfig::load`].
pub const ENV_PREFIX: &str = "APPDIR_";

/// How a response body is turned into JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    /// Parse the raw bytes as JSON.
    #[default]
    Json,
    /// Decode the bytes as UTF-8 text first, then parse the text.
    Text,
}

/// Client-side pagination settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub page_size: usize,
}

/// Settings for a [`crate::DirectoryClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root of the directory service, without a trailing slash.
    pub base_url: String,
    /// Enables paging of search results and sizes paginated listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationConfig>,
    /// Extra request headers. Empty by default.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: BodyMode,
}

impl ClientConfig {
    /// Creates a configuration with no pagination and no extra headers.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            pagination: None,
            headers: BTreeMap::new(),
            body: BodyMode::default(),
        }
    }

    /// Loads `path` (TOML) overlaid with `APPDIR_*` environment variables.
    ///
    /// A missing file is not an error; the environment alone may supply
    /// every key.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(path.as_ref()))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    /// Extracts and validates a configuration from any figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Enables pagination with the given page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pagination = Some(PaginationConfig { page_size });
        self
    }

    /// Adds a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sends `Accept: application/json` with every request.
    pub fn accept_json(self) -> Self {
        self.with_header("Accept", "application/json")
    }

    /// Selects how response bodies are parsed.
    pub fn with_body_mode(mut self, body: BodyMode) -> Self {
        self.body = body;
        self
    }

    /// Checks the invariants the client relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        self.page_size().map(|_| ())
    }

    /// The configured page size, if pagination is enabled.
    pub fn page_size(&self) -> Result<Option<NonZeroUsize>, ConfigError> {
        self.pagination
            .map(|p| NonZeroUsize::new(p.page_size).ok_or(ConfigError::ZeroPageSize))
            .transpose()
    }

    /// `base_url` with surrounding whitespace and trailing slashes removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}
