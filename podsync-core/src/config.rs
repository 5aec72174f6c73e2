use std::collections::BTreeMap;
use std::time::Duration;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use podsync_providers::bilibili::{DEFAULT_API_BASE, DEFAULT_TIMEOUT};
use podsync_providers::ClientOptions;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::BuildConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub http: HttpConfig,
    /// Feeds to build, keyed by feed id
    pub feeds: BTreeMap<String, BuildConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

/// Upstream HTTP settings shared by all builders
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub api_base: String,
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl HttpConfig {
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_base: self.api_base.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    ///
    /// Nested keys use `__`, e.g. `PODSYNC_HTTP__TIMEOUT_SECONDS=30`.
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // A file named explicitly must exist
        if let Some(path) = config_file {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("PODSYNC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Check the loaded values, collecting every problem found
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.http.timeout_seconds == 0 {
            errors.push("http.timeout_seconds must be greater than 0".to_string());
        }
        if let Err(e) = Url::parse(&self.http.api_base) {
            errors.push(format!("http.api_base {:?} is not a valid URL: {e}", self.http.api_base));
        }
        for (id, feed) in &self.feeds {
            if feed.url.trim().is_empty() {
                errors.push(format!("feeds.{id}.url must not be empty"));
            }
            if feed.page_size == 0 {
                errors.push(format!("feeds.{id}.page_size must be greater than 0"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
