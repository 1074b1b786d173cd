// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Settings are resolved in priority order: environment variables, then a
//! YAML file (`$CINESCOPE_CONFIG` or `<config_dir>/cinescope/config.yaml`),
//! then compiled defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default analysis backend base URL.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";

/// Default request timeout. Analysis runs a full detection pass over the
/// uploaded video, so this is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

const ENV_CONFIG_PATH: &str = "CINESCOPE_CONFIG";
const ENV_ENDPOINT: &str = "CINESCOPE_ENDPOINT";
const ENV_TIMEOUT: &str = "CINESCOPE_TIMEOUT_SECS";
const ENV_THUMBNAILS: &str = "CINESCOPE_THUMBNAILS";

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid endpoint {0:?}: expected an http:// or https:// URL with a host and no query")]
    InvalidEndpoint(String),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the analysis backend (no trailing slash).
    pub endpoint: String,
    /// Upper bound on a single analysis request.
    pub request_timeout_secs: u64,
    /// Whether the tutorials page fetches video thumbnails.
    pub load_thumbnails: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            load_thumbnails: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location and the process
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .or_else(default_config_path);

        let config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a YAML configuration file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        // An empty file deserializes to unit, not a mapping
        if yaml.trim().is_empty() {
            log::info!("Config file {} is empty, using defaults", path.display());
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&yaml).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loaded config from {}", path.display());
        config.validated()
    }

    /// Apply environment-style overrides. `lookup` returns the value for a
    /// variable name, if set.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }

        if let Some(value) = lookup(ENV_TIMEOUT) {
            self.request_timeout_secs = match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidValue { key: ENV_TIMEOUT, value }),
            };
        }

        if let Some(value) = lookup(ENV_THUMBNAILS) {
            self.load_thumbnails = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(ConfigError::InvalidValue { key: ENV_THUMBNAILS, value }),
            };
        }

        self.validated()
    }

    /// Full URL of the analyze route, below any path in the endpoint.
    pub fn analyze_url(&self) -> Result<Url, ConfigError> {
        let mut base = parse_endpoint(&self.endpoint)?;

        // join() replaces the last segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        base.join("analyze")
            .map_err(|_| ConfigError::InvalidEndpoint(self.endpoint.clone()))
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs",
                value: "0".to_string(),
            });
        }

        let url = parse_endpoint(&self.endpoint)?;
        self.endpoint = url.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }
}

/// Parse an endpoint base URL. A query or fragment would swallow the
/// analyze route, so both are rejected.
fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidEndpoint(endpoint.to_string());
    let url = Url::parse(endpoint.trim()).map_err(|_| invalid())?;

    let has_host = url.host_str().map(|h| !h.is_empty()).unwrap_or(false);
    if !matches!(url.scheme(), "http" | "https")
        || !has_host
        || url.query().is_some()
        || url.fragment().is_some()
    {
        return Err(invalid());
    }

    Ok(url)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cinescope").join("config.yaml"))
}
