//! Dashboard configuration
//!
//! Read once at startup from the environment, with builder methods for tests
//! and embedding.

use std::{path::PathBuf, time::Duration};

use url::Url;

use crate::shared::error::ConfigError;

pub const BACKEND_URL_VAR: &str = "BACKEND_URL";
pub const LOG_FILE_VAR: &str = "GARDEN_DASHBOARD_LOG";
pub const COPIED_RESET_VAR: &str = "COPIED_RESET_MS";
pub const TICK_RATE_VAR: &str = "TICK_RATE_MS";

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080";

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Backend base URL (endpoint paths are appended to it)
    pub backend_url: Url,
    /// How long the "Copied!" marker stays visible
    pub copied_reset: Duration,
    /// UI redraw interval
    pub tick_rate: Duration,
    /// File receiving tracing output (stdout belongs to the terminal UI)
    pub log_path: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: Url::parse(DEFAULT_BACKEND_URL).expect("default backend url is valid"),
            copied_reset: Duration::from_millis(2000),
            tick_rate: Duration::from_millis(250),
            log_path: PathBuf::from("garden-dashboard.log"),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration with a custom backend URL
    pub fn new(backend_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: parse_backend_url(backend_url)?,
            ..Default::default()
        })
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(BACKEND_URL_VAR) {
            Some(url) => Self::new(&url)?,
            None => Self::default(),
        };

        if let Some(path) = lookup(LOG_FILE_VAR) {
            config = config.with_log_path(path);
        }
        if let Some(value) = lookup(COPIED_RESET_VAR) {
            config = config.with_copied_reset(parse_millis(COPIED_RESET_VAR, &value)?);
        }
        if let Some(value) = lookup(TICK_RATE_VAR) {
            config = config.with_tick_rate(parse_millis(TICK_RATE_VAR, &value)?);
        }

        Ok(config)
    }

    /// Set the "Copied!" marker lifetime
    pub fn with_copied_reset(mut self, delay: Duration) -> Self {
        self.copied_reset = delay;
        self
    }

    /// Set the UI redraw interval
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Set the log file path
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    /// Absolute URL of a backend endpoint, e.g. `endpoint("/orders/all")`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.backend_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_backend_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidUrl {
            value: value.to_string(),
            message: format!("unsupported scheme {scheme}"),
        }),
    }
}

fn parse_millis(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidDuration {
            var,
            value: value.to_string(),
        })
}
