/*!
 * Scraper configuration.
 *
 * Loading, validating and defaulting the settings the scraper and its HTTP page
 * source run with.
 */

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::language_utils;
use crate::video_page;

/// Represents the scraper configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Language used when a request does not name one
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Host serving the watch page
    #[serde(default = "default_watch_host")]
    pub watch_host: String,

    /// User-Agent header sent by the HTTP page source
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header sent by the HTTP page source
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Title reported when the page has no title meta tag
    #[serde(default = "default_title_placeholder")]
    pub title_placeholder: String,

    /// Description reported when the page has no description meta tag
    #[serde(default = "default_description_placeholder")]
    pub description_placeholder: String,

    /// Verbosity for the host's logger
    ///
    /// The library only emits through the `log` facade and never installs a logger;
    /// hosts convert this with `log::LevelFilter::from` when they initialize theirs.
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_watch_host() -> String {
    "m.youtube.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_title_placeholder() -> String {
    "No title found".to_string()
}

fn default_description_placeholder() -> String {
    "No description found".to_string()
}

impl Config {
    /// Parse a configuration from JSON; absent fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.default_language.trim().is_empty() {
            return Err(anyhow!("Default language must not be empty"));
        }
        language_utils::validate_language_tag(&self.default_language)?;

        let host = self.watch_host.trim();
        if host.is_empty() || host.contains('/') {
            return Err(anyhow!("Invalid watch host: '{}'", self.watch_host));
        }
        url::Url::parse(&format!("https://{}/", host))
            .with_context(|| format!("Invalid watch host: '{}'", self.watch_host))?;

        for (name, value) in [
            ("user agent", &self.user_agent),
            ("accept language", &self.accept_language),
        ] {
            reqwest::header::HeaderValue::from_str(value)
                .with_context(|| format!("Invalid {} header value: '{}'", name, value))?;
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Canonical watch-page URL for a video id
    pub fn watch_url(&self, video_id: &str) -> String {
        video_page::watch_url(&self.watch_host, video_id)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_language: default_language(),
            watch_host: default_watch_host(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            request_timeout_secs: default_request_timeout_secs(),
            title_placeholder: default_title_placeholder(),
            description_placeholder: default_description_placeholder(),
            log_level: LogLevel::default(),
        }
    }
}
