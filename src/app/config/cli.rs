use super::{ConfigError, LogLevel};
use crate::collector::{CollectorConfig, DEFAULT_FLUSH_INTERVAL, flush_interval_from_secs};
use clap::{ArgAction, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
#[serde(default)]
pub struct Config {
    /// Name of the module whose errors are collected
    #[arg(long, env = "ERROR_LOGGER_SOURCE", default_value_t = String::new())]
    pub source: String,

    /// Flush interval in seconds (non-positive values fall back to 10)
    #[arg(long, env = "ERROR_LOGGER_INTERVAL", default_value = "10", allow_negative_numbers = true)]
    pub interval: f64,

    /// Capture uncaught errors (panics)
    #[arg(long, env = "ERROR_LOGGER_LOG_UNCAUGHT", default_value_t = true, action = ArgAction::Set)]
    pub log_uncaught: bool,

    /// Application version attached to every record
    #[arg(long, env = "ERROR_LOGGER_APP_VERSION", default_value_t = String::new())]
    pub app_version: String,

    /// Collection endpoint receiving batches (POST)
    #[arg(long, env = "ERROR_LOGGER_API_URL")]
    pub api_url: Option<String>,

    /// Additional message substrings to suppress
    #[arg(long, env = "ERROR_LOGGER_SUPPRESS", value_delimiter = ',')]
    pub suppress: Vec<String>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,

    /// Configuration file path (optional)
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Derived fields (not CLI arguments)
    #[serde(skip)]
    #[arg(skip)]
    pub flush_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: String::new(),
            interval: 10.0,
            log_uncaught: true,
            app_version: String::new(),
            api_url: None,
            suppress: Vec::new(),
            log_level: LogLevel::Info,
            log_json: false,
            config_file: None,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
        }
    }
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut config = Config::parse_from(args);
        config.post_process();
        config.validate()?;
        Ok(config)
    }

    /// Parses CLI arguments (with env fallbacks); a `--config-file`, when
    /// given, replaces them entirely.
    pub fn load<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Self::from_args(args)?;
        match &config.config_file {
            Some(path) => Self::from_file(path),
            None => Ok(config),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.post_process();
        config.validate()?;
        Ok(config)
    }

    pub fn post_process(&mut self) {
        self.flush_interval = flush_interval_from_secs(self.interval);

        if self.api_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            self.api_url = None;
        }
        self.suppress.retain(|pattern| !pattern.is_empty());
    }

    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            source: self.source.clone(),
            flush_interval: self.flush_interval,
            capture_uncaught: self.log_uncaught,
            app_version: self.app_version.clone(),
            endpoint: self.api_url.clone(),
            suppress: self.suppress.clone(),
        }
    }
}
