use super::config::LogLevel;
use parking_lot::RwLock;
use std::sync::OnceLock;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },
    #[error("Failed to set global tracing subscriber: {0}")]
    SubscriberInit(#[from] tracing::subscriber::SetGlobalDefaultError),
    #[error("Logging system initialization failed")]
    InitFailed,
}

/// Builds the tracing filter from a default level plus per-target overrides.
pub struct LoggingSystem {
    directives: RwLock<Vec<(String, LogLevel)>>,
}

impl LoggingSystem {
    pub fn new() -> Self {
        Self {
            directives: RwLock::new(Vec::new()),
        }
    }

    pub fn add_directive(&self, target: &str, level: LogLevel) {
        self.directives.write().push((target.to_string(), level));
    }

    /// HTTP plumbing is only interesting when it fails.
    pub fn add_default_directives(&self) {
        for target in ["hyper", "hyper_util", "reqwest", "h2", "rustls"] {
            self.add_directive(target, LogLevel::Warn);
        }
    }

    pub fn build_filter_string(&self, default_level: LogLevel) -> String {
        let directives = self.directives.read();

        let mut filter_parts = Vec::with_capacity(directives.len() + 1);
        filter_parts.push(default_level.as_str().to_string());
        for (target, level) in directives.iter() {
            filter_parts.push(format!("{target}={}", level.as_str()));
        }

        filter_parts.join(",")
    }

    pub fn initialize_tracing(&self, default_level: LogLevel, json: bool) -> Result<(), LoggingError> {
        let filter = self.build_filter_string(default_level);
        let env_filter = EnvFilter::try_new(&filter).map_err(|e| LoggingError::InvalidFilter {
            filter: filter.clone(),
            message: e.to_string(),
        })?;

        let registry = tracing_subscriber::registry().with(env_filter);
        if json {
            tracing::subscriber::set_global_default(
                registry.with(fmt::layer().json().with_target(true)),
            )?;
        } else {
            tracing::subscriber::set_global_default(
                registry.with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .compact(),
                ),
            )?;
        }

        Ok(())
    }

    pub fn directive_count(&self) -> usize {
        self.directives.read().len()
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs the global subscriber once; later calls report the first outcome.
pub fn setup_logging_safe(level: LogLevel, json: bool) -> Result<(), LoggingError> {
    static INIT: OnceLock<bool> = OnceLock::new();

    let initialized = *INIT.get_or_init(|| {
        let logging_system = LoggingSystem::new();
        logging_system.add_default_directives();

        match logging_system.initialize_tracing(level, json) {
            Ok(()) => true,
            Err(e) => {
                eprintln!("Warning: {e}");
                false
            }
        }
    });

    if initialized {
        Ok(())
    } else {
        Err(LoggingError::InitFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_system_creation() {
        let logging_system = LoggingSystem::new();

        assert_eq!(logging_system.directive_count(), 0);
        assert_eq!(logging_system.build_filter_string(LogLevel::Debug), "debug");
    }

    #[test]
    fn test_default_directives_quiet_http_stack() {
        let logging_system = LoggingSystem::new();
        logging_system.add_default_directives();

        let filter = logging_system.build_filter_string(LogLevel::Info);

        assert!(filter.starts_with("info,"));
        assert!(filter.contains("reqwest=warn"));
        assert!(filter.contains("hyper=warn"));
        assert!(EnvFilter::try_new(&filter).is_ok());
    }
}
