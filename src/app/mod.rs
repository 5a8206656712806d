pub mod config;
pub mod logging_system;

pub use config::{Config, ConfigError, LogLevel};
pub use logging_system::{LoggingError, LoggingSystem, setup_logging_safe};

use crate::collector::{Collector, ErrorEvents, ErrorReport, install_panic_hook};
use crate::parser::EnvironmentProbe;
use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{error, info, warn};

/// Extra time after the last tick for its transmission task to finish.
const FINAL_FLUSH_GRACE: Duration = Duration::from_secs(1);

/// One error reported on standard input as a JSON object.
#[derive(Debug, Deserialize)]
struct InputReport {
    message: String,
    #[serde(default)]
    stack: Option<String>,
    #[serde(default)]
    objects: Option<Value>,
}

/// Turns one input line into a report. JSON objects with a `message` field
/// carry their own stack and extra objects; anything else is the message.
#[track_caller]
pub fn parse_input_line(line: &str) -> (ErrorReport, Option<Value>) {
    if let Ok(input) = serde_json::from_str::<InputReport>(line) {
        let report = ErrorReport::new(input.message);
        let report = match input.stack {
            Some(stack) => report.with_stack(stack),
            None => report,
        };
        return (report, input.objects);
    }

    (ErrorReport::new(line), None)
}

/// Uncaught-error source fed by the process panic hook, installed on first use.
pub fn panic_events() -> &'static ErrorEvents {
    static EVENTS: OnceLock<ErrorEvents> = OnceLock::new();

    EVENTS.get_or_init(|| {
        let events = ErrorEvents::new();
        install_panic_hook(&events);
        events
    })
}

/// Host process that relays errors read from stdin through a collector.
pub struct App {
    collector: Collector,
}

impl App {
    pub async fn from_args<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::load(args)?;
        Self::from_config(config).await
    }

    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        info!("Starting error-logger v{}", env!("CARGO_PKG_VERSION"));
        info!(
            "Configuration: source={:?}, api_url={:?}, interval={:?}",
            config.source, config.api_url, config.flush_interval
        );

        let collector = Collector::new(
            config.collector_config(),
            &EnvironmentProbe::default(),
            panic_events(),
        )
        .context("failed to start error collector")?;

        Ok(Self { collector })
    }

    pub fn collector(&self) -> &Collector {
        &self.collector
    }

    pub async fn run(self) -> anyhow::Result<()> {
        info!("error-logger is running. Reading errors from stdin, press Ctrl+C to stop.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        let (report, objects) = parse_input_line(line);
                        self.collector.log_error(&report, objects);
                    }
                    Ok(None) => {
                        info!("End of input, waiting for the final flush");
                        tokio::time::sleep(self.collector.flush_interval() + FINAL_FLUSH_GRACE)
                            .await;
                        break;
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                },
            }
        }

        info!("error-logger stopped.");
        Ok(())
    }
}

// Main entry point for the application
pub async fn main() -> anyhow::Result<()> {
    let config = Config::load(std::env::args())?;
    setup_logging_safe(config.log_level, config.log_json)?;

    let app = match App::from_config(config).await {
        Ok(app) => app,
        Err(e) => {
            error!("Startup error: {:#}", e);
            return Err(e);
        }
    };

    app.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_line_becomes_message() {
        let (report, objects) = parse_input_line("primeiro_nome is not defined");

        assert_eq!(report.message(), "primeiro_nome is not defined");
        assert!(report.stack().contains("mod.rs"));
        assert!(objects.is_none());
    }

    #[test]
    fn test_json_line_carries_stack_and_objects() {
        let line = r#"{"message":"bad form","stack":"at submit (app.js:19:47)","objects":[{"id":1}]}"#;

        let (report, objects) = parse_input_line(line);

        assert_eq!(report.message(), "bad form");
        assert_eq!(report.stack(), "at submit (app.js:19:47)");
        assert_eq!(objects, Some(json!([{"id": 1}])));
    }

    #[test]
    fn test_json_without_message_is_treated_as_text() {
        let (report, _) = parse_input_line(r#"{"level":"error"}"#);

        assert_eq!(report.message(), r#"{"level":"error"}"#);
    }
}
