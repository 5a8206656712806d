pub mod flush;
pub mod hooks;
pub mod report;

pub use hooks::{
    ErrorEvents, SubscriptionId, UncaughtCallback, UncaughtError, UncaughtErrorSource,
    install_panic_hook,
};
pub use report::ErrorReport;

use crate::buffer::ErrorBuffer;
use crate::domain::{BrowserName, ErrorRecord};
use crate::parser::{
    BrowserIdentifier, EnvironmentProbe, StackParser, Whitelist, normalize_extra_objects,
};
use crate::sender::{BatchSink, BatchTransmitter, ClientConfig, ClientError, HttpClient};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Sender error: {0}")]
    SenderError(#[from] ClientError),
    #[error("A tokio runtime is required to schedule the flush task")]
    NoRuntime,
}

/// Converts a configured interval in seconds to the flush period.
/// Non-positive, non-finite or sub-nanosecond values fall back to 10 seconds.
pub fn flush_interval_from_secs(secs: f64) -> Duration {
    if !(secs.is_finite() && secs > 0.0) {
        return DEFAULT_FLUSH_INTERVAL;
    }

    match Duration::try_from_secs_f64(secs) {
        Ok(interval) if !interval.is_zero() => interval,
        _ => DEFAULT_FLUSH_INTERVAL,
    }
}

#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub source: String,
    pub flush_interval: Duration,
    pub capture_uncaught: bool,
    pub app_version: String,
    pub endpoint: Option<String>,
    pub suppress: Vec<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            source: String::new(),
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            capture_uncaught: true,
            app_version: String::new(),
            endpoint: None,
            suppress: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    /// Constructed; no subscription and no flush task yet.
    Idle,
    /// Subscribed (when configured) and flushing on schedule.
    Armed,
}

struct CollectorInner {
    source: String,
    app_version: String,
    browser: BrowserName,
    whitelist: Whitelist,
    stack_parser: StackParser,
    buffer: ErrorBuffer,
}

impl CollectorInner {
    fn record(
        &self,
        message: String,
        line: Option<u64>,
        column: Option<u64>,
        objects: Option<String>,
    ) -> ErrorRecord {
        ErrorRecord {
            message,
            source: self.source.clone(),
            line,
            column,
            app_version: self.app_version.clone(),
            browser: self.browser,
            objects,
        }
    }

    fn capture_uncaught(&self, error: &UncaughtError) {
        if self.whitelist.is_suppressed(&error.message) {
            return;
        }

        let record = self.record(
            error.message.clone(),
            error.lineno.map(u64::from),
            error.colno.map(u64::from),
            None,
        );
        info!(
            error = %record.message,
            line = ?record.line,
            column = ?record.column,
            "Uncaught error captured"
        );
        self.buffer.append(record);
    }

    fn log_error(&self, error: &ErrorReport, extra: Option<Value>) {
        if self.whitelist.is_suppressed(error.message()) {
            return;
        }

        let objects = extra.and_then(normalize_extra_objects);
        let location = self.stack_parser.parse_location(error.stack());
        let record = self.record(
            error.message().to_string(),
            location.line,
            location.column,
            objects,
        );
        info!(
            error = %record.message,
            line = ?record.line,
            column = ?record.column,
            "Caught error logged"
        );
        self.buffer.append(record);
    }
}

/// Captures errors, buffers them and flushes the buffer on a fixed period.
///
/// Construction subscribes to the host's uncaught errors (unless disabled)
/// and schedules the flush task, so a returned collector is always
/// [`CollectorState::Armed`]. Nothing on the capture or flush paths returns an
/// error to the host. Dropping the collector stops the flush task; records
/// still buffered at that point are discarded.
pub struct Collector {
    inner: Arc<CollectorInner>,
    state: CollectorState,
    hook_installed: AtomicBool,
    flush_interval: Duration,
    cancel: CancellationToken,
}

impl Collector {
    /// Builds a collector that posts batches to `config.endpoint` over HTTP.
    pub fn new<S>(
        config: CollectorConfig,
        environment: &EnvironmentProbe,
        uncaught: &S,
    ) -> Result<Self, CollectorError>
    where
        S: UncaughtErrorSource + ?Sized,
    {
        let sink: Option<Arc<dyn BatchSink>> = match &config.endpoint {
            Some(endpoint) => {
                let client = HttpClient::new(ClientConfig::new(endpoint.as_str()))?;
                Some(Arc::new(BatchTransmitter::new(client)))
            }
            None => None,
        };

        Self::with_sink(config, environment, uncaught, sink)
    }

    /// Like [`Collector::new`] but flushing into `sink`. `None` means no
    /// endpoint: records are still buffered and drained, never sent.
    pub fn with_sink<S>(
        config: CollectorConfig,
        environment: &EnvironmentProbe,
        uncaught: &S,
        sink: Option<Arc<dyn BatchSink>>,
    ) -> Result<Self, CollectorError>
    where
        S: UncaughtErrorSource + ?Sized,
    {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| CollectorError::NoRuntime)?;

        if sink.is_none() {
            warn!("No API endpoint configured. Logs will not be sent to the server.");
        }

        let browser = BrowserIdentifier::detect(environment);
        let mut collector = Self {
            inner: Arc::new(CollectorInner {
                source: config.source,
                app_version: config.app_version,
                browser,
                whitelist: Whitelist::with_extra(config.suppress),
                stack_parser: StackParser::new(),
                buffer: ErrorBuffer::new(),
            }),
            state: CollectorState::Idle,
            hook_installed: AtomicBool::new(false),
            flush_interval: config.flush_interval,
            cancel: CancellationToken::new(),
        };

        if config.capture_uncaught {
            collector.capture_uncaught(uncaught);
        }

        let period = collector.flush_interval;
        let first_tick = tokio::time::Instant::now() + period;
        runtime.spawn(flush::run_flush_loop(
            collector.inner.buffer.clone(),
            sink,
            first_tick,
            period,
            collector.cancel.clone(),
        ));

        collector.state = CollectorState::Armed;
        info!(
            source = %collector.inner.source,
            browser = %browser,
            interval_ms = period.as_millis() as u64,
            "Error collector armed"
        );

        Ok(collector)
    }

    /// Subscribes to `uncaught`. Only the first call registers a callback;
    /// later calls return `false` and do nothing.
    pub fn capture_uncaught<S>(&self, uncaught: &S) -> bool
    where
        S: UncaughtErrorSource + ?Sized,
    {
        if self.hook_installed.swap(true, Ordering::SeqCst) {
            return false;
        }

        let inner: Weak<CollectorInner> = Arc::downgrade(&self.inner);
        uncaught.subscribe(Arc::new(move |error: &UncaughtError| {
            if let Some(inner) = inner.upgrade() {
                inner.capture_uncaught(error);
            }
        }));
        true
    }

    /// Buffers an explicitly reported error. `extra` holds auxiliary values
    /// attached to the record as text.
    pub fn log_error(&self, error: &ErrorReport, extra: Option<Value>) {
        self.inner.log_error(error, extra);
    }

    pub fn state(&self) -> CollectorState {
        self.state
    }

    pub fn browser(&self) -> BrowserName {
        self.inner.browser
    }

    pub fn flush_interval(&self) -> Duration {
        self.flush_interval
    }

    pub fn is_capturing_uncaught(&self) -> bool {
        self.hook_installed.load(Ordering::SeqCst)
    }

    pub fn buffered_len(&self) -> usize {
        self.inner.buffer.len()
    }
}

impl Drop for Collector {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("source", &self.inner.source)
            .field("browser", &self.inner.browser)
            .field("state", &self.state)
            .field("flush_interval", &self.flush_interval)
            .field("buffered", &self.buffered_len())
            .finish()
    }
}
