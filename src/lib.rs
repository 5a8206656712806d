// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_possible_truncation, // Millisecond durations fit in u64
    clippy::missing_errors_doc,       // Internal API
    clippy::module_name_repetitions,  // e.g. CollectorError in collector module
    clippy::must_use_candidate        // Annotated selectively on critical APIs
)]

//! Client-side error telemetry: capture, buffer and periodically flush error
//! records to a collection endpoint.
//!
//! ```rust,no_run
//! use error_logger::{Collector, CollectorConfig, ErrorEvents, ErrorReport, EnvironmentProbe};
//!
//! # async fn demo() -> Result<(), error_logger::collector::CollectorError> {
//! let events = ErrorEvents::new();
//! let collector = Collector::new(
//!     CollectorConfig {
//!         source: "app.js".to_string(),
//!         app_version: "1.0.0".to_string(),
//!         endpoint: Some("http://localhost:8080/logs".to_string()),
//!         ..CollectorConfig::default()
//!     },
//!     &EnvironmentProbe::from_user_agent("Mozilla/5.0 Chrome/126.0"),
//!     &events,
//! )?;
//!
//! collector.log_error(&ErrorReport::new("primeiro_nome is not defined"), None);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod buffer;
pub mod collector;
pub mod domain;
pub mod parser;
pub mod sender;

// Re-export main types for easy access
pub use app::Config;
pub use collector::{
    Collector, CollectorConfig, CollectorState, ErrorEvents, ErrorReport, UncaughtError,
    UncaughtErrorSource, install_panic_hook,
};
pub use domain::{BrowserName, ErrorRecord};
pub use parser::EnvironmentProbe;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
