//! Domain layer for error-logger.
//!
//! Contains the canonical types shared across all modules:
//! - `ErrorRecord`: The pipeline's core data type
//! - `BrowserName`: Coarse browser family attached to every record

pub mod browser;
pub mod error_record;

pub use browser::BrowserName;
pub use error_record::ErrorRecord;
