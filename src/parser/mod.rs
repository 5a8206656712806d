//! Error normalization: everything that turns a raw error into record fields.

pub mod browser;
pub mod extra;
pub mod stack;
pub mod whitelist;

pub use browser::{BrowserIdentifier, EnvironmentProbe};
pub use extra::normalize_extra_objects;
pub use stack::{StackLocation, StackParser};
pub use whitelist::Whitelist;
