use serde::{Deserialize, Serialize};
use std::fmt;

/// Browser family reported alongside each error.
///
/// Detection is coarse on purpose: records only need enough to group errors
/// by engine, not exact versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserName {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Ie,
    Opera,
    #[default]
    Unknown,
}

impl BrowserName {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserName::Chrome => "chrome",
            BrowserName::Firefox => "firefox",
            BrowserName::Safari => "safari",
            BrowserName::Edge => "edge",
            BrowserName::Ie => "ie",
            BrowserName::Opera => "opera",
            BrowserName::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BrowserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
