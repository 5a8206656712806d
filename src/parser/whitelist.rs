/// Messages containing any of these substrings are never reported.
pub const DEFAULT_SUPPRESSED: &[&str] = &["FocusTrap: Element must have at least one focusable child"];

/// Suppression list checked before an error is normalized.
///
/// Matching is a case-sensitive substring test.
#[derive(Debug, Clone)]
pub struct Whitelist {
    patterns: Vec<String>,
}

impl Whitelist {
    pub fn new() -> Self {
        Self {
            patterns: DEFAULT_SUPPRESSED.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Default set plus host-specific substrings. Empty entries are ignored,
    /// since they would match every message.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut whitelist = Self::new();
        whitelist.patterns.extend(
            extra
                .into_iter()
                .map(Into::into)
                .filter(|pattern: &String| !pattern.is_empty()),
        );
        whitelist
    }

    pub fn is_suppressed(&self, message: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| message.contains(pattern.as_str()))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for Whitelist {
    fn default() -> Self {
        Self::new()
    }
}
