use regex::Regex;
use std::sync::OnceLock;

// A file name with an extension followed by `:line:column`, e.g. `app.js:42:7`.
const FILE_LOCATION_PATTERN: &str = r"[A-Za-z0-9_\-]\.[A-Za-z][A-Za-z0-9]*:\d+:\d+";

static FILE_LOCATION: OnceLock<Option<Regex>> = OnceLock::new();

fn file_location_regex() -> Option<&'static Regex> {
    FILE_LOCATION
        .get_or_init(|| Regex::new(FILE_LOCATION_PATTERN).ok())
        .as_ref()
}

/// Line and column extracted from a stack trace. Either field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackLocation {
    pub line: Option<u64>,
    pub column: Option<u64>,
}

impl StackLocation {
    pub fn new(line: u64, column: u64) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_none() && self.column.is_none()
    }
}

/// Extracts the error location from raw stack text.
///
/// Only the first line carrying a `file.ext:line:column` token is considered. That line
/// is split on `:` and the last two segments become the column and line
/// candidates. Non-digit characters are discarded from each candidate and the
/// remaining digits are joined, so `"4a2"` reads as 42. Downstream consumers
/// rely on that output shape, so it is kept as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackParser;

impl StackParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_location(&self, raw_stack: &str) -> StackLocation {
        let Some(regex) = file_location_regex() else {
            return StackLocation::default();
        };

        let Some(frame) = raw_stack.lines().find(|line| regex.is_match(line)) else {
            return StackLocation::default();
        };

        let mut segments = frame.rsplit(':');
        let column = segments.next().and_then(digits_of);
        let line = segments.next().and_then(digits_of);

        StackLocation { line, column }
    }
}

fn digits_of(segment: &str) -> Option<u64> {
    let digits: String = segment.chars().filter(char::is_ascii_digit).collect();
    // Empty or overflowing digit runs degrade to a missing field.
    digits.parse().ok()
}
