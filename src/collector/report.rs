use std::error::Error;
use std::panic::Location;

/// An explicitly reported error: its message plus stack text to locate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    message: String,
    stack: String,
}

impl ErrorReport {
    /// Report `message` from the caller's source location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: caller_frame(Location::caller()),
        }
    }

    /// Report `error` from the caller's source location, listing its sources.
    #[track_caller]
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut stack = caller_frame(Location::caller());
        let mut cause = error.source();
        while let Some(source) = cause {
            stack.push_str("\ncaused by: ");
            stack.push_str(&source.to_string());
            cause = source.source();
        }

        Self {
            message: error.to_string(),
            stack,
        }
    }

    /// Replace the captured frame with a stack trace supplied by the host.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }
}

fn caller_frame(location: &Location<'_>) -> String {
    format!(
        "    at {}:{}:{}",
        location.file(),
        location.line(),
        location.column()
    )
}
