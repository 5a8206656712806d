use parking_lot::RwLock;
use std::any::Any;
use std::panic::PanicHookInfo;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// An error the host did not handle, with the location the runtime reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncaughtError {
    pub message: String,
    pub filename: Option<String>,
    pub lineno: Option<u32>,
    pub colno: Option<u32>,
}

impl UncaughtError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            filename: None,
            lineno: None,
            colno: None,
        }
    }

    pub fn at(mut self, filename: impl Into<String>, lineno: u32, colno: u32) -> Self {
        self.filename = Some(filename.into());
        self.lineno = Some(lineno);
        self.colno = Some(colno);
        self
    }

    pub fn from_panic(info: &PanicHookInfo<'_>) -> Self {
        let error = Self::new(panic_message(info.payload()));
        match info.location() {
            Some(location) => error.at(location.file(), location.line(), location.column()),
            None => error,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

pub type UncaughtCallback = Arc<dyn Fn(&UncaughtError) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registration point the host runtime exposes for unhandled errors.
pub trait UncaughtErrorSource {
    fn subscribe(&self, callback: UncaughtCallback) -> SubscriptionId;
}

/// In-process fan-out of uncaught errors to every subscriber.
///
/// Hosts call [`ErrorEvents::emit`] from wherever they observe unhandled
/// failures; [`install_panic_hook`] wires process panics into it.
#[derive(Clone, Default)]
pub struct ErrorEvents {
    subscribers: Arc<RwLock<Vec<(SubscriptionId, UncaughtCallback)>>>,
    next_id: Arc<AtomicU64>,
}

impl ErrorEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, error: &UncaughtError) {
        // Snapshot so a callback may subscribe without deadlocking.
        let callbacks: Vec<UncaughtCallback> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in callbacks {
            callback(error);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl UncaughtErrorSource for ErrorEvents {
    fn subscribe(&self, callback: UncaughtCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push((id, callback));
        id
    }
}

impl std::fmt::Debug for ErrorEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorEvents")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Forwards every panic to `events`, then runs the previously installed hook.
pub fn install_panic_hook(events: &ErrorEvents) {
    let events = events.clone();
    let previous = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        events.emit(&UncaughtError::from_panic(info));
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_emit_reaches_every_subscriber() {
        let events = ErrorEvents::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..2 {
            let seen = Arc::clone(&seen);
            events.subscribe(Arc::new(move |error: &UncaughtError| {
                seen.lock().push(error.message.clone());
            }));
        }

        events.emit(&UncaughtError::new("boom"));

        assert_eq!(*seen.lock(), vec!["boom".to_string(), "boom".to_string()]);
        assert_eq!(events.subscriber_count(), 2);
    }

    #[test]
    fn test_subscription_ids_are_distinct() {
        let events = ErrorEvents::new();

        let first = events.subscribe(Arc::new(|_: &UncaughtError| {}));
        let second = events.subscribe(Arc::new(|_: &UncaughtError| {}));

        assert_ne!(first, second);
    }

    #[test]
    fn test_location_builder() {
        let error = UncaughtError::new("x").at("app.js", 3, 9);

        assert_eq!(error.filename.as_deref(), Some("app.js"));
        assert_eq!(error.lineno, Some(3));
        assert_eq!(error.colno, Some(9));
    }

    #[test]
    fn test_panic_payload_messages() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42_u8), "Box<dyn Any>");
    }
}
