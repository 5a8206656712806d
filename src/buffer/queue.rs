use crate::domain::ErrorRecord;
use parking_lot::Mutex;
use std::sync::Arc;

/// Arrival-ordered queue of records waiting for the next flush.
///
/// The queue is unbounded: records only leave through [`ErrorBuffer::drain_all`].
/// Clones share the same underlying storage. The lock is held only for a
/// single push or swap, never across an await point.
#[derive(Debug, Clone, Default)]
pub struct ErrorBuffer {
    records: Arc<Mutex<Vec<ErrorRecord>>>,
}

impl ErrorBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: ErrorRecord) {
        self.records.lock().push(record);
    }

    /// Takes everything buffered so far, leaving the buffer empty.
    pub fn drain_all(&self) -> Vec<ErrorRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}
