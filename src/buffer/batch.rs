use crate::domain::ErrorRecord;
use uuid::Uuid;

/// The full contents of the buffer at one flush tick, sent as a single request.
#[derive(Debug, Clone)]
pub struct Batch {
    id: String,
    records: Vec<ErrorRecord>,
}

impl Batch {
    pub fn new(records: Vec<ErrorRecord>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            records,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ErrorRecord> {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
