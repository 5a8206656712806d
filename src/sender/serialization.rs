use crate::buffer::Batch;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("JSON serialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Batch is empty")]
    EmptyBatch,
}

/// Encodes a batch as the JSON array body the collection endpoint expects.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSerializer;

impl BatchSerializer {
    pub fn new() -> Self {
        Self
    }

    pub fn serialize_json_array(&self, batch: &Batch) -> Result<Vec<u8>, SerializationError> {
        if batch.is_empty() {
            return Err(SerializationError::EmptyBatch);
        }

        serde_json::to_vec(batch.records()).map_err(SerializationError::JsonError)
    }
}
