pub mod client;
pub mod serialization;
pub mod transmission;

pub use client::{ClientConfig, ClientError, ConnectionStats, HttpClient};
pub use serialization::{BatchSerializer, SerializationError};
pub use transmission::{BatchTransmitter, TransmissionError, TransmissionResult};

use crate::buffer::Batch;
use futures::future::BoxFuture;

/// Destination for flushed batches.
///
/// The collector owns one sink behind an `Arc` and moves a clone into each
/// spawned transmission task.
pub trait BatchSink: Send + Sync {
    fn send_batch(
        &self,
        batch: Batch,
    ) -> BoxFuture<'_, Result<TransmissionResult, TransmissionError>>;
}

impl BatchSink for BatchTransmitter {
    fn send_batch(
        &self,
        batch: Batch,
    ) -> BoxFuture<'_, Result<TransmissionResult, TransmissionError>> {
        Box::pin(self.transmit(batch))
    }
}
