use super::serialization::{BatchSerializer, SerializationError};
use super::HttpClient;
use crate::buffer::Batch;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum TransmissionError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[from] SerializationError),
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct TransmissionResult {
    pub success: bool,
    pub status_code: u16,
    pub latency: Duration,
    pub batch_id: String,
    pub records_sent: usize,
    pub bytes_sent: usize,
}

/// Posts batches to the collection endpoint. The reply body is ignored.
#[derive(Debug, Clone)]
pub struct BatchTransmitter {
    pub client: HttpClient,
    serializer: BatchSerializer,
}

impl BatchTransmitter {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            serializer: BatchSerializer::new(),
        }
    }

    pub async fn transmit(&self, batch: Batch) -> Result<TransmissionResult, TransmissionError> {
        let start = Instant::now();
        let batch_id = batch.id().to_string();
        let records_sent = batch.size();

        debug!("Sending batch {} with {} records", batch_id, records_sent);

        let payload = self.serializer.serialize_json_array(&batch)?;
        let bytes_sent = payload.len();

        let response = self
            .client
            .client
            .post(self.client.endpoint_url.clone())
            .headers(Self::build_headers())
            .body(payload)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                self.client.stats.record_request(false, start.elapsed());
                let stats = self.client.connection_stats();
                debug!(
                    requests = stats.total_requests,
                    failed = stats.failed_requests,
                    "Request for batch {} failed",
                    batch_id
                );
                return Err(TransmissionError::RequestError(e));
            }
        };

        let latency = start.elapsed();
        let status_code = response.status().as_u16();
        let success = response.status().is_success();

        self.client.stats.record_request(success, latency);
        let stats = self.client.connection_stats();

        if success {
            info!(
                requests = stats.total_requests,
                avg_latency_ms = stats.average_response_time.as_millis() as u64,
                "Successfully sent batch {} ({} records, {} bytes) in {:?}",
                batch_id, records_sent, bytes_sent, latency
            );
        } else {
            warn!(
                requests = stats.total_requests,
                failed = stats.failed_requests,
                "Failed to send batch {}: HTTP {}",
                batch_id, status_code
            );
        }

        Ok(TransmissionResult {
            success,
            status_code,
            latency,
            batch_id,
            records_sent,
            bytes_sent,
        })
    }

    pub fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_declare_json_both_ways() {
        let headers = BatchTransmitter::build_headers();

        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }
}
