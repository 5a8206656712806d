#![allow(dead_code)]

use error_logger::buffer::Batch;
use error_logger::collector::CollectorConfig;
use error_logger::domain::ErrorRecord;
use error_logger::sender::{BatchSink, TransmissionError, TransmissionResult};
use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

/// Sink that keeps every batch it receives.
#[derive(Clone, Default)]
pub struct RecordingSink {
    batches: Arc<Mutex<Vec<Vec<ErrorRecord>>>>,
}

impl RecordingSink {
    pub fn batches(&self) -> Vec<Vec<ErrorRecord>> {
        self.batches.lock().clone()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }
}

impl BatchSink for RecordingSink {
    fn send_batch(
        &self,
        batch: Batch,
    ) -> BoxFuture<'_, Result<TransmissionResult, TransmissionError>> {
        Box::pin(async move {
            let result = TransmissionResult {
                success: true,
                status_code: 200,
                latency: Duration::ZERO,
                batch_id: batch.id().to_string(),
                records_sent: batch.size(),
                bytes_sent: 0,
            };
            self.batches.lock().push(batch.into_records());
            Ok(result)
        })
    }
}

/// Log writer collecting formatted output in memory.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

pub fn test_config(interval: Duration) -> CollectorConfig {
    CollectorConfig {
        source: "app.js".to_string(),
        flush_interval: interval,
        app_version: "1.0.0".to_string(),
        ..CollectorConfig::default()
    }
}

/// Lets spawned transmission tasks run to completion.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
