use crate::buffer::{Batch, ErrorBuffer};
use crate::sender::BatchSink;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Drives one flush tick every `period`, the first one at `first_tick`.
///
/// Transmissions are spawned and never awaited here, so a slow endpoint
/// cannot delay the next tick.
pub(crate) async fn run_flush_loop(
    buffer: ErrorBuffer,
    sink: Option<Arc<dyn BatchSink>>,
    first_tick: Instant,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Flush loop stopped");
                break;
            }
            _ = ticker.tick() => {
                flush_tick(&buffer, sink.as_ref());
            }
        }
    }
}

/// Drains the buffer and hands the batch to a freshly spawned transmission
/// task. Returns the task handle, or `None` when nothing was sent.
pub(crate) fn flush_tick(
    buffer: &ErrorBuffer,
    sink: Option<&Arc<dyn BatchSink>>,
) -> Option<JoinHandle<()>> {
    let records = buffer.drain_all();
    if records.is_empty() {
        return None;
    }

    let batch = Batch::new(records);
    let Some(sink) = sink else {
        debug!(
            "No endpoint configured, discarding batch of {} records",
            batch.size()
        );
        return None;
    };

    let sink = Arc::clone(sink);
    Some(tokio::spawn(async move {
        let batch_id = batch.id().to_string();
        let records = batch.size();

        match sink.send_batch(batch).await {
            Ok(result) if result.success => {
                debug!("Buffer flushed: batch {} ({} records)", batch_id, records);
            }
            Ok(result) => {
                warn!(
                    "Endpoint rejected batch {} with HTTP {}, {} records dropped",
                    batch_id, result.status_code, records
                );
            }
            Err(e) => {
                error!(
                    "Failed to flush batch {}: {}, {} records dropped",
                    batch_id, e, records
                );
            }
        }
    }))
}
