//! Threshold watchdog
//!
//! Each hover session gets one watchdog task polling at the configured
//! interval. The first tick past the threshold emits the one-time threshold
//! diagnostic and ends the task; the session itself stays active. Callers
//! cancel the task by aborting the returned handle.

use crate::sink::{DiagnosticKind, DiagnosticRecord, DiagnosticSink};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

use super::hover::threshold_message;

pub(crate) fn spawn(
    sink: Arc<dyn DiagnosticSink>,
    session_id: Uuid,
    started: Instant,
    poll_interval: Duration,
    threshold: Duration,
    unix_ms: fn() -> u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(poll_interval);
        // The first tick completes immediately; consume it so the first real
        // check lands one interval after session start, like setInterval.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let elapsed = started.elapsed();
            if elapsed > threshold {
                sink.emit(DiagnosticRecord {
                    kind: DiagnosticKind::ThresholdExceeded,
                    message: threshold_message(threshold),
                    element: None,
                    element_label: None,
                    elapsed_ms: Some(elapsed.as_millis() as u64),
                    session_id,
                    at: Utc::now(),
                    unix_time_ms: unix_ms(),
                });
                tracing::debug!(
                    session = %session_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Hover threshold exceeded, watchdog stopped"
                );
                break;
            }
        }
    })
}
