//! Diagnostic output
//!
//! The tracker emits [`DiagnosticRecord`]s through a [`DiagnosticSink`]:
//! production code uses [`ConsoleSink`] (plain-text lines via `tracing`),
//! tests use [`MemorySink`] to assert on exactly what was emitted.

use crate::dom::NodeId;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a diagnostic reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// One-time notice that a session passed the dwell threshold
    ThresholdExceeded,
    /// A session ended; the record carries the total elapsed time
    SessionEnded,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::ThresholdExceeded => write!(f, "threshold-exceeded"),
            DiagnosticKind::SessionEnded => write!(f, "session-ended"),
        }
    }
}

/// A single emitted diagnostic
///
/// `message` is the exact plain-text line for console output; everything
/// else is context for sinks that want it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRecord {
    pub kind: DiagnosticKind,
    pub message: String,

    /// The element the diagnostic refers to (exit diagnostics only)
    pub element: Option<NodeId>,
    pub element_label: Option<String>,

    /// Elapsed session time when the diagnostic fired
    pub elapsed_ms: Option<u64>,

    pub session_id: Uuid,
    pub at: DateTime<Utc>,
    pub unix_time_ms: u64,
}

/// Where diagnostics go
///
/// `emit` is called synchronously from the event handlers and from the
/// watchdog task, so implementations must not block.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, record: DiagnosticRecord);
}

/// Logs each diagnostic message as a plain-text `tracing` line
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for ConsoleSink {
    fn emit(&self, record: DiagnosticRecord) {
        tracing::info!(
            kind = %record.kind,
            session = %record.session_id,
            "{}",
            record.message
        );
    }
}

/// Buffers diagnostics in memory for test assertions
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<DiagnosticRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in emission order
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, record: DiagnosticRecord) {
        self.records.lock().push(record);
    }
}
