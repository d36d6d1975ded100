//! Trace replay
//!
//! A trace is a recorded pointer session: a list of enter/leave events, each
//! stamped with its offset from the start of the recording. Replaying drives
//! a tracker with the same timing the events originally had, which keeps the
//! dwell timings it reports faithful to the recording.

use crate::error::{HoverError, HoverResult};
use crate::events::PointerEvent;
use crate::tracker::HoverTracker;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Upper bound on a step offset from replay start, one day in milliseconds.
/// Offsets beyond it mark a trace as corrupt.
pub const MAX_TRACE_OFFSET_MS: u64 = 86_400_000;

/// One recorded event with its offset from the start of the trace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: PointerEvent,
}

/// A recorded pointer session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    pub steps: Vec<TraceStep>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event at the given offset
    pub fn step(mut self, at_ms: u64, event: impl Into<PointerEvent>) -> Self {
        self.steps.push(TraceStep {
            at_ms,
            event: event.into(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Load a trace from a JSON file
///
/// Rejects traces with a step offset past [`MAX_TRACE_OFFSET_MS`].
pub fn load_trace(path: impl AsRef<Path>) -> HoverResult<Trace> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let trace: Trace = serde_json::from_str(&raw)?;
    if let Some(step) = trace.steps.iter().find(|s| s.at_ms > MAX_TRACE_OFFSET_MS) {
        return Err(HoverError::TraceOffsetTooLarge(step.at_ms));
    }
    tracing::debug!(
        path = %path.as_ref().display(),
        steps = trace.len(),
        "Loaded pointer trace"
    );
    Ok(trace)
}

/// Drive a tracker through a trace, honoring each step's offset
///
/// Offsets are absolute from the start of the replay, so steps listed out of
/// order still fire at their recorded times (a stale offset fires
/// immediately). A step offset past [`MAX_TRACE_OFFSET_MS`] is skipped.
pub async fn replay(tracker: &mut HoverTracker, trace: &Trace) {
    let started = Instant::now();
    for step in &trace.steps {
        let Some(deadline) = step_deadline(started, step.at_ms) else {
            tracing::warn!(at_ms = step.at_ms, "step offset exceeds the replay horizon, skipped");
            continue;
        };
        sleep_until(deadline).await;
        tracker.handle(&step.event);
    }
}

/// Deadline for a step; `None` when the offset exceeds the horizon or the
/// clock cannot represent it
fn step_deadline(started: Instant, at_ms: u64) -> Option<Instant> {
    if at_ms > MAX_TRACE_OFFSET_MS {
        return None;
    }
    started.checked_add(Duration::from_millis(at_ms))
}
