//! The hover tracker
//!
//! Consumes pointer enter/leave notifications bubbling through a container
//! element and times how long the pointer dwells over elements carrying the
//! item class. A session spans from entering an item's subtree to genuinely
//! leaving it; crossing into the item's own descendants does not end it.

use crate::dom::{ElementTree, NodeId};
use crate::error::{HoverError, HoverResult};
use crate::events::{PointerEnter, PointerEvent, PointerLeave};
use crate::sink::{DiagnosticKind, DiagnosticRecord, DiagnosticSink};
use crate::tracker::config::TrackerConfig;
use crate::tracker::watchdog;
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

/// One-time notice printed when a dwell passes the default 3 second
/// threshold
pub const THRESHOLD_MESSAGE: &str = "You have been hovered here for more than 3 seconds.";

/// Threshold notice line for an arbitrary threshold. Renders
/// [`THRESHOLD_MESSAGE`] exactly at the default 3000 ms.
pub(crate) fn threshold_message(threshold: Duration) -> String {
    format!(
        "You have been hovered here for more than {} seconds.",
        threshold.as_secs_f64()
    )
}

/// Exit diagnostic line. The "millsecond" spelling is part of the exact
/// output contract.
pub(crate) fn exit_message(elapsed_ms: u64, label: &str) -> String {
    format!("You spent {} millsecond on element {}", elapsed_ms, label)
}

/// Bookkeeping captured when a session starts
#[derive(Debug, Clone, Copy)]
struct SessionStart {
    id: Uuid,
    started: Instant,
    started_unix_ms: u64,
}

/// Times pointer dwell over tagged items under one container element
///
/// Both handlers take `&mut self` and are meant to be called in the order
/// the host delivers pointer events. Starting a session spawns the threshold
/// watchdog, so the handlers must run inside a Tokio runtime.
pub struct HoverTracker {
    tree: Arc<ElementTree>,
    container: NodeId,
    config: TrackerConfig,
    sink: Arc<dyn DiagnosticSink>,
    unix_ms: fn() -> u64,
    session: Option<SessionStart>,
    watchdog: Option<JoinHandle<()>>,
}

impl HoverTracker {
    /// Attach to the container matched by `container_selector`, with the
    /// default configuration
    pub fn attach(
        tree: Arc<ElementTree>,
        container_selector: &str,
        sink: Arc<dyn DiagnosticSink>,
    ) -> HoverResult<Self> {
        Self::attach_with_config(tree, container_selector, sink, TrackerConfig::default())
    }

    pub fn attach_with_config(
        tree: Arc<ElementTree>,
        container_selector: &str,
        sink: Arc<dyn DiagnosticSink>,
        config: TrackerConfig,
    ) -> HoverResult<Self> {
        let container = tree
            .query_selector(container_selector)
            .ok_or_else(|| HoverError::ContainerNotFound(container_selector.to_string()))?;

        tracing::debug!(
            container = %tree.label(container),
            item_class = %config.item_class,
            "Hover tracker attached"
        );

        Ok(Self {
            tree,
            container,
            config,
            sink,
            unix_ms: Self::now_unix_ms,
            session: None,
            watchdog: None,
        })
    }

    /// Replace the wall-clock source stamped onto records (test seam)
    pub fn with_clock(mut self, unix_ms: fn() -> u64) -> Self {
        self.unix_ms = unix_ms;
        self
    }

    fn now_unix_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    /// Dispatch either notification (used by trace replay)
    pub fn handle(&mut self, event: &PointerEvent) {
        match event {
            PointerEvent::Enter(enter) => self.on_pointer_enter(enter),
            PointerEvent::Leave(leave) => self.on_pointer_leave(leave),
        }
    }

    /// Pointer entered a region
    ///
    /// Scans the bubbling path for the nearest trackable item and starts a
    /// session if none is active. A duplicate enter while a session runs is
    /// a no-op, so nested items cannot restart the clock.
    pub fn on_pointer_enter(&mut self, event: &PointerEnter) {
        if !self.in_scope(&event.path) {
            return;
        }
        let item = event
            .path
            .iter()
            .copied()
            .find(|&node| self.tree.has_class(node, &self.config.item_class));
        let Some(item) = item else {
            return;
        };
        if self.session.is_some() {
            tracing::trace!(element = %self.tree.label(item), "enter ignored, session already active");
            return;
        }

        let started = Instant::now();
        let started_unix_ms = (self.unix_ms)();
        let id = Uuid::new_v4();

        // at most one watchdog alive: always clear any prior handle first
        if let Some(prior) = self.watchdog.take() {
            prior.abort();
        }
        self.watchdog = Some(watchdog::spawn(
            Arc::clone(&self.sink),
            id,
            started,
            self.config.poll_interval(),
            self.config.threshold(),
            self.unix_ms,
        ));
        self.session = Some(SessionStart {
            id,
            started,
            started_unix_ms,
        });

        tracing::debug!(
            session = %id,
            element = %self.tree.label(item),
            unix_time_ms = started_unix_ms,
            "Hover session started"
        );
    }

    /// Pointer left a region
    ///
    /// Only the innermost path element matters. The session ends when that
    /// element is an item and the destination is neither the element itself
    /// nor one of its descendants; an absent destination (pointer left the
    /// surface) always counts as a genuine leave.
    pub fn on_pointer_leave(&mut self, event: &PointerLeave) {
        let Some(&innermost) = event.path.first() else {
            tracing::trace!("leave with empty path ignored");
            return;
        };
        if !self.in_scope(&event.path) {
            return;
        }
        if !self.tree.has_class(innermost, &self.config.item_class) {
            return;
        }
        if let Some(dest) = event.to_element {
            if self.tree.is_descendant(innermost, dest) {
                return;
            }
        }

        let Some(session) = self.session.take() else {
            tracing::trace!(element = %self.tree.label(innermost), "leave without active session ignored");
            return;
        };
        if let Some(handle) = self.watchdog.take() {
            handle.abort();
        }

        let elapsed_ms = session.started.elapsed().as_millis() as u64;
        let label = self.tree.label(innermost);
        self.sink.emit(DiagnosticRecord {
            kind: DiagnosticKind::SessionEnded,
            message: exit_message(elapsed_ms, &label),
            element: Some(innermost),
            element_label: Some(label),
            elapsed_ms: Some(elapsed_ms),
            session_id: session.id,
            at: Utc::now(),
            unix_time_ms: (self.unix_ms)(),
        });
        tracing::debug!(session = %session.id, elapsed_ms, "Hover session ended");
    }

    /// Whether a hover session is currently active
    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Id of the active session, if any
    pub fn session_id(&self) -> Option<Uuid> {
        self.session.map(|s| s.id)
    }

    /// Wall-clock ms-since-epoch when the active session started
    pub fn session_started_unix_ms(&self) -> Option<u64> {
        self.session.map(|s| s.started_unix_ms)
    }

    /// Elapsed time of the active session in milliseconds
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.session
            .map(|s| s.started.elapsed().as_millis() as u64)
    }

    /// Whether a watchdog task is alive (false once it self-terminates at
    /// the threshold, even though the session stays active)
    pub fn watchdog_active(&self) -> bool {
        self.watchdog
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn in_scope(&self, path: &[NodeId]) -> bool {
        path.contains(&self.container)
    }
}

impl Drop for HoverTracker {
    fn drop(&mut self) {
        if let Some(handle) = self.watchdog.take() {
            handle.abort();
        }
    }
}
