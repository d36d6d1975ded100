//! Hover Meter - Pointer dwell timing over an element tree.
//!
//! This is the main library crate for the hover tracker. It models a small
//! element tree, consumes pointer enter/leave events bubbling through a
//! container, and reports how long the pointer dwelt over tagged items,
//! including a one-time notice when a dwell exceeds the threshold.

pub mod dom;
pub mod error;
pub mod events;
pub mod replay;
pub mod sink;
pub mod tracker;

pub use dom::{Element, ElementTree, NodeId};
pub use error::{HoverError, HoverResult};
pub use events::{PointerEnter, PointerEvent, PointerLeave};
pub use replay::{load_trace, replay, Trace, TraceStep, MAX_TRACE_OFFSET_MS};
pub use sink::{ConsoleSink, DiagnosticKind, DiagnosticRecord, DiagnosticSink, MemorySink};
pub use tracker::{HoverTracker, TrackerConfig, THRESHOLD_MESSAGE};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for the demo binary
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hover_meter=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
