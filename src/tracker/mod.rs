//! Hover session tracking
//!
//! [`HoverTracker`] consumes pointer enter/leave notifications scoped to a
//! container element, times how long the pointer dwells over elements
//! carrying the item class, and emits diagnostics through a sink.

pub mod config;
pub mod hover;
pub(crate) mod watchdog;

pub use config::TrackerConfig;
pub use hover::{HoverTracker, THRESHOLD_MESSAGE};
