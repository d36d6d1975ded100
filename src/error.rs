//! Crate error type
//!
//! Covers tree construction, tracker attachment, and trace loading. The
//! pointer-event handlers themselves are infallible.

use crate::dom::NodeId;
use thiserror::Error;

/// Errors that can occur while building trees, attaching a tracker, or
/// loading traces
#[derive(Error, Debug)]
pub enum HoverError {
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Element not found: {0}")]
    ElementNotFound(NodeId),

    #[error("Trace offset out of range: {0} ms")]
    TraceOffsetTooLarge(u64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for hover-meter operations
pub type HoverResult<T> = Result<T, HoverError>;
