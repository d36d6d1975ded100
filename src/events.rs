//! Pointer event payloads
//!
//! These carry exactly what the handlers read: the bubbling composed path
//! (innermost element first) and, on leave, the element the pointer moved
//! onto, absent when the pointer left the surface entirely.

use crate::dom::{ElementTree, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEnter {
    /// Composed path of the entered element, innermost first
    pub path: Vec<NodeId>,
}

impl PointerEnter {
    pub fn new(path: Vec<NodeId>) -> Self {
        Self { path }
    }

    /// Build the event for a pointer arriving over `target`
    pub fn over(tree: &ElementTree, target: NodeId) -> Self {
        Self {
            path: tree.composed_path(target),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerLeave {
    /// Composed path of the element being left, innermost first
    pub path: Vec<NodeId>,

    /// Where the pointer went; `None` when it left the surface entirely
    pub to_element: Option<NodeId>,
}

impl PointerLeave {
    pub fn new(path: Vec<NodeId>, to_element: Option<NodeId>) -> Self {
        Self { path, to_element }
    }

    /// Build the event for a pointer leaving `target` toward `to_element`
    pub fn leaving(tree: &ElementTree, target: NodeId, to_element: Option<NodeId>) -> Self {
        Self {
            path: tree.composed_path(target),
            to_element,
        }
    }
}

/// Either pointer notification, for traces and single-entry dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    Enter(PointerEnter),
    Leave(PointerLeave),
}

impl From<PointerEnter> for PointerEvent {
    fn from(event: PointerEnter) -> Self {
        Self::Enter(event)
    }
}

impl From<PointerLeave> for PointerEvent {
    fn from(event: PointerLeave) -> Self {
        Self::Leave(event)
    }
}
