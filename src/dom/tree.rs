//! Arena-backed element tree
//!
//! Nodes are appended once and referenced by [`NodeId`]; parent links are
//! validated at insertion. All queries are total: an unknown id yields
//! `None`/`false` rather than a panic, so ids arriving from deserialized
//! traces can never fault the tracker.

use crate::dom::element::Element;
use crate::error::{HoverError, HoverResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a node in an [`ElementTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Node {
    element: Element,
    parent: Option<NodeId>,
}

/// The element tree the tracker runs against
///
/// Built once by the embedding application, then shared read-only (typically
/// behind an `Arc`). Multiple roots are allowed; the ancestry walk simply
/// stops when the parent chain runs out.
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    nodes: Vec<Node>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element under `parent` (`None` makes it a root)
    pub fn insert(&mut self, element: Element, parent: Option<NodeId>) -> HoverResult<NodeId> {
        if let Some(p) = parent {
            if self.get(p).is_none() {
                return Err(HoverError::ElementNotFound(p));
            }
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { element, parent });
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0 as usize).map(|n| &n.element)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0 as usize).and_then(|n| n.parent)
    }

    /// Class membership for a node; false for unknown ids
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get(id).map(|el| el.has_class(class)).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The bubbling path for `target`: the node itself first, then each
    /// ancestor outward, the order `composedPath()` delivers.
    ///
    /// Empty for an unknown target. The walk is capped at the node count so a
    /// corrupted parent chain cannot loop forever.
    pub fn composed_path(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        if self.get(target).is_none() {
            return path;
        }
        let mut current = Some(target);
        let mut hops = self.nodes.len();
        while let Some(id) = current {
            path.push(id);
            if hops == 0 {
                tracing::warn!(node = %target, "parent chain exceeds node count, truncating path");
                break;
            }
            hops -= 1;
            current = self.parent(id);
        }
        path
    }

    /// True if `node` is `ancestor` itself or lies anywhere in its subtree.
    ///
    /// Iterative parent-chain walk, capped at the node count.
    pub fn is_descendant(&self, ancestor: NodeId, node: NodeId) -> bool {
        if node == ancestor {
            return true;
        }
        let mut current = self.parent(node);
        let mut hops = self.nodes.len();
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            if hops == 0 {
                tracing::warn!(node = %node, "parent chain exceeds node count, stopping ancestry walk");
                return false;
            }
            hops -= 1;
            current = self.parent(id);
        }
        false
    }

    /// Exact id lookup
    pub fn query_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.element.id.as_deref() == Some(id))
            .map(|i| NodeId(i as u32))
    }

    /// Minimal `querySelector` stand-in: `#id`, `.class`, or a bare tag name.
    /// Returns the first match in insertion order.
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        if let Some(id) = selector.strip_prefix('#') {
            return self.query_id(id);
        }
        if let Some(class) = selector.strip_prefix('.') {
            return self
                .nodes
                .iter()
                .position(|n| n.element.has_class(class))
                .map(|i| NodeId(i as u32));
        }
        self.nodes
            .iter()
            .position(|n| n.element.tag == selector)
            .map(|i| NodeId(i as u32))
    }

    /// How a node appears in diagnostics: its id when present, else
    /// `tag#index`. Unknown ids render as `?#index`.
    pub fn label(&self, id: NodeId) -> String {
        match self.get(id) {
            Some(el) => match &el.id {
                Some(dom_id) => dom_id.clone(),
                None => format!("{}#{}", el.tag, id.0),
            },
            None => format!("?#{}", id.0),
        }
    }

    /// Test-only escape hatch to fabricate a malformed parent chain.
    #[cfg(test)]
    pub(crate) fn force_parent(&mut self, node: NodeId, parent: Option<NodeId>) {
        if let Some(n) = self.nodes.get_mut(node.0 as usize) {
            n.parent = parent;
        }
    }
}
