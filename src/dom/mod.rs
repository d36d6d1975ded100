//! DOM-equivalent element tree
//!
//! A minimal stand-in for the browser DOM the tracker is modeled after:
//! elements with tags, ids, and classes, parent links, bubbling paths, and
//! ancestry queries.

pub mod element;
pub mod tree;

pub use element::Element;
pub use tree::{ElementTree, NodeId};
