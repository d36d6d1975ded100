//! Demo binary: replays a pointer trace against a small page-like tree and
//! prints the diagnostics. Pass a trace JSON path to replay a recorded
//! session instead of the built-in one.

use anyhow::Result;
use hover_meter::{
    load_trace, replay, ConsoleSink, Element, ElementTree, HoverTracker, PointerEnter,
    PointerLeave, Trace,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    hover_meter::init_logging();
    tracing::info!("Starting hover meter demo v{}", env!("CARGO_PKG_VERSION"));

    let mut tree = ElementTree::new();
    let container = tree.insert(Element::new("div").with_id("container"), None)?;
    let first = tree.insert(
        Element::new("div").with_id("a").with_class("item"),
        Some(container),
    )?;
    let second = tree.insert(
        Element::new("div").with_id("b").with_class("item"),
        Some(container),
    )?;
    let tree = Arc::new(tree);

    let mut tracker = HoverTracker::attach(tree.clone(), "#container", Arc::new(ConsoleSink))?;

    let trace = match std::env::args().nth(1) {
        Some(path) => load_trace(path)?,
        None => Trace::new()
            .step(0, PointerEnter::over(&tree, first))
            .step(450, PointerLeave::leaving(&tree, first, Some(second)))
            .step(500, PointerEnter::over(&tree, second))
            .step(3700, PointerLeave::leaving(&tree, second, None)),
    };

    replay(&mut tracker, &trace).await;
    Ok(())
}
