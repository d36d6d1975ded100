//! End-to-end hover sessions driven through the public API, on the paused
//! Tokio clock so every dwell time is exact.

use hover_meter::{
    load_trace, replay, Element, ElementTree, HoverTracker, MemorySink, NodeId, PointerEnter,
    PointerLeave, Trace,
};
use hover_meter::{DiagnosticKind, THRESHOLD_MESSAGE};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

struct Page {
    tree: Arc<ElementTree>,
    item: NodeId,
    nested_item: NodeId,
    other: NodeId,
}

/// #container > (#a.item > #a-nested.item, #b)
fn page() -> Page {
    let mut tree = ElementTree::new();
    let container = tree
        .insert(Element::new("div").with_id("container"), None)
        .unwrap();
    let item = tree
        .insert(
            Element::new("div").with_id("a").with_class("item"),
            Some(container),
        )
        .unwrap();
    let nested_item = tree
        .insert(
            Element::new("div").with_id("a-nested").with_class("item"),
            Some(item),
        )
        .unwrap();
    let other = tree
        .insert(Element::new("div").with_id("b"), Some(container))
        .unwrap();
    Page {
        tree: Arc::new(tree),
        item,
        nested_item,
        other,
    }
}

fn tracker_on(page: &Page) -> (HoverTracker, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let tracker = HoverTracker::attach(page.tree.clone(), "#container", sink.clone()).unwrap();
    (tracker, sink)
}

#[tokio::test(start_paused = true)]
async fn short_dwell_reports_exact_elapsed() {
    let page = page();
    let (mut tracker, sink) = tracker_on(&page);

    let trace = Trace::new()
        .step(0, PointerEnter::over(&page.tree, page.item))
        .step(
            150,
            PointerLeave::leaving(&page.tree, page.item, Some(page.other)),
        );
    replay(&mut tracker, &trace).await;

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, DiagnosticKind::SessionEnded);
    assert_eq!(records[0].message, "You spent 150 millsecond on element a");
    assert!(!tracker.is_tracking());
}

#[tokio::test(start_paused = true)]
async fn threshold_notice_fires_once_within_one_poll() {
    let page = page();
    let (mut tracker, sink) = tracker_on(&page);

    tracker.on_pointer_enter(&PointerEnter::over(&page.tree, page.item));

    // checks run every 10ms and require strictly more than 3000ms
    sleep(Duration::from_millis(3005)).await;
    assert!(sink.is_empty(), "nothing may fire at or before the threshold");

    sleep(Duration::from_millis(10)).await;
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, DiagnosticKind::ThresholdExceeded);
    assert_eq!(records[0].message, THRESHOLD_MESSAGE);
    assert_eq!(
        records[0].elapsed_ms,
        Some(3010),
        "notice must land on the first poll past the threshold"
    );
    assert!(tracker.is_tracking(), "pointer has not left yet");

    sleep(Duration::from_millis(2000)).await;
    assert_eq!(sink.len(), 1, "the notice fires exactly once");
}

#[tokio::test(start_paused = true)]
async fn crossing_into_nested_item_keeps_the_clock() {
    let page = page();
    let (mut tracker, sink) = tracker_on(&page);

    let trace = Trace::new()
        .step(0, PointerEnter::over(&page.tree, page.item))
        // moving onto the nested item delivers both halves of the transition
        .step(
            100,
            PointerLeave::leaving(&page.tree, page.item, Some(page.nested_item)),
        )
        .step(100, PointerEnter::over(&page.tree, page.nested_item))
        .step(
            250,
            PointerLeave::leaving(&page.tree, page.nested_item, Some(page.other)),
        );
    replay(&mut tracker, &trace).await;

    let records = sink.records();
    assert_eq!(records.len(), 1, "no exit while moving within the item");
    assert_eq!(
        records[0].elapsed_ms,
        Some(250),
        "dwell counts from the original entry"
    );
    assert_eq!(
        records[0].message,
        "You spent 250 millsecond on element a-nested"
    );
}

#[tokio::test(start_paused = true)]
async fn leaving_the_surface_ends_the_session() {
    let page = page();
    let (mut tracker, sink) = tracker_on(&page);

    let trace = Trace::new()
        .step(0, PointerEnter::over(&page.tree, page.item))
        .step(75, PointerLeave::leaving(&page.tree, page.item, None));
    replay(&mut tracker, &trace).await;

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].elapsed_ms, Some(75));
    assert!(!tracker.is_tracking());
}

#[tokio::test(start_paused = true)]
async fn long_dwell_produces_notice_then_exit_for_one_session() {
    let page = page();
    let (mut tracker, sink) = tracker_on(&page);

    let trace = Trace::new()
        .step(0, PointerEnter::over(&page.tree, page.item))
        .step(
            3600,
            PointerLeave::leaving(&page.tree, page.item, Some(page.other)),
        );
    replay(&mut tracker, &trace).await;

    let records = sink.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind, DiagnosticKind::ThresholdExceeded);
    assert_eq!(records[1].kind, DiagnosticKind::SessionEnded);
    assert_eq!(records[1].elapsed_ms, Some(3600));
    assert_eq!(
        records[0].session_id, records[1].session_id,
        "notice and exit belong to the same session"
    );

    // a fresh session gets a fresh id
    tracker.on_pointer_enter(&PointerEnter::over(&page.tree, page.item));
    assert_ne!(tracker.session_id(), Some(records[0].session_id));
}

#[tokio::test(start_paused = true)]
async fn recorded_trace_replays_from_disk() {
    let page = page();
    let (mut tracker, sink) = tracker_on(&page);

    let recorded = Trace::new()
        .step(0, PointerEnter::over(&page.tree, page.item))
        .step(
            450,
            PointerLeave::leaving(&page.tree, page.item, Some(page.other)),
        );
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), serde_json::to_string(&recorded).unwrap()).unwrap();

    let trace = load_trace(file.path()).unwrap();
    replay(&mut tracker, &trace).await;

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "You spent 450 millsecond on element a");
}
