// metamerge - tests/e2e_log_area.rs
//
// End-to-end tests for the log area: backend events enter through the
// real transport (BackendEmitter → BackendBridge), fan out through the
// real EventBus subscriptions, and land in AppState exactly as the gui
// update loop delivers them -- no mocks, no stubs.

use metamerge::app::bridge::BackendBridge;
use metamerge::app::events::EventBus;
use metamerge::app::state::AppState;
use metamerge::core::log_view::AffordanceVisibility;
use metamerge::core::model::BackendEvent;
use metamerge::util::constants::{EVENT_EXIFTOOL_STATUS, EVENT_LOG, MAX_EVENTS_PER_FRAME};
use std::sync::mpsc;

// =============================================================================
// Helpers
// =============================================================================

/// A state plus the wired event path, mirroring the gui's setup.
struct Harness {
    state: AppState,
    emitter: metamerge::app::bridge::BackendEmitter,
    bridge: BackendBridge,
    bus: EventBus,
    typed_rx: mpsc::Receiver<BackendEvent>,
}

impl Harness {
    fn new() -> Self {
        let (emitter, bridge) = BackendBridge::channel();
        let mut bus = EventBus::new();
        let (typed_tx, typed_rx) = mpsc::channel();

        for event_name in [EVENT_LOG, EVENT_EXIFTOOL_STATUS] {
            let tx = typed_tx.clone();
            bus.subscribe(event_name, move |payload| {
                if let Some(event) = BackendEvent::decode(event_name, payload) {
                    let _ = tx.send(event);
                }
            });
        }

        Self {
            state: AppState::new(14.5),
            emitter,
            bridge,
            bus,
            typed_rx,
        }
    }

    /// One gui frame's worth of event processing.
    fn pump(&mut self) {
        for (name, payload) in self.bridge.drain(MAX_EVENTS_PER_FRAME) {
            self.bus.emit(&name, &payload);
        }
        while let Ok(event) = self.typed_rx.try_recv() {
            self.state.handle_backend_event(event);
        }
    }
}

// =============================================================================
// Log area E2E
// =============================================================================

/// The started/failed scenario: collapsed shows only the latest line,
/// expanded shows both in arrival order.
#[test]
fn e2e_collapsed_shows_latest_expanded_shows_history() {
    let mut h = Harness::new();
    h.emitter.emit_log("info", "started");
    h.emitter.emit_log("error", "failed");
    h.pump();

    let collapsed = h.state.log_view.render();
    assert_eq!(collapsed.len(), 1);
    assert!(
        collapsed[0].ends_with("[ERROR] failed"),
        "expected latest line, got {collapsed:?}"
    );

    h.state.log_view.expand();
    let expanded = h.state.log_view.render();
    assert_eq!(expanded.len(), 2);
    assert!(expanded[0].ends_with("[INFO] started"));
    assert!(expanded[1].ends_with("[ERROR] failed"));
}

/// Export equals the concatenation of every line in arrival order, no
/// matter what the display mode is.
#[test]
fn e2e_export_matches_arrival_order_regardless_of_mode() {
    let mut h = Harness::new();
    for i in 0..5 {
        h.emitter.emit_log("info", format!("step {i}"));
    }
    h.pump();

    let collapsed_export = h.state.log_view.export_as_text();
    h.state.log_view.expand();
    assert_eq!(h.state.log_view.export_as_text(), collapsed_export);

    let lines: Vec<&str> = collapsed_export.lines().collect();
    assert_eq!(lines.len(), 5);
    for (i, line) in lines.iter().enumerate() {
        assert!(line.ends_with(&format!("step {i}")), "line {i}: {line}");
    }
}

/// The first append reveals clear/copy; expanding reveals collapse;
/// clearing reverts everything to the initial hidden state.
#[test]
fn e2e_affordance_lifecycle() {
    let mut h = Harness::new();
    assert_eq!(
        h.state.log_view.affordances(),
        AffordanceVisibility::default()
    );

    h.emitter.emit_log("info", "first");
    h.pump();
    let a = h.state.log_view.affordances();
    assert!(a.clear && a.copy && !a.collapse);

    h.state.log_view.expand();
    assert!(h.state.log_view.affordances().collapse);

    h.state.log_view.clear();
    assert_eq!(
        h.state.log_view.affordances(),
        AffordanceVisibility::default()
    );
    assert!(h.state.log_view.render().is_empty());

    // Display stays empty under the other mode too.
    h.state.log_view.collapse();
    assert!(h.state.log_view.render().is_empty());
}

/// Expanding twice is indistinguishable from expanding once.
#[test]
fn e2e_expand_is_idempotent() {
    let mut h = Harness::new();
    h.emitter.emit_log("warning", "slow disk");
    h.pump();

    h.state.log_view.expand();
    let snapshot = (
        h.state.log_view.mode(),
        h.state.log_view.affordances(),
        h.state.log_view.render(),
    );
    h.state.log_view.expand();
    assert_eq!(
        (
            h.state.log_view.mode(),
            h.state.log_view.affordances(),
            h.state.log_view.render(),
        ),
        snapshot
    );
}

/// A falsy exiftoolStatus event switches to the warning view; log events
/// keep flowing into the history behind it.
#[test]
fn e2e_exiftool_status_switches_view() {
    let mut h = Harness::new();
    assert!(h.state.exiftool_ok);

    h.emitter.emit_exiftool_status(false);
    h.emitter.emit_log("error", "ExifTool not found on PATH");
    h.pump();

    assert!(!h.state.exiftool_ok);
    assert_eq!(h.state.log_view.len(), 1);
}

/// Events the UI does not subscribe to are dropped without effect.
#[test]
fn e2e_unknown_events_are_ignored() {
    let mut h = Harness::new();
    h.emitter.emit("time", serde_json::json!("12:00:00"));
    h.emitter.emit_log("info", "real event");
    h.pump();

    assert_eq!(h.state.log_view.len(), 1);
    assert!(h.state.log_view.render()[0].ends_with("[INFO] real event"));
}
