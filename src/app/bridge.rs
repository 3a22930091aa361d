// metamerge - app/bridge.rs
//
// In-process end of the backend event transport.
//
// Architecture:
//   - `BackendEmitter` is the handle backend-side code (merge worker
//     threads, the startup probe) uses to publish named JSON events.
//     Cloneable and Send, so any thread may emit.
//   - `BackendBridge` lives on the UI thread and is drained once per
//     frame, capped so an event burst cannot stall the render loop.
//
// Delivery is at-least-once, in-order per sender; this matches what the
// log area and warning overlay assume. If the UI side is gone (shutdown),
// emits are silently dropped.

use serde_json::Value;
use std::sync::mpsc;

/// A raw named event as carried by the transport.
pub type RawEvent = (String, Value);

/// Sending half of the event transport. Clone freely across threads.
#[derive(Clone)]
pub struct BackendEmitter {
    tx: mpsc::Sender<RawEvent>,
}

impl BackendEmitter {
    /// Publish a named event with an arbitrary JSON payload.
    pub fn emit(&self, event: &str, payload: Value) {
        if self.tx.send((event.to_string(), payload)).is_err() {
            // UI side has shut down; nothing left to notify.
            tracing::debug!(event, "Dropped backend event after UI shutdown");
        }
    }

    /// Publish a `log` event in the backend's payload shape.
    pub fn emit_log(&self, level: &str, message: impl Into<String>) {
        self.emit(
            crate::util::constants::EVENT_LOG,
            serde_json::json!({ "level": level, "message": message.into() }),
        );
    }

    /// Publish the ExifTool availability status.
    pub fn emit_exiftool_status(&self, available: bool) {
        self.emit(
            crate::util::constants::EVENT_EXIFTOOL_STATUS,
            Value::Bool(available),
        );
    }
}

/// Receiving half of the event transport, owned by the UI thread.
pub struct BackendBridge {
    rx: mpsc::Receiver<RawEvent>,
}

impl BackendBridge {
    /// Create a connected emitter/bridge pair.
    pub fn channel() -> (BackendEmitter, BackendBridge) {
        let (tx, rx) = mpsc::channel();
        (BackendEmitter { tx }, BackendBridge { rx })
    }

    /// Drain up to `max` queued events without blocking.
    ///
    /// Events beyond the cap stay queued for the next frame.
    pub fn drain(&self, max: usize) -> Vec<RawEvent> {
        let mut events = Vec::new();
        while events.len() < max {
            match self.rx.try_recv() {
                Ok(ev) => events.push(ev),
                Err(_) => break,
            }
        }
        events
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_events_arrive_in_emit_order() {
        let (emitter, bridge) = BackendBridge::channel();
        emitter.emit_log("info", "first");
        emitter.emit_log("error", "second");
        emitter.emit_exiftool_status(true);

        let events = bridge.drain(10);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].0, "log");
        assert_eq!(events[0].1["message"], json!("first"));
        assert_eq!(events[1].1["message"], json!("second"));
        assert_eq!(events[2], ("exiftoolStatus".to_string(), json!(true)));
    }

    #[test]
    fn test_drain_respects_per_frame_cap() {
        let (emitter, bridge) = BackendBridge::channel();
        for i in 0..5 {
            emitter.emit_log("info", format!("line {i}"));
        }
        assert_eq!(bridge.drain(3).len(), 3);
        assert_eq!(bridge.drain(3).len(), 2);
    }

    #[test]
    fn test_emit_from_background_thread() {
        let (emitter, bridge) = BackendBridge::channel();
        let handle = std::thread::spawn(move || {
            emitter.emit_exiftool_status(false);
        });
        handle.join().unwrap();
        let events = bridge.drain(10);
        assert_eq!(events, vec![("exiftoolStatus".to_string(), json!(false))]);
    }
}
