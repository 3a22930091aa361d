// metamerge - app/events.rs
//
// Subscription interface over the backend's named JSON events.
//
// The transport (app/bridge.rs) delivers raw `(name, payload)` pairs; this
// bus fans each one out to the handlers subscribed to that name. Handlers
// run synchronously on the caller's (UI) thread, one at a time, so they
// may freely capture channels or shared cells without locking.
//
// `subscribe` returns an id that `unsubscribe` accepts, so tests can
// inject synthetic events and tear subscriptions down deterministically.

use serde_json::Value;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    event: String,
    handler: Box<dyn FnMut(&Value)>,
}

/// Dispatches named events to registered handlers.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every future emission of `event`.
    ///
    /// Handlers for the same event run in subscription order.
    pub fn subscribe(
        &mut self,
        event: &str,
        handler: impl FnMut(&Value) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            event: event.to_string(),
            handler: Box::new(handler),
        });
        tracing::debug!(event, id = id.0, "Event subscription registered");
        id
    }

    /// Remove a subscription. Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        before != self.subscribers.len()
    }

    /// Deliver `payload` to every handler subscribed to `event`.
    pub fn emit(&mut self, event: &str, payload: &Value) {
        for sub in self.subscribers.iter_mut().filter(|s| s.event == event) {
            (sub.handler)(payload);
        }
    }
}

// =============================================================================
// Unit tests
// =============================================================================
