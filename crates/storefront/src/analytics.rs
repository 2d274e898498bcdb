//! Analytics event tracking.
//!
//! Events are advisory: they feed the admin report and nothing else. A
//! failed event write must never fail the user action that produced it,
//! so the tracker logs and moves on.

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::AnalyticsEvent;
use crate::storage::{Gateway, KeyValueStore};

/// Event recorded when the checkout flow is opened.
pub const CHECKOUT_OPENED: &str = "checkout_opened";
/// Event recorded when an order is placed.
pub const CHECKOUT_COMPLETED: &str = "checkout_completed";

/// Appends analytics events through the gateway.
pub struct AnalyticsTracker<'a, S: KeyValueStore> {
    gateway: &'a Gateway<S>,
}

impl<'a, S: KeyValueStore> AnalyticsTracker<'a, S> {
    /// Tie a tracker to its persistence gateway.
    pub const fn new(gateway: &'a Gateway<S>) -> Self {
        Self { gateway }
    }

    /// Record an event with free-form attributes.
    pub fn track(&self, name: &str, data: Value) {
        let event = AnalyticsEvent::now(name, data);
        if let Err(err) = self.gateway.append_event(&event) {
            warn!(name, error = %err, "dropping analytics event");
            return;
        }
        debug!(name, "analytics event recorded");
    }

    /// The full event log, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.gateway.load_events()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_track_appends_event() {
        let gateway = Gateway::new(MemoryStore::new());
        let tracker = AnalyticsTracker::new(&gateway);

        tracker.track(CHECKOUT_OPENED, json!({ "cartItems": 2 }));
        let events = tracker.events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events.first().map(|e| e.name.as_str()),
            Some(CHECKOUT_OPENED)
        );
    }

    #[test]
    fn test_failed_write_drops_event_silently() {
        let gateway = Gateway::new(MemoryStore::new());
        let tracker = AnalyticsTracker::new(&gateway);

        gateway.store().set_fail_writes(true);
        tracker.track(CHECKOUT_COMPLETED, json!({}));

        gateway.store().set_fail_writes(false);
        assert!(tracker.events().is_empty());
    }
}
