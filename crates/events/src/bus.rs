//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`AppEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tasktimer_core::timer::{PhaseTransition, NOTIFICATION_TITLE};
use tasktimer_core::types::{DbId, Timestamp};
use tokio::sync::broadcast;

/// Event type published whenever the interval timer switches phase.
pub const PHASE_CHANGED: &str = "timer.phase_changed";

// ---------------------------------------------------------------------------
// AppEvent
// ---------------------------------------------------------------------------

/// Something that happened inside the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppEvent {
    /// Dot-separated event name, e.g. `"timer.phase_changed"`.
    pub event_type: String,

    /// Task the event relates to, if any.
    pub task_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: Timestamp,
}

impl AppEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            task_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Build the notification event for a timer phase change.
    ///
    /// The payload carries `title` and `body` for display plus the `from`
    /// and `to` phases.
    pub fn phase_changed(transition: &PhaseTransition, task_id: Option<DbId>) -> Self {
        let mut event = Self::new(PHASE_CHANGED).with_payload(serde_json::json!({
            "title": NOTIFICATION_TITLE,
            "body": transition.message,
            "from": transition.from,
            "to": transition.to,
        }));
        event.task_id = task_id;
        event
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Notification `(title, body)` if this event carries one.
    pub fn notification(&self) -> Option<(&str, &str)> {
        let title = self.payload.get("title")?.as_str()?;
        let body = self.payload.get("body")?.as_str()?;
        Some((title, body))
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use tasktimer_events::bus::{AppEvent, EventBus};
///
/// let bus = EventBus::default();
/// let _rx = bus.subscribe();
///
/// bus.publish(AppEvent::new("task.created"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. Never blocks.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: AppEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tasktimer_core::timer::Phase;

    fn work_finished() -> PhaseTransition {
        PhaseTransition {
            from: Phase::Work,
            to: Phase::Break,
            message: "Time for a break!",
        }
    }

    #[tokio::test]
    async fn publish_and_receive_phase_change() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(AppEvent::phase_changed(&work_finished(), Some(3)));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, PHASE_CHANGED);
        assert_eq!(received.task_id, Some(3));
        assert_eq!(received.payload["from"], "work");
        assert_eq!(received.payload["to"], "break");
        assert_eq!(
            received.notification(),
            Some(("Pomodoro Timer", "Time for a break!"))
        );
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(AppEvent::new("multi.test"));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.event_type, "multi.test");
        assert_eq!(e2.event_type, "multi.test");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(AppEvent::phase_changed(&work_finished(), None));
    }

    #[test]
    fn plain_event_has_no_notification() {
        let event = AppEvent::new("bare.event");
        assert!(event.task_id.is_none());
        assert!(event.payload.is_object());
        assert!(event.notification().is_none());
    }
}
