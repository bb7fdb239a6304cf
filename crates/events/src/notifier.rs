//! Best-effort notification sink.
//!
//! [`NotificationLogger`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and writes every timer notification to the service log. Losing events
//! to lag is logged and otherwise ignored; the timer never waits on it.

use tokio::sync::broadcast;

use crate::bus::AppEvent;

/// Background service that surfaces notifications in the log.
pub struct NotificationLogger;

impl NotificationLogger {
    /// Run the delivery loop.
    ///
    /// Exits when the channel is closed (i.e. the
    /// [`EventBus`](crate::bus::EventBus) is dropped). Returns the number of
    /// notifications delivered.
    pub async fn run(mut receiver: broadcast::Receiver<AppEvent>) -> u64 {
        let mut delivered = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if Self::deliver(&event) {
                        delivered += 1;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification logger lagged, some notifications were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(delivered, "Event bus closed, notification logger shutting down");
                    break;
                }
            }
        }
        delivered
    }

    fn deliver(event: &AppEvent) -> bool {
        match event.notification() {
            Some((title, body)) => {
                tracing::info!(
                    event_type = %event.event_type,
                    task_id = ?event.task_id,
                    title,
                    body,
                    "Notification"
                );
                true
            }
            None => {
                tracing::debug!(event_type = %event.event_type, "Event carries no notification");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use tasktimer_core::timer::{Phase, PhaseTransition};

    #[tokio::test]
    async fn counts_notifications_until_bus_closes() {
        let bus = EventBus::default();
        let handle = tokio::spawn(NotificationLogger::run(bus.subscribe()));

        let transition = PhaseTransition {
            from: Phase::Break,
            to: Phase::Work,
            message: "Break time is over! Ready to work?",
        };
        bus.publish(AppEvent::phase_changed(&transition, None));
        bus.publish(AppEvent::new("task.created"));
        bus.publish(AppEvent::phase_changed(&transition, Some(1)));
        drop(bus);

        let delivered = handle.await.expect("logger task should not panic");
        assert_eq!(delivered, 2);
    }
}
