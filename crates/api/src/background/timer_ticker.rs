//! Once-per-second driver for the shared interval timer.
//!
//! Calls [`SharedTimer::tick`] on a one-second `tokio::time::interval` and
//! publishes a notification on the event bus for every phase change.
//! Ticks while the timer is idle are no-ops. Every start restarts the
//! period, so the first decrement lands one full second after the start.

use std::sync::Arc;
use std::time::Duration;

use tasktimer_events::{AppEvent, EventBus};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::timer::SharedTimer;

/// Countdown resolution.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Run the ticker loop until `cancel` is triggered.
pub async fn run(timer: Arc<SharedTimer>, event_bus: Arc<EventBus>, cancel: CancellationToken) {
    tracing::info!(
        interval_ms = TICK_INTERVAL.as_millis() as u64,
        "Timer ticker started"
    );

    let mut interval = tokio::time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    // Missed ticks are delayed, never replayed in a burst.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                tracing::info!("Timer ticker stopping");
                break;
            }
            _ = timer.started() => {
                interval.reset();
                tracing::debug!("Timer started, tick period restarted");
            }
            _ = interval.tick() => {
                if let Some((transition, task_id)) = timer.tick().await {
                    tracing::info!(
                        from = ?transition.from,
                        to = ?transition.to,
                        task_id = ?task_id,
                        "Timer phase changed"
                    );
                    event_bus.publish(AppEvent::phase_changed(&transition, task_id));
                }
            }
        }
    }
}
