//! Process-wide interval timer shared between handlers and the ticker.

use serde::Serialize;
use tasktimer_core::timer::{IntervalTimer, Phase, PhaseTransition, BREAK_MINUTES};
use tasktimer_core::types::DbId;
use tokio::sync::{Mutex, Notify};

/// Point-in-time view of the timer, as returned by the `/timer` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub label: &'static str,
    pub is_running: bool,
    pub is_break: bool,
    pub time_left_seconds: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub progress: f64,
    /// Task whose duration the timer is using, if any.
    pub task_id: Option<DbId>,
}

struct ActiveTimer {
    timer: IntervalTimer,
    task_id: Option<DbId>,
}

impl ActiveTimer {
    fn snapshot(&self) -> TimerSnapshot {
        let timer = &self.timer;
        TimerSnapshot {
            phase: timer.phase(),
            label: timer.phase().label(),
            is_running: timer.is_running(),
            is_break: timer.is_break(),
            time_left_seconds: timer.time_left_seconds(),
            minutes: timer.minutes(),
            seconds: timer.seconds(),
            work_minutes: timer.work_minutes(),
            break_minutes: BREAK_MINUTES,
            progress: timer.progress(),
            task_id: self.task_id,
        }
    }
}

/// An [`IntervalTimer`] behind a mutex, plus the task it is bound to.
///
/// Each method locks once and runs to completion, so a tick can never
/// interleave with a toggle or reset. Going from idle to running signals
/// [`SharedTimer::started`] so the ticker can restart its one-second period.
pub struct SharedTimer {
    inner: Mutex<ActiveTimer>,
    started: Notify,
    default_work_minutes: u32,
}

impl SharedTimer {
    pub fn new(default_work_minutes: u32) -> Self {
        Self {
            inner: Mutex::new(ActiveTimer {
                timer: IntervalTimer::new(default_work_minutes),
                task_id: None,
            }),
            started: Notify::new(),
            default_work_minutes,
        }
    }

    pub async fn snapshot(&self) -> TimerSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn toggle(&self) -> TimerSnapshot {
        let mut active = self.inner.lock().await;
        active.timer.toggle();
        if active.timer.is_running() {
            self.started.notify_one();
        }
        active.snapshot()
    }

    /// Resolves once the timer has been started since the last call.
    ///
    /// A start that happens while nobody is waiting is remembered, so the
    /// next call returns immediately.
    pub async fn started(&self) {
        self.started.notified().await;
    }

    pub async fn reset(&self) -> TimerSnapshot {
        let mut active = self.inner.lock().await;
        active.timer.reset();
        active.snapshot()
    }

    /// Bind the timer to a task (or unbind with `None`).
    ///
    /// `custom_minutes` is the task's override, read once here. The timer
    /// is reset to an idle work phase of the resulting duration.
    pub async fn bind_task(
        &self,
        task_id: Option<DbId>,
        custom_minutes: Option<u32>,
    ) -> TimerSnapshot {
        let mut active = self.inner.lock().await;
        active.task_id = task_id;
        active.timer = IntervalTimer::for_task(self.default_work_minutes, custom_minutes);
        active.snapshot()
    }

    /// Advance by one second. Returns the phase change, if one happened,
    /// together with the bound task.
    pub async fn tick(&self) -> Option<(PhaseTransition, Option<DbId>)> {
        let mut active = self.inner.lock().await;
        let task_id = active.task_id;
        active.timer.tick().map(|t| (t, task_id))
    }
}
