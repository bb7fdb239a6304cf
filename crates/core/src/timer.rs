//! Work/break interval timer.
//!
//! [`IntervalTimer`] is a synchronous countdown that alternates between a
//! work phase and a fixed five minute break. It has no notion of wall-clock
//! time: whoever owns it calls [`IntervalTimer::tick`] once per elapsed
//! second while it is running. A tick that exhausts the current phase flips
//! to the other phase and returns a [`PhaseTransition`] carrying the
//! notification text for the caller to deliver.

use serde::{Deserialize, Serialize};

use crate::tasks::MAX_TIMER_MINUTES;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Global default work duration in minutes.
pub const DEFAULT_WORK_MINUTES: u32 = 25;

/// Break duration in minutes. Not configurable.
pub const BREAK_MINUTES: u32 = 5;

/// Title attached to every phase-change notification.
pub const NOTIFICATION_TITLE: &str = "Pomodoro Timer";

/// Notification body when a work phase ends.
pub const WORK_FINISHED_MESSAGE: &str = "Time for a break!";

/// Notification body when a break phase ends.
pub const BREAK_FINISHED_MESSAGE: &str = "Break time is over! Ready to work?";

// ---------------------------------------------------------------------------
// Phase / state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// The phase that follows this one.
    pub fn next(self) -> Phase {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    /// Human-readable label shown next to the countdown.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work Time",
            Phase::Break => "Break Time",
        }
    }

    /// Notification body emitted when this phase runs out.
    pub fn finished_message(self) -> &'static str {
        match self {
            Phase::Work => WORK_FINISHED_MESSAGE,
            Phase::Break => BREAK_FINISHED_MESSAGE,
        }
    }
}

/// The four observable states of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    IdleWork,
    RunningWork,
    IdleBreak,
    RunningBreak,
}

/// Emitted by [`IntervalTimer::tick`] when a phase runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    /// Phase-specific notification body.
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// IntervalTimer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct IntervalTimer {
    work_minutes: u32,
    time_left_seconds: u32,
    is_running: bool,
    phase: Phase,
}

impl IntervalTimer {
    /// Create an idle timer at the start of a work phase of `work_minutes`.
    ///
    /// The duration is clamped to `1..=MAX_TIMER_MINUTES`, so a phase always
    /// lasts at least one tick and the countdown fits in a `u32`.
    pub fn new(work_minutes: u32) -> Self {
        let work_minutes = work_minutes.clamp(1, MAX_TIMER_MINUTES);
        Self {
            work_minutes,
            time_left_seconds: work_minutes * 60,
            is_running: false,
            phase: Phase::Work,
        }
    }

    /// Create a timer for a task, using its override when it has one.
    pub fn for_task(default_work_minutes: u32, custom_minutes: Option<u32>) -> Self {
        Self::new(custom_minutes.unwrap_or(default_work_minutes))
    }

    /// Flip between running and idle. Phase and remaining time are kept.
    pub fn toggle(&mut self) {
        self.is_running = !self.is_running;
    }

    /// Return to an idle work phase with the full work duration.
    pub fn reset(&mut self) {
        self.is_running = false;
        self.phase = Phase::Work;
        self.time_left_seconds = self.work_minutes * 60;
    }

    /// Advance the countdown by one second.
    ///
    /// Does nothing while idle. When the previous value was 1 the phase
    /// flips, the countdown restarts at the new phase's full duration, and
    /// the transition is returned. Running state is left untouched, so the
    /// countdown carries on into the next phase.
    pub fn tick(&mut self) -> Option<PhaseTransition> {
        if !self.is_running {
            return None;
        }

        if self.time_left_seconds > 1 {
            self.time_left_seconds -= 1;
            return None;
        }

        let from = self.phase;
        self.phase = from.next();
        self.time_left_seconds = self.phase_total_seconds();

        Some(PhaseTransition {
            from,
            to: self.phase,
            message: from.finished_message(),
        })
    }

    /// Full length of the current phase in seconds.
    pub fn phase_total_seconds(&self) -> u32 {
        match self.phase {
            Phase::Work => self.work_minutes * 60,
            Phase::Break => BREAK_MINUTES * 60,
        }
    }

    /// Fraction of the current phase already elapsed, in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        let total = f64::from(self.phase_total_seconds());
        (total - f64::from(self.time_left_seconds)) / total
    }

    pub fn state(&self) -> TimerState {
        match (self.phase, self.is_running) {
            (Phase::Work, false) => TimerState::IdleWork,
            (Phase::Work, true) => TimerState::RunningWork,
            (Phase::Break, false) => TimerState::IdleBreak,
            (Phase::Break, true) => TimerState::RunningBreak,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_break(&self) -> bool {
        self.phase == Phase::Break
    }

    pub fn time_left_seconds(&self) -> u32 {
        self.time_left_seconds
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    /// Whole minutes remaining, for `MM:SS` display.
    pub fn minutes(&self) -> u32 {
        self.time_left_seconds / 60
    }

    /// Seconds past the whole minute remaining, for `MM:SS` display.
    pub fn seconds(&self) -> u32 {
        self.time_left_seconds % 60
    }
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_MINUTES)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
