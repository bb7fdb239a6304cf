//! Tasktimer event bus and notification delivery.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`AppEvent`] — the event envelope, including timer phase changes.
//! - [`NotificationLogger`] — best-effort sink that surfaces timer
//!   notifications in the service log.

pub mod bus;
pub mod notifier;

pub use bus::{AppEvent, EventBus, PHASE_CHANGED};
pub use notifier::NotificationLogger;
