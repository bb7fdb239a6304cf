use std::sync::Arc;

use tasktimer_db::repositories::TaskRepo;
use tasktimer_events::EventBus;
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::timer::SharedTimer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The task store. Writers take the write lock, so mutations are
    /// serialized with respect to each other and to reads.
    pub tasks: Arc<RwLock<TaskRepo>>,
    /// The interval timer, also driven by the background ticker.
    pub timer: Arc<SharedTimer>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Event bus carrying timer notifications.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Fresh state: empty task store, idle timer at the configured duration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(TaskRepo::new())),
            timer: Arc::new(SharedTimer::new(config.timer_work_minutes)),
            config: Arc::new(config),
            event_bus: Arc::new(EventBus::default()),
        }
    }
}
