//! Tasktimer API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! the shared interval timer and its background ticker) so integration
//! tests and the binary entrypoint can both access them.

pub mod background;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
pub mod timer;
