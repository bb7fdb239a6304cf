//! In-memory task storage.
//!
//! Holds the [`models`] (entity struct plus create/update DTOs) and the
//! [`repositories`] that own the authoritative task collection for the
//! lifetime of the process. Nothing is persisted: a restart clears every
//! task and restarts id assignment at 1.

pub mod models;
pub mod repositories;
