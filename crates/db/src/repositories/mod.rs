//! Repository layer.
//!
//! Each repository owns its records outright and hands out clones, so
//! callers never hold a reference into the store.

pub mod task_repo;

pub use task_repo::TaskRepo;
