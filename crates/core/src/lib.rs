//! Domain types shared by every tasktimer crate.
//!
//! Nothing in here performs I/O: the task constants and validation rules,
//! the error taxonomy, and the work/break [`timer::IntervalTimer`] state
//! machine are all plain synchronous code.

pub mod error;
pub mod tasks;
pub mod timer;
pub mod types;
