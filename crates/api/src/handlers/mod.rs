pub mod tasks;
pub mod timer;
