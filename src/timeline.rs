pub mod phase;
pub mod schedule;
