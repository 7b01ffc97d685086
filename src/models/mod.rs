pub mod appointment;
pub mod blocked_interval;
pub mod slot;
