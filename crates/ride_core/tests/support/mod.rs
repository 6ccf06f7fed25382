pub mod rides;
pub mod schedule;
