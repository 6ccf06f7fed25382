pub mod tracking_tick;
