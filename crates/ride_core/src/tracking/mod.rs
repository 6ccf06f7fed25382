//! Simulated driver tracking for the map view.
//!
//! There is no live telemetry feed behind this: a [`DriverTracker`] animates a
//! plausible path towards the pickup and then towards the destination, one
//! route point per tick, and reports ETA and remaining distance. Randomness
//! (the driver's synthetic start point) comes from a seedable generator; the
//! path shape itself is deterministic.

pub mod route;
pub mod timer;
pub mod tracker;

use serde::{Deserialize, Serialize};

use crate::error::RideError;

pub use route::{interpolate_route, route_point_count};
pub use timer::{TickTimer, TimerToken};
pub use tracker::{DriverTracker, TrackingPhase, TrackingSnapshot, TrackingState};

/// Interval between animation ticks.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1500;

/// Average driver speed assumed for ETAs.
pub const DEFAULT_DRIVER_SPEED_KMH: f64 = 30.0;

/// Maximum offset (degrees, per axis) of the synthetic driver start around the pickup.
pub const DEFAULT_START_OFFSET_DEG: f64 = 0.0075;

pub const DEFAULT_MIN_ROUTE_POINTS: usize = 15;
pub const DEFAULT_POINTS_PER_KM: f64 = 10.0;

/// Peak lateral displacement (degrees) of interpolated points.
pub const DEFAULT_LATERAL_WOBBLE_DEG: f64 = 0.0005;

/// Tracker parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub tick_interval_ms: u64,
    pub average_speed_kmh: f64,
    pub start_offset_deg: f64,
    pub min_route_points: usize,
    pub points_per_km: f64,
    pub lateral_wobble_deg: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            average_speed_kmh: DEFAULT_DRIVER_SPEED_KMH,
            start_offset_deg: DEFAULT_START_OFFSET_DEG,
            min_route_points: DEFAULT_MIN_ROUTE_POINTS,
            points_per_km: DEFAULT_POINTS_PER_KM,
            lateral_wobble_deg: DEFAULT_LATERAL_WOBBLE_DEG,
        }
    }
}

impl TrackerConfig {
    pub fn with_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    pub fn with_min_route_points(mut self, points: usize) -> Self {
        self.min_route_points = points;
        self
    }

    pub fn with_lateral_wobble_deg(mut self, wobble_deg: f64) -> Self {
        self.lateral_wobble_deg = wobble_deg;
        self
    }

    pub fn validate(&self) -> Result<(), RideError> {
        if self.tick_interval_ms == 0 {
            return Err(RideError::Config("tick_interval_ms must be > 0".to_string()));
        }
        if !(self.average_speed_kmh.is_finite() && self.average_speed_kmh > 0.0) {
            return Err(RideError::Config("average_speed_kmh must be > 0".to_string()));
        }
        if self.min_route_points < 2 {
            return Err(RideError::Config("min_route_points must be >= 2".to_string()));
        }
        let non_negative = [
            ("start_offset_deg", self.start_offset_deg),
            ("points_per_km", self.points_per_km),
            ("lateral_wobble_deg", self.lateral_wobble_deg),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RideError::Config(format!("{name} must be >= 0")));
            }
        }
        Ok(())
    }
}

/// Minutes to cover `distance_km` at `speed_kmh`, never less than one.
pub fn eta_minutes(distance_km: f64, speed_kmh: f64) -> u32 {
    let minutes = (distance_km.max(0.0) / speed_kmh * 60.0).ceil();
    (minutes as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eta_is_at_least_one_minute() {
        assert_eq!(eta_minutes(0.0, 30.0), 1);
        assert_eq!(eta_minutes(0.2, 30.0), 1);
        assert_eq!(eta_minutes(1.0, 30.0), 2);
        assert_eq!(eta_minutes(15.0, 30.0), 30);
    }

    #[test]
    fn config_rejects_degenerate_values() {
        assert!(TrackerConfig::default().validate().is_ok());
        assert!(TrackerConfig::default().with_tick_interval_ms(0).validate().is_err());
        assert!(TrackerConfig::default().with_min_route_points(1).validate().is_err());
        assert!(TrackerConfig::default()
            .with_lateral_wobble_deg(-1.0)
            .validate()
            .is_err());
    }
}
