//! Ride request matching: quote the trip, then pick the nearest online driver.

pub mod matcher;
pub mod types;

use serde::{Deserialize, Serialize};

use crate::error::RideError;
use crate::nearest::FinderKind;
use crate::tracking::DEFAULT_DRIVER_SPEED_KMH;

pub use matcher::RideMatcher;
pub use types::{MatchResult, RideRequest};

/// Matching parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub finder: FinderKind,
    /// Drivers farther than this from the pickup are not offered the ride.
    pub max_pickup_distance_m: Option<f64>,
    /// Speed used for the pickup ETA shown with the match.
    pub pickup_speed_kmh: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            finder: FinderKind::default(),
            max_pickup_distance_m: None,
            pickup_speed_kmh: DEFAULT_DRIVER_SPEED_KMH,
        }
    }
}

impl MatchConfig {
    pub fn with_finder(mut self, finder: FinderKind) -> Self {
        self.finder = finder;
        self
    }

    pub fn with_max_pickup_distance_m(mut self, meters: f64) -> Self {
        self.max_pickup_distance_m = Some(meters);
        self
    }

    pub fn validate(&self) -> Result<(), RideError> {
        if let Some(max) = self.max_pickup_distance_m {
            if !(max.is_finite() && max >= 0.0) {
                return Err(RideError::Config(
                    "max_pickup_distance_m must be >= 0".to_string(),
                ));
            }
        }
        if !(self.pickup_speed_kmh.is_finite() && self.pickup_speed_kmh > 0.0) {
            return Err(RideError::Config("pickup_speed_kmh must be > 0".to_string()));
        }
        Ok(())
    }
}
