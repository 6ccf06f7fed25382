//! Engine-wide configuration: one serde document for fares, matching and tracking.

use serde::{Deserialize, Serialize};

use crate::error::RideError;
use crate::fare::{FareConfig, FareEstimator};
use crate::matching::{MatchConfig, RideMatcher};
use crate::nearest::build_finder;
use crate::routing::{build_route_provider, RouteProviderKind};
use crate::tracking::{DriverTracker, TrackerConfig};

/// Every knob the engine exposes. Missing fields take their defaults, so an
/// empty JSON object is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fare: FareConfig,
    pub matching: MatchConfig,
    pub tracker: TrackerConfig,
    pub route_provider: RouteProviderKind,
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, RideError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, RideError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_fare(mut self, fare: FareConfig) -> Self {
        self.fare = fare;
        self
    }

    pub fn with_matching(mut self, matching: MatchConfig) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_tracker(mut self, tracker: TrackerConfig) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn with_route_provider(mut self, kind: RouteProviderKind) -> Self {
        self.route_provider = kind;
        self
    }

    pub fn validate(&self) -> Result<(), RideError> {
        self.fare.validate()?;
        self.matching.validate()?;
        self.tracker.validate()
    }

    pub fn build_estimator(&self) -> Result<FareEstimator, RideError> {
        let provider = build_route_provider(&self.route_provider, self.fare.road_factor)?;
        Ok(FareEstimator::with_route_provider(self.fare.clone(), provider))
    }

    /// Validate, then assemble a matcher with the configured route provider and finder.
    pub fn build_matcher(&self) -> Result<RideMatcher, RideError> {
        self.validate()?;
        let finder = build_finder(self.matching.finder)?;
        Ok(RideMatcher::new(
            self.build_estimator()?,
            finder,
            self.matching.clone(),
        ))
    }

    /// A fresh idle tracker for one ride.
    pub fn build_tracker(&self, seed: Option<u64>) -> DriverTracker {
        DriverTracker::new(self.tracker.clone(), seed)
    }
}
