pub mod clock;
pub mod config;
pub mod ecs;
pub mod error;
pub mod fare;
pub mod geo;
pub mod matching;
pub mod nearest;
pub mod pricing;
pub mod routing;
pub mod runner;
pub mod systems;
pub mod telemetry;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod tracking;

pub use config::EngineConfig;
pub use error::RideError;
pub use fare::{FareEstimator, FareQuote};
pub use geo::Coordinate;
pub use matching::{MatchResult, RideMatcher, RideRequest};
pub use nearest::{Candidate, NearestFinder};
pub use pricing::VehicleClass;
pub use tracking::DriverTracker;
