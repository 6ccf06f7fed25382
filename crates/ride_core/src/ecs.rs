use bevy_ecs::prelude::Component;

use crate::geo::Coordinate;
use crate::matching::MatchResult;
use crate::tracking::DriverTracker;

/// The simulated driver animation of one ride. Each ride entity owns its own
/// tracker, so no state is shared between rides.
#[derive(Debug, Component)]
pub struct RideTracking {
    pub tracker: DriverTracker,
}

/// The matched booking a ride entity animates.
#[derive(Debug, Clone, Component)]
pub struct RideAssignment {
    pub ride_id: String,
    pub pickup: Coordinate,
    pub destination: Coordinate,
    pub matched: MatchResult,
}
