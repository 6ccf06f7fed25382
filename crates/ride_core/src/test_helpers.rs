//! Shared fixtures for unit tests, integration tests and benches.

use bevy_ecs::prelude::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::RideError;
use crate::geo::Coordinate;
use crate::nearest::Candidate;
use crate::routing::{RouteEstimate, RouteProvider};

/// Kigali city centre pickup used across tests.
pub const KIGALI_PICKUP: (f64, f64) = (-1.9441, 30.0619);

/// Destination roughly 1.1 km (straight line) south-east of [`KIGALI_PICKUP`].
pub const KIGALI_DESTINATION: (f64, f64) = (-1.9500, 30.0700);

/// Build a coordinate from known-good literals.
///
/// # Panics
///
/// Panics if the values are out of range.
pub fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).expect("fixture coordinate should be valid")
}

pub fn kigali_pickup() -> Coordinate {
    coord(KIGALI_PICKUP.0, KIGALI_PICKUP.1)
}

pub fn kigali_destination() -> Coordinate {
    coord(KIGALI_DESTINATION.0, KIGALI_DESTINATION.1)
}

pub fn candidate_at(id: &str, lat: f64, lng: f64) -> Candidate {
    Candidate::new(id, coord(lat, lng))
}

/// `count` active candidates spread uniformly within `spread_deg` of `center`.
/// The same seed always yields the same fleet.
pub fn scattered_candidates(seed: u64, count: usize, center: Coordinate, spread_deg: f64) -> Vec<Candidate> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let lat = (center.lat() + rng.gen_range(-spread_deg..=spread_deg)).clamp(-90.0, 90.0);
            let lng = (center.lng() + rng.gen_range(-spread_deg..=spread_deg)).clamp(-180.0, 180.0);
            candidate_at(&format!("driver-{i}"), lat, lng)
        })
        .collect()
}

/// A route provider that always fails, for exercising degraded quotes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingRouteProvider;

impl RouteProvider for FailingRouteProvider {
    fn route(&self, _from: Coordinate, _to: Coordinate) -> Result<RouteEstimate, RideError> {
        Err(RideError::Route("routing backend unavailable".to_string()))
    }
}

/// A world with the tracking runtime resources installed.
pub fn create_test_world() -> World {
    let mut world = World::new();
    crate::runner::initialize_world(&mut world);
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TickClock;

    #[test]
    fn scattered_candidates_are_reproducible() {
        let a = scattered_candidates(7, 20, kigali_pickup(), 0.05);
        let b = scattered_candidates(7, 20, kigali_pickup(), 0.05);
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
        assert!(a.iter().all(|c| c.active && c.coordinate.is_valid()));
    }

    #[test]
    fn failing_provider_fails() {
        assert!(FailingRouteProvider
            .route(kigali_pickup(), kigali_destination())
            .is_err());
    }

    #[test]
    fn test_world_has_a_clock() {
        let world = create_test_world();
        assert!(world.resource::<TickClock>().is_empty());
    }
}
