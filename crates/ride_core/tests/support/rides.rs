#![allow(dead_code)]

use bevy_ecs::prelude::{Entity, World};
use ride_core::ecs::RideAssignment;
use ride_core::geo::Coordinate;
use ride_core::matching::{RideMatcher, RideRequest};
use ride_core::nearest::Candidate;
use ride_core::pricing::VehicleClass;
use ride_core::runner::spawn_ride;
use ride_core::test_helpers::{coord, create_test_world, kigali_destination, kigali_pickup};
use ride_core::tracking::{DriverTracker, TrackerConfig};

/// A small online fleet around the Kigali fixtures.
pub fn kigali_fleet() -> Vec<Candidate> {
    vec![
        Candidate::new("d-remera", coord(-1.9536, 30.1044)),
        Candidate::new("d-nyamirambo", coord(-1.9780, 30.0440)),
        Candidate::new("d-centre", coord(-1.9446, 30.0625)),
        Candidate::new("d-kacyiru", coord(-1.9355, 30.0860)),
    ]
}

/// Builder for a world populated with matched rides.
#[derive(Debug)]
pub struct RideWorldBuilder {
    tracker: TrackerConfig,
    seed: u64,
    rides: Vec<(Coordinate, Coordinate)>,
}

impl Default for RideWorldBuilder {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            seed: 42,
            rides: Vec::new(),
        }
    }
}

impl RideWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tracker(mut self, tracker: TrackerConfig) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_ride(mut self, pickup: Coordinate, destination: Coordinate) -> Self {
        self.rides.push((pickup, destination));
        self
    }

    pub fn with_kigali_ride(self) -> Self {
        self.with_ride(kigali_pickup(), kigali_destination())
    }

    /// Build the world; rides are spawned idle, in insertion order.
    pub fn build(self) -> (World, Vec<Entity>) {
        let mut world = create_test_world();
        let matcher = RideMatcher::default();
        let fleet = kigali_fleet();
        let mut rides = Vec::new();
        for (i, (pickup, destination)) in self.rides.into_iter().enumerate() {
            let request = RideRequest::new(pickup, destination, VehicleClass::Economy);
            let matched = matcher
                .match_ride(&request, &fleet)
                .expect("fixture ride should match");
            let assignment = RideAssignment {
                ride_id: format!("ride-{i}"),
                pickup,
                destination,
                matched,
            };
            let tracker =
                DriverTracker::new(self.tracker.clone(), Some(self.seed.wrapping_add(i as u64)));
            rides.push(spawn_ride(&mut world, assignment, tracker));
        }
        (world, rides)
    }
}
