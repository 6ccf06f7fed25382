//! Performance benchmarks for ride_core using Criterion.rs.

use bevy_ecs::prelude::World;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ride_core::ecs::RideAssignment;
use ride_core::fare::FareEstimator;
use ride_core::matching::{RideMatcher, RideRequest};
use ride_core::nearest::{H3RingFinder, LinearScanFinder, NearestFinder};
use ride_core::pricing::VehicleClass;
use ride_core::runner::{begin_pickup_leg, initialize_world, run_until_empty, spawn_ride, tracking_schedule};
use ride_core::test_helpers::{kigali_destination, kigali_pickup, scattered_candidates};
use ride_core::tracking::{DriverTracker, TrackerConfig};

fn bench_nearest_finders(c: &mut Criterion) {
    let query = kigali_destination();
    let mut group = c.benchmark_group("nearest_finder");
    for size in [100usize, 1_000, 10_000] {
        let fleet = scattered_candidates(42, size, kigali_pickup(), 0.1);
        let linear = LinearScanFinder;
        let h3 = H3RingFinder::default();
        group.bench_with_input(BenchmarkId::new("linear", size), &fleet, |b, fleet| {
            b.iter(|| black_box(linear.nearest(query, fleet).map(|n| n.index)))
        });
        group.bench_with_input(BenchmarkId::new("h3_ring", size), &fleet, |b, fleet| {
            b.iter(|| black_box(h3.nearest(query, fleet).map(|n| n.index)))
        });
    }
    group.finish();
}

fn bench_fare_estimate(c: &mut Criterion) {
    let estimator = FareEstimator::default();
    c.bench_function("fare_estimate", |b| {
        b.iter(|| {
            black_box(estimator.estimate(
                kigali_pickup(),
                kigali_destination(),
                VehicleClass::Comfort,
                true,
            ))
        })
    });
}

fn bench_tracking_world(c: &mut Criterion) {
    let matcher = RideMatcher::default();
    let fleet = scattered_candidates(7, 50, kigali_pickup(), 0.05);
    let request = RideRequest::new(kigali_pickup(), kigali_destination(), VehicleClass::Economy);
    let Ok(matched) = matcher.match_ride(&request, &fleet) else {
        return;
    };

    let mut group = c.benchmark_group("tracking_world");
    for rides in [10usize, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(rides), &rides, |b, &rides| {
            b.iter(|| {
                let mut world = World::new();
                initialize_world(&mut world);
                for i in 0..rides {
                    let assignment = RideAssignment {
                        ride_id: format!("ride-{i}"),
                        pickup: kigali_pickup(),
                        destination: kigali_destination(),
                        matched: matched.clone(),
                    };
                    let tracker = DriverTracker::new(TrackerConfig::default(), Some(i as u64));
                    let ride = spawn_ride(&mut world, assignment, tracker);
                    begin_pickup_leg(&mut world, ride);
                }
                let mut schedule = tracking_schedule();
                black_box(run_until_empty(&mut world, &mut schedule, 1_000_000));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest_finders, bench_fare_estimate, bench_tracking_world);
criterion_main!(benches);
