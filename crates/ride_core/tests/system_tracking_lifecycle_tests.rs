mod support;

use ride_core::clock::TickClock;
use ride_core::runner::{begin_destination_leg, begin_pickup_leg, reset_ride, ride_snapshot};
use ride_core::telemetry::RideTelemetry;
use ride_core::test_helpers::{coord, kigali_destination, kigali_pickup};
use ride_core::tracking::TrackingPhase;

use support::rides::RideWorldBuilder;
use support::schedule::ScheduleRunner;

const TICK_MS: u64 = 1500;
// Both Kigali legs are short enough to use the 15-point minimum.
const TICKS_PER_LEG: u64 = 14;

#[test]
fn pickup_leg_runs_to_the_pickup_and_stops() {
    let (mut world, rides) = RideWorldBuilder::new().with_kigali_ride().build();
    let ride = rides[0];
    let mut runner = ScheduleRunner::new();

    assert!(begin_pickup_leg(&mut world, ride).is_some());
    let started = ride_snapshot(&world, ride).unwrap();
    assert_eq!(started.phase, TrackingPhase::ToPickup);
    assert!(started.state.is_moving);
    assert_eq!(started.state.route_points.len(), 15);

    let steps = runner.run_full(&mut world);
    assert_eq!(steps as u64, TICKS_PER_LEG);

    let done = ride_snapshot(&world, ride).unwrap();
    assert!(!done.state.is_moving);
    assert_eq!(done.state.current_position, Some(kigali_pickup()));
    assert_eq!(done.state.eta_minutes, 0);
    assert_eq!(done.state.distance_remaining_km, 0.0);

    let telemetry = world.resource::<RideTelemetry>();
    let legs: Vec<_> = telemetry.legs_for(ride).collect();
    assert_eq!(legs.len(), 1);
    assert_eq!(legs[0].phase, TrackingPhase::ToPickup);
    assert_eq!(legs[0].duration_ms(), TICKS_PER_LEG * TICK_MS);
    assert!(world.resource::<TickClock>().is_empty());
}

#[test]
fn destination_leg_mid_pickup_discards_the_old_timer() {
    let (mut world, rides) = RideWorldBuilder::new().with_kigali_ride().build();
    let ride = rides[0];
    let mut runner = ScheduleRunner::new();

    let pickup_token = begin_pickup_leg(&mut world, ride).unwrap();
    assert_eq!(runner.run_until(&mut world, 3 * TICK_MS), 3);

    let destination_token = begin_destination_leg(&mut world, ride).unwrap();
    assert_ne!(pickup_token, destination_token);
    let snapshot = ride_snapshot(&world, ride).unwrap();
    assert_eq!(snapshot.phase, TrackingPhase::ToDestination);
    assert_eq!(snapshot.state.current_index, 0);
    assert_eq!(snapshot.state.current_position, Some(kigali_pickup()));

    runner.run_full(&mut world);

    let telemetry = world.resource::<RideTelemetry>();
    assert_eq!(telemetry.ticks_applied, 3 + TICKS_PER_LEG);
    assert_eq!(telemetry.stale_ticks_dropped, 1);
    let legs: Vec<_> = telemetry.legs_for(ride).collect();
    assert_eq!(legs.len(), 1);
    assert_eq!(legs[0].phase, TrackingPhase::ToDestination);
    assert_eq!(legs[0].started_at, 3 * TICK_MS);

    let done = ride_snapshot(&world, ride).unwrap();
    assert_eq!(done.state.current_position, Some(kigali_destination()));
}

#[test]
fn reset_stops_the_ride_and_is_idempotent() {
    let (mut world, rides) = RideWorldBuilder::new().with_kigali_ride().build();
    let ride = rides[0];
    let mut runner = ScheduleRunner::new();

    begin_pickup_leg(&mut world, ride);
    assert!(runner.run_one(&mut world));
    reset_ride(&mut world, ride);
    reset_ride(&mut world, ride);

    let snapshot = ride_snapshot(&world, ride).unwrap();
    assert_eq!(snapshot.phase, TrackingPhase::Idle);
    assert!(snapshot.state.route_points.is_empty());
    assert!(!snapshot.state.is_moving);

    runner.run_full(&mut world);
    let telemetry = world.resource::<RideTelemetry>();
    assert_eq!(telemetry.ticks_applied, 1);
    assert_eq!(telemetry.stale_ticks_dropped, 1);
    assert!(telemetry.completed_legs.is_empty());
}

#[test]
fn concurrent_rides_do_not_share_state() {
    let far_pickup = coord(-1.9700, 30.1000);
    let far_destination = coord(-1.9900, 30.1300);
    let (mut world, rides) = RideWorldBuilder::new()
        .with_kigali_ride()
        .with_ride(far_pickup, far_destination)
        .build();
    let mut runner = ScheduleRunner::new();

    begin_pickup_leg(&mut world, rides[0]);
    begin_pickup_leg(&mut world, rides[1]);
    begin_destination_leg(&mut world, rides[1]);
    runner.run_until(&mut world, 2 * TICK_MS);

    let first = ride_snapshot(&world, rides[0]).unwrap();
    let second = ride_snapshot(&world, rides[1]).unwrap();
    assert_eq!(first.phase, TrackingPhase::ToPickup);
    assert_eq!(second.phase, TrackingPhase::ToDestination);
    assert_eq!(first.state.current_index, 2);
    assert_eq!(second.state.current_index, 2);

    reset_ride(&mut world, rides[0]);
    runner.run_full(&mut world);

    assert_eq!(ride_snapshot(&world, rides[0]).unwrap().phase, TrackingPhase::Idle);
    let second = ride_snapshot(&world, rides[1]).unwrap();
    assert!(!second.state.is_moving);
    assert_eq!(second.state.current_position, Some(far_destination));

    let telemetry = world.resource::<RideTelemetry>();
    assert_eq!(telemetry.legs_for(rides[0]).count(), 0);
    assert_eq!(telemetry.legs_for(rides[1]).count(), 1);
}

#[test]
fn destination_leg_on_an_idle_ride_is_ignored() {
    let (mut world, rides) = RideWorldBuilder::new().with_kigali_ride().build();
    assert!(begin_destination_leg(&mut world, rides[0]).is_none());
    assert_eq!(ride_snapshot(&world, rides[0]).unwrap().phase, TrackingPhase::Idle);
    assert!(world.resource::<TickClock>().is_empty());
}

#[test]
fn despawned_ride_ticks_are_dropped() {
    let (mut world, rides) = RideWorldBuilder::new().with_kigali_ride().build();
    let mut runner = ScheduleRunner::new();

    begin_pickup_leg(&mut world, rides[0]);
    world.despawn(rides[0]);
    assert!(runner.run_one(&mut world));
    assert!(!runner.run_one(&mut world));

    let telemetry = world.resource::<RideTelemetry>();
    assert_eq!(telemetry.stale_ticks_dropped, 1);
    assert_eq!(ride_snapshot(&world, rides[0]), None);
}

#[test]
fn same_seed_same_start_point() {
    let build = || RideWorldBuilder::new().with_seed(9).with_kigali_ride().build();
    let (mut a, rides_a) = build();
    let (mut b, rides_b) = build();
    begin_pickup_leg(&mut a, rides_a[0]);
    begin_pickup_leg(&mut b, rides_b[0]);
    assert_eq!(
        ride_snapshot(&a, rides_a[0]).unwrap().state.route_points,
        ride_snapshot(&b, rides_b[0]).unwrap().state.route_points
    );
}
