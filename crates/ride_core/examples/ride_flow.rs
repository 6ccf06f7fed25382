//! Quote a Kigali trip, match a driver, then animate both tracking legs.
//!
//! Run with: RUST_LOG=ride_core=debug cargo run -p ride_core --example ride_flow

use bevy_ecs::prelude::World;
use ride_core::ecs::RideAssignment;
use ride_core::error::RideError;
use ride_core::matching::RideRequest;
use ride_core::pricing::VehicleClass;
use ride_core::runner::{
    begin_destination_leg, begin_pickup_leg, initialize_world, ride_snapshot, run_until_empty,
    spawn_ride, tracking_schedule,
};
use ride_core::telemetry::RideTelemetry;
use ride_core::test_helpers::{kigali_destination, kigali_pickup, scattered_candidates};
use ride_core::EngineConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), RideError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = EngineConfig::from_json_str(
        r#"{"matching": {"finder": {"kind": "h3_ring", "resolution": 9, "max_rings": 64}}}"#,
    )?;
    let matcher = config.build_matcher()?;
    let fleet = scattered_candidates(123, 200, kigali_pickup(), 0.08);

    println!("--- Quotes ---");
    for class in VehicleClass::ALL {
        let request = RideRequest::new(kigali_pickup(), kigali_destination(), class).with_ride_sharing(true);
        let quote = matcher.quote(&request)?;
        println!(
            "{:<8} {:.2} km {:>3} min  {} {} (shared {})",
            class.id(),
            quote.distance_km,
            quote.duration_minutes,
            quote.base_fare,
            quote.currency,
            quote.discounted_fare.unwrap_or(quote.base_fare),
        );
    }

    let request = RideRequest::new(kigali_pickup(), kigali_destination(), VehicleClass::Economy);
    let matched = matcher.match_ride(&request, &fleet)?;
    println!(
        "--- Matched {} at {:.0} m, pickup in {} min ---",
        matched.driver.id, matched.distance_to_pickup_m, matched.pickup_eta_minutes
    );

    let mut world = World::new();
    initialize_world(&mut world);
    let mut schedule = tracking_schedule();
    let ride = spawn_ride(
        &mut world,
        RideAssignment {
            ride_id: "ride-demo".to_string(),
            pickup: kigali_pickup(),
            destination: kigali_destination(),
            matched,
        },
        config.build_tracker(Some(123)),
    );

    begin_pickup_leg(&mut world, ride);
    let pickup_ticks = run_until_empty(&mut world, &mut schedule, 10_000);
    begin_destination_leg(&mut world, ride);
    let trip_ticks = run_until_empty(&mut world, &mut schedule, 10_000);

    if let Some(snapshot) = ride_snapshot(&world, ride) {
        println!(
            "Arrived at {:?} after {} + {} ticks",
            snapshot.state.current_position, pickup_ticks, trip_ticks
        );
    }
    for leg in &world.resource::<RideTelemetry>().completed_legs {
        println!("{:?}: {:.1} s", leg.phase, leg.duration_ms() as f64 / 1000.0);
    }
    Ok(())
}
