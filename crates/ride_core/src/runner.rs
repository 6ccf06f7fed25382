//! Tracking runner: owns the tick loop for every ride in a world.
//!
//! Each step pops the next tick from [TickClock], inserts it as [CurrentTick],
//! then runs the schedule. Phase changes go through the helpers below so the
//! first tick of a new leg is always scheduled with the new timer's token.

use bevy_ecs::prelude::{Entity, Schedule, World};

use crate::clock::{CurrentTick, TickClock, TickEvent};
use crate::ecs::{RideAssignment, RideTracking};
use crate::systems::tracking_tick::tracking_tick_system;
use crate::telemetry::RideTelemetry;
use crate::tracking::{DriverTracker, TimerToken, TrackingSnapshot};

/// Insert the resources the tracking schedule expects.
pub fn initialize_world(world: &mut World) {
    world.insert_resource(TickClock::default());
    world.insert_resource(RideTelemetry::default());
}

pub fn tracking_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(tracking_tick_system);
    schedule
}

/// Spawn an idle ride entity.
pub fn spawn_ride(world: &mut World, assignment: RideAssignment, tracker: DriverTracker) -> Entity {
    world.spawn((assignment, RideTracking { tracker })).id()
}

fn schedule_next_tick(world: &mut World, ride: Entity) {
    let next = world
        .get::<RideTracking>(ride)
        .and_then(|tracking| tracking.tracker.next_tick());
    if let Some((token, timestamp)) = next {
        world
            .resource_mut::<TickClock>()
            .schedule(TickEvent { timestamp, ride, token });
    }
}

/// Start the to-pickup leg of `ride` at the clock's current time.
pub fn begin_pickup_leg(world: &mut World, ride: Entity) -> Option<TimerToken> {
    let pickup = world.get::<RideAssignment>(ride)?.pickup;
    let now = world.resource::<TickClock>().now();
    let token = world
        .get_mut::<RideTracking>(ride)?
        .tracker
        .start_pickup_leg(Some(pickup), now)?;
    schedule_next_tick(world, ride);
    Some(token)
}

/// Start the to-destination leg of `ride`, cancelling whatever leg was running.
pub fn begin_destination_leg(world: &mut World, ride: Entity) -> Option<TimerToken> {
    let (pickup, destination) = world
        .get::<RideAssignment>(ride)
        .map(|assignment| (assignment.pickup, assignment.destination))?;
    let now = world.resource::<TickClock>().now();
    let token = world
        .get_mut::<RideTracking>(ride)?
        .tracker
        .start_destination_leg(Some(pickup), Some(destination), now)?;
    schedule_next_tick(world, ride);
    Some(token)
}

/// Reset the tracker of `ride`; its queued ticks become stale.
pub fn reset_ride(world: &mut World, ride: Entity) {
    if let Some(mut tracking) = world.get_mut::<RideTracking>(ride) {
        tracking.tracker.reset_tracking();
    }
}

pub fn ride_snapshot(world: &World, ride: Entity) -> Option<TrackingSnapshot> {
    world
        .get::<RideTracking>(ride)
        .map(|tracking| tracking.tracker.snapshot())
}

/// Runs one step: pops the next tick, inserts it as [CurrentTick], then runs
/// the schedule. Returns `false` if the clock was empty.
pub fn run_next_tick(world: &mut World, schedule: &mut Schedule) -> bool {
    let event = match world.resource_mut::<TickClock>().pop_next() {
        Some(e) => e,
        None => return false,
    };
    world.insert_resource(CurrentTick(event));
    schedule.run(world);
    true
}

/// Process every tick due at or before `until_ms`, then move the clock to
/// `until_ms`. Returns the number of ticks popped (stale ones included).
pub fn run_until(world: &mut World, schedule: &mut Schedule, until_ms: u64) -> usize {
    let mut steps = 0;
    loop {
        let next = world.resource::<TickClock>().next_event_time();
        match next {
            Some(ts) if ts <= until_ms => {
                if !run_next_tick(world, schedule) {
                    break;
                }
                steps += 1;
            }
            _ => break,
        }
    }
    world.resource_mut::<TickClock>().advance_to(until_ms);
    steps
}

/// Process ticks until the queue is empty or `max_steps` is reached.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_tick(world, schedule) {
        steps += 1;
    }
    steps
}
