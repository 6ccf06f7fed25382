//! Tick system: advances the tracker a popped tick belongs to.

use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::debug;

use crate::clock::{CurrentTick, TickClock, TickEvent};
use crate::ecs::RideTracking;
use crate::telemetry::{CompletedLegRecord, RideTelemetry};

pub fn tracking_tick_system(
    event: Res<CurrentTick>,
    mut clock: ResMut<TickClock>,
    mut telemetry: ResMut<RideTelemetry>,
    mut rides: Query<&mut RideTracking>,
) {
    let tick = event.0;
    let Ok(mut ride) = rides.get_mut(tick.ride) else {
        telemetry.stale_ticks_dropped += 1;
        return;
    };

    if !ride.tracker.on_tick(tick.token, tick.timestamp) {
        debug!(ride = ?tick.ride, generation = tick.token.generation(), "stale tick dropped");
        telemetry.stale_ticks_dropped += 1;
        return;
    }
    telemetry.ticks_applied += 1;

    match ride.tracker.next_tick() {
        Some((token, timestamp)) => clock.schedule(TickEvent {
            timestamp,
            ride: tick.ride,
            token,
        }),
        None => {
            if ride.tracker.has_arrived() {
                telemetry.completed_legs.push(CompletedLegRecord {
                    ride: tick.ride,
                    phase: ride.tracker.phase(),
                    started_at: ride.tracker.phase_started_at_ms().unwrap_or(tick.timestamp),
                    completed_at: tick.timestamp,
                });
            }
        }
    }
}
