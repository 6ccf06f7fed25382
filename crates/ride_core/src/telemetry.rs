//! Telemetry: tick counters and completed tracking legs.

use bevy_ecs::prelude::{Entity, Resource};

use crate::tracking::TrackingPhase;

/// One finished leg, recorded when the animated driver reaches the leg's end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedLegRecord {
    pub ride: Entity,
    pub phase: TrackingPhase,
    pub started_at: u64,
    pub completed_at: u64,
}

impl CompletedLegRecord {
    pub fn duration_ms(&self) -> u64 {
        self.completed_at.saturating_sub(self.started_at)
    }
}

#[derive(Debug, Default, Resource)]
pub struct RideTelemetry {
    pub ticks_applied: u64,
    /// Ticks popped for cancelled timers or despawned rides.
    pub stale_ticks_dropped: u64,
    pub completed_legs: Vec<CompletedLegRecord>,
}

impl RideTelemetry {
    pub fn legs_for(&self, ride: Entity) -> impl Iterator<Item = &CompletedLegRecord> {
        self.completed_legs.iter().filter(move |leg| leg.ride == ride)
    }
}
