#![allow(dead_code)]

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use ride_core::runner::{run_next_tick, run_until, run_until_empty, tracking_schedule};

/// Owns a reusable `Schedule` so tests can step or drain the tick queue.
pub struct ScheduleRunner {
    schedule: Schedule,
}

impl Default for ScheduleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleRunner {
    pub fn new() -> Self {
        Self {
            schedule: tracking_schedule(),
        }
    }

    /// Run a single tick (returns `true` if one was processed).
    pub fn run_one(&mut self, world: &mut World) -> bool {
        run_next_tick(world, &mut self.schedule)
    }

    pub fn run_until(&mut self, world: &mut World, until_ms: u64) -> usize {
        run_until(world, &mut self.schedule, until_ms)
    }

    /// Drain the queue (bounded so a scheduling bug cannot hang the test).
    pub fn run_full(&mut self, world: &mut World) -> usize {
        run_until_empty(world, &mut self.schedule, 100_000)
    }
}
