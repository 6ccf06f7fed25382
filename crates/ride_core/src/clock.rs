use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

use crate::tracking::TimerToken;

/// One scheduled animation tick for one ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub timestamp: u64,
    pub ride: Entity,
    pub token: TimerToken,
}

impl Ord for TickEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by timestamp.
        other
            .timestamp
            .cmp(&self.timestamp)
            .then_with(|| other.ride.cmp(&self.ride))
            .then_with(|| other.token.cmp(&self.token))
    }
}

impl PartialOrd for TickEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The tick being processed by the current schedule run.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentTick(pub TickEvent);

/// Discrete clock shared by every ride in a world. Ticks of cancelled timers
/// stay queued and are discarded when popped.
#[derive(Debug, Default, Resource)]
pub struct TickClock {
    now: u64,
    events: BinaryHeap<TickEvent>,
}

impl TickClock {
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule(&mut self, event: TickEvent) {
        debug_assert!(
            event.timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        self.events.push(event);
    }

    pub fn pop_next(&mut self) -> Option<TickEvent> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek().map(|event| event.timestamp)
    }

    /// Move time forward without processing events (never backwards).
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now = self.now.max(now_ms);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
