use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo::{haversine_m, Coordinate, METERS_PER_KM};

use super::route::interpolate_route;
use super::timer::{TickTimer, TimerToken};
use super::{eta_minutes, TrackerConfig};

/// Which leg of the trip is being animated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingPhase {
    #[default]
    Idle,
    ToPickup,
    ToDestination,
}

/// Animated driver position along the current leg.
///
/// `current_index` always addresses a point of `route_points` (it is 0 for
/// an empty route) and `is_moving` is false exactly when the index sits on the
/// last point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingState {
    pub current_position: Option<Coordinate>,
    pub route_points: Vec<Coordinate>,
    pub current_index: usize,
    pub eta_minutes: u32,
    pub distance_remaining_km: f64,
    pub is_moving: bool,
}

/// What the map renderer receives after each change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    pub phase: TrackingPhase,
    pub state: TrackingState,
    pub phase_started_at_ms: Option<u64>,
}

/// Per-ride tracker: phase, animation state and the one timer driving it.
///
/// Starting a leg or resetting always cancels the installed timer before a
/// new one is created, and ticks carrying a token other than the installed
/// one are ignored. Two timers can therefore never advance the same state.
#[derive(Debug)]
pub struct DriverTracker {
    config: TrackerConfig,
    rng: StdRng,
    phase: TrackingPhase,
    state: TrackingState,
    timer: Option<TickTimer>,
    next_generation: u64,
    phase_started_at_ms: Option<u64>,
}

impl DriverTracker {
    /// Create an idle tracker. A seed makes the synthetic start point reproducible.
    pub fn new(config: TrackerConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            phase: TrackingPhase::Idle,
            state: TrackingState::default(),
            timer: None,
            next_generation: 0,
            phase_started_at_ms: None,
        }
    }

    pub fn phase(&self) -> TrackingPhase {
        self.phase
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn phase_started_at_ms(&self) -> Option<u64> {
        self.phase_started_at_ms
    }

    /// Token and due time of the next tick, if a timer is installed.
    pub fn next_tick(&self) -> Option<(TimerToken, u64)> {
        self.timer.map(|timer| (timer.token, timer.next_due_ms))
    }

    /// The current leg reached its last point.
    pub fn has_arrived(&self) -> bool {
        self.phase != TrackingPhase::Idle && !self.state.is_moving
    }

    pub fn snapshot(&self) -> TrackingSnapshot {
        TrackingSnapshot {
            phase: self.phase,
            state: self.state.clone(),
            phase_started_at_ms: self.phase_started_at_ms,
        }
    }

    /// Begin the leg towards the pickup from a synthetic start near it.
    ///
    /// Returns the installed timer token, or `None` (tracker unchanged) when
    /// the pickup is missing or malformed.
    pub fn start_pickup_leg(&mut self, pickup: Option<Coordinate>, now_ms: u64) -> Option<TimerToken> {
        let Some(pickup) = pickup.filter(Coordinate::is_valid) else {
            debug!("pickup leg ignored: missing or invalid pickup");
            return None;
        };
        let offset = self.config.start_offset_deg;
        let (dlat, dlng) = if offset > 0.0 {
            (
                self.rng.gen_range(-offset..=offset),
                self.rng.gen_range(-offset..=offset),
            )
        } else {
            (0.0, 0.0)
        };
        let start = Coordinate::normalized(pickup.lat() + dlat, pickup.lng() + dlng);
        self.begin_phase(TrackingPhase::ToPickup, start, pickup, now_ms)
    }

    /// Begin the leg from the pickup to the destination. Called once the
    /// host confirms the driver reached the pickup, so it is only accepted
    /// while a pickup leg is installed (arrived or still animating).
    /// Returns `None` and leaves the tracker unchanged otherwise.
    pub fn start_destination_leg(
        &mut self,
        pickup: Option<Coordinate>,
        destination: Option<Coordinate>,
        now_ms: u64,
    ) -> Option<TimerToken> {
        let (Some(pickup), Some(destination)) = (
            pickup.filter(Coordinate::is_valid),
            destination.filter(Coordinate::is_valid),
        ) else {
            debug!("destination leg ignored: missing or invalid endpoints");
            return None;
        };
        if self.phase != TrackingPhase::ToPickup {
            debug!(phase = ?self.phase, "destination leg ignored: no pickup leg");
            return None;
        }
        self.begin_phase(TrackingPhase::ToDestination, pickup, destination, now_ms)
    }

    fn begin_phase(
        &mut self,
        phase: TrackingPhase,
        start: Coordinate,
        end: Coordinate,
        now_ms: u64,
    ) -> Option<TimerToken> {
        self.cancel_timer();

        let route_points = interpolate_route(start, end, &self.config);
        self.state = TrackingState {
            current_position: route_points.first().copied(),
            route_points,
            ..TrackingState::default()
        };
        self.refresh_progress();
        self.phase = phase;
        self.phase_started_at_ms = Some(now_ms);

        debug!(
            ?phase,
            points = self.state.route_points.len(),
            eta_minutes = self.state.eta_minutes,
            "tracking leg started"
        );

        if !self.state.is_moving {
            return None;
        }
        let token = TimerToken(self.next_generation);
        self.next_generation += 1;
        self.timer = Some(TickTimer::start(token, now_ms, self.config.tick_interval_ms));
        Some(token)
    }

    /// Apply one tick fired at `at_ms`. Returns `false` for stale tokens or
    /// when no timer is installed.
    pub fn on_tick(&mut self, token: TimerToken, at_ms: u64) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        if timer.token != token {
            return false;
        }
        timer.rearm(at_ms);

        let last = self.state.route_points.len().saturating_sub(1);
        self.state.current_index = (self.state.current_index + 1).min(last);
        self.refresh_progress();

        if !self.state.is_moving {
            self.timer = None;
            debug!(phase = ?self.phase, "tracking leg complete");
        }
        true
    }

    /// Fire every tick due at or before `now_ms`. Returns how many were applied.
    pub fn advance_to(&mut self, now_ms: u64) -> usize {
        let mut applied = 0;
        while let Some((token, due_ms)) = self.next_tick() {
            if due_ms > now_ms || !self.on_tick(token, due_ms) {
                break;
            }
            applied += 1;
        }
        applied
    }

    /// Drop the route, stop moving and cancel the timer. Safe in any state.
    pub fn reset_tracking(&mut self) {
        self.cancel_timer();
        self.state = TrackingState::default();
        self.phase = TrackingPhase::Idle;
        self.phase_started_at_ms = None;
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(generation = timer.token.generation(), "tick timer cancelled");
        }
    }

    /// Recompute position, remaining distance and ETA from `current_index`.
    fn refresh_progress(&mut self) {
        let points = &self.state.route_points;
        let len = points.len();
        let (Some(&current), Some(&last)) = (points.get(self.state.current_index), points.last())
        else {
            self.state.current_position = None;
            self.state.is_moving = false;
            self.state.eta_minutes = 0;
            self.state.distance_remaining_km = 0.0;
            return;
        };

        self.state.current_position = Some(current);
        if self.state.current_index + 1 >= len {
            self.state.is_moving = false;
            self.state.eta_minutes = 0;
            self.state.distance_remaining_km = 0.0;
        } else {
            let remaining_km = haversine_m(current, last) / METERS_PER_KM;
            self.state.is_moving = true;
            self.state.distance_remaining_km = remaining_km;
            self.state.eta_minutes = eta_minutes(remaining_km, self.config.average_speed_kmh);
        }
    }
}
