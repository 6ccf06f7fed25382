use serde::{Deserialize, Serialize};

/// Identity of one installed tick timer. Every phase start gets a fresh
/// token, so ticks scheduled for a cancelled timer can be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerToken(pub(crate) u64);

impl TimerToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// The single timer owned by a tracker while a leg is animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimer {
    pub token: TimerToken,
    pub interval_ms: u64,
    pub next_due_ms: u64,
}

impl TickTimer {
    pub(crate) fn start(token: TimerToken, now_ms: u64, interval_ms: u64) -> Self {
        Self {
            token,
            interval_ms,
            next_due_ms: now_ms.saturating_add(interval_ms),
        }
    }

    pub(crate) fn rearm(&mut self, fired_at_ms: u64) {
        self.next_due_ms = fired_at_ms.saturating_add(self.interval_ms);
    }
}
