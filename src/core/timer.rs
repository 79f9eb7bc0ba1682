//! Logical-time countdowns.
//!
//! Draft rounds and the Selection window run against a deadline measured
//! in abstract time units. Callers feed elapsed units in; the engine never
//! reads a wall clock, which keeps replays exact.

use serde::{Deserialize, Serialize};

/// A deadline measured in time units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    total: u32,
    remaining: u32,
}

impl Countdown {
    /// Start a countdown of `total` units.
    #[must_use]
    pub const fn new(total: u32) -> Self {
        Self {
            total,
            remaining: total,
        }
    }

    /// Units the countdown started with.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Units left before expiry.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the deadline has passed.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Advance by `units`. Returns true if this call crossed the deadline.
    pub fn tick(&mut self, units: u32) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(units);
        self.remaining == 0
    }

    /// Expire immediately. Returns true if the countdown was still running.
    pub fn expire(&mut self) -> bool {
        let was_running = self.remaining > 0;
        self.remaining = 0;
        was_running
    }
}
