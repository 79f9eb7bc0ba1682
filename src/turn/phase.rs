//! The thirteen phases of a turn.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a turn. Phases run in `ORDER` with no skips; `Advance`
/// wraps back to `Energy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Energy,
    Selection,
    Reveal,
    Validation,
    Deduction,
    Placement,
    Resolution,
    Payouts,
    Decay,
    DeathCheck,
    VictoryCheck,
    Cleanup,
    Advance,
}

impl Phase {
    pub const ORDER: [Phase; 13] = [
        Phase::Energy,
        Phase::Selection,
        Phase::Reveal,
        Phase::Validation,
        Phase::Deduction,
        Phase::Placement,
        Phase::Resolution,
        Phase::Payouts,
        Phase::Decay,
        Phase::DeathCheck,
        Phase::VictoryCheck,
        Phase::Cleanup,
        Phase::Advance,
    ];

    /// Position within `ORDER`.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The phase that follows this one.
    #[must_use]
    pub fn next(self) -> Phase {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
