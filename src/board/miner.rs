//! Miners: persistent structures with periodic (or reactive) effects.

use serde::{Deserialize, Serialize};

use crate::cards::{AttackKind, MinerKind};

/// Effect produced when a miner's countdown fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinerPayout {
    /// A free attack against the opponent.
    Attack(AttackKind),
    /// Restore the owner's wall to full.
    RepairWall,
}

impl MinerPayout {
    /// The timed payout for a miner kind. `None` for the reactive kind.
    #[must_use]
    pub const fn for_kind(kind: MinerKind) -> Option<Self> {
        match kind {
            MinerKind::Deflection => None,
            MinerKind::Projectile => Some(MinerPayout::Attack(AttackKind::Projectile)),
            MinerKind::Continuous => Some(MinerPayout::Attack(AttackKind::Continuous)),
            MinerKind::Repair => Some(MinerPayout::RepairWall),
        }
    }
}

/// An active miner.
///
/// `0 <= turns_until_payout <= payout_interval` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Miner {
    kind: MinerKind,
    turns_until_payout: u32,
    payout_interval: u32,
    turn_placed: u32,
}

impl Miner {
    /// A freshly placed miner with a full countdown.
    #[must_use]
    pub fn new(kind: MinerKind, payout_interval: u32, turn_placed: u32) -> Self {
        Self {
            kind,
            turns_until_payout: payout_interval,
            payout_interval,
            turn_placed,
        }
    }

    #[must_use]
    pub fn kind(&self) -> MinerKind {
        self.kind
    }

    #[must_use]
    pub fn turns_until_payout(&self) -> u32 {
        self.turns_until_payout
    }

    #[must_use]
    pub fn payout_interval(&self) -> u32 {
        self.payout_interval
    }

    #[must_use]
    pub fn turn_placed(&self) -> u32 {
        self.turn_placed
    }

    /// Whether this miner blocks Projectiles reactively.
    #[must_use]
    pub fn is_reactive(&self) -> bool {
        self.kind == MinerKind::Deflection
    }

    /// Run one Payouts-phase step.
    ///
    /// At zero the payout fires and the countdown resets to the interval;
    /// otherwise the countdown drops by one. Reactive miners never fire.
    pub fn tick(&mut self) -> Option<MinerPayout> {
        let payout = MinerPayout::for_kind(self.kind)?;
        if self.turns_until_payout == 0 {
            self.turns_until_payout = self.payout_interval;
            Some(payout)
        } else {
            self.turns_until_payout -= 1;
            None
        }
    }
}
