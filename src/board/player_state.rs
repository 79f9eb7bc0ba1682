//! Per-player mutable record.

use serde::{Deserialize, Serialize};

use super::miner::Miner;
use super::wall::{Wall, WallStatus};
use crate::cards::MinerKind;
use crate::core::RulesConfig;
use crate::zones::{Deck, Hand};

/// Everything the rules track for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Base health. May dip below zero in the turn a player is eliminated.
    pub health: i32,
    /// Current energy, within `0..=max_energy`.
    pub energy: u32,
    pub hand: Hand,
    pub deck: Deck,
    pub wall: Option<Wall>,
    pub miner: Option<Miner>,
    /// Set when a Deflection card is played; cleared every Cleanup.
    pub played_deflection: bool,
    /// Set when the base takes damage; cleared every Cleanup.
    pub base_damaged: bool,
}

impl PlayerState {
    /// A player at match start, holding the given (already shuffled) deck.
    #[must_use]
    pub fn new(config: &RulesConfig, deck: Deck) -> Self {
        Self {
            health: config.starting_health,
            energy: config.starting_energy,
            hand: Hand::new(),
            deck,
            wall: None,
            miner: None,
            played_deflection: false,
            base_damaged: false,
        }
    }

    /// Gain energy up to the cap. Returns the amount actually gained.
    pub fn gain_energy(&mut self, amount: u32, cap: u32) -> u32 {
        let before = self.energy;
        self.energy = self.energy.saturating_add(amount).min(cap);
        self.energy - before
    }

    /// Whether `cost` can be paid.
    #[must_use]
    pub fn can_afford(&self, cost: u32) -> bool {
        self.energy >= cost
    }

    /// Pay `cost`. Returns false (and pays nothing) if it cannot be afforded.
    pub fn spend(&mut self, cost: u32) -> bool {
        match self.energy.checked_sub(cost) {
            Some(rest) => {
                self.energy = rest;
                true
            }
            None => false,
        }
    }

    /// Whether the player's active miner is the reactive Deflection kind.
    #[must_use]
    pub fn has_deflection_miner(&self) -> bool {
        self.miner.is_some_and(|m| m.kind() == MinerKind::Deflection)
    }

    /// Apply damage to the base. Any positive amount destroys the miner.
    ///
    /// Returns true if a miner was destroyed.
    pub fn damage_base(&mut self, amount: i32) -> bool {
        if amount <= 0 {
            return false;
        }
        self.health -= amount;
        self.base_damaged = true;
        self.miner.take().is_some()
    }

    /// Remove wall HP, dropping the wall if it falls to zero.
    ///
    /// Returns true if the wall was destroyed.
    pub fn wear_wall(&mut self, amount: i32) -> bool {
        let Some(wall) = self.wall.as_mut() else {
            return false;
        };
        match wall.wear(amount) {
            WallStatus::Destroyed => {
                self.wall = None;
                true
            }
            WallStatus::Standing => false,
        }
    }

    /// Whether the base has fallen.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Clear the per-turn flags.
    pub fn clear_turn_flags(&mut self) {
        self.played_deflection = false;
        self.base_damaged = false;
    }
}
