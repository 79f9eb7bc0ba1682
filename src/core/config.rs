//! Rules configuration.
//!
//! `RulesConfig::default()` is the authoritative duel ruleset. Every number
//! the engine uses lives here; rule code never hardcodes a constant. The
//! struct is serde-friendly so collaborators can load overrides from any
//! format, and `validate()` rejects tables the engine cannot run.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::{AttackKind, MinerKind, Subtype};

/// Complete numeric ruleset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    // === Player ===
    /// Base health at match start.
    pub starting_health: i32,
    /// Energy at match start.
    pub starting_energy: u32,
    /// Energy cap.
    pub max_energy: u32,
    /// Energy gained in every Energy phase.
    pub energy_regen: u32,
    /// Cards in a drafted deck.
    pub deck_size: usize,
    /// Hand capacity; Cleanup refills to this.
    pub hand_size: usize,

    // === Draft ===
    /// Options shown per draft round.
    pub options_per_round: usize,
    /// Timer for draft rounds 1-4.
    pub draft_timer_early: u32,
    /// Timer for draft rounds 5-6.
    pub draft_timer_late: u32,

    // === Selection ===
    /// Units both players get to commit a card.
    pub selection_timeout: u32,

    // === Attacks ===
    pub continuous_power: i32,
    pub continuous_cost: u32,
    pub projectile_power: i32,
    pub projectile_cost: u32,

    // === Defense ===
    pub wall_cost: u32,
    pub wall_max_hp: i32,
    pub wall_decay: i32,
    pub deflection_cost: u32,
    /// Amount a Deflection removes from an incoming Continuous attack.
    pub deflection_reduction: i32,

    // === Miners ===
    pub deflection_miner_cost: u32,
    pub projectile_miner_cost: u32,
    pub continuous_miner_cost: u32,
    pub repair_miner_cost: u32,
    pub projectile_miner_interval: u32,
    pub continuous_miner_interval: u32,
    pub repair_miner_interval: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_health: 20,
            starting_energy: 5,
            max_energy: 10,
            energy_regen: 2,
            deck_size: 6,
            hand_size: 4,

            options_per_round: 4,
            draft_timer_early: 12,
            draft_timer_late: 15,

            selection_timeout: 10,

            continuous_power: 8,
            continuous_cost: 5,
            projectile_power: 3,
            projectile_cost: 3,

            wall_cost: 2,
            wall_max_hp: 12,
            wall_decay: 4,
            deflection_cost: 1,
            deflection_reduction: 2,

            deflection_miner_cost: 2,
            projectile_miner_cost: 3,
            continuous_miner_cost: 5,
            repair_miner_cost: 3,
            projectile_miner_interval: 2,
            continuous_miner_interval: 3,
            repair_miner_interval: 2,
        }
    }
}

impl RulesConfig {
    /// Create the standard ruleset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection timeout.
    #[must_use]
    pub fn with_selection_timeout(mut self, units: u32) -> Self {
        self.selection_timeout = units;
        self
    }

    /// Set both draft timers.
    #[must_use]
    pub fn with_draft_timers(mut self, early: u32, late: u32) -> Self {
        self.draft_timer_early = early;
        self.draft_timer_late = late;
        self
    }

    /// Set the starting health.
    #[must_use]
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    /// Set starting energy, cap and regen.
    #[must_use]
    pub fn with_energy(mut self, starting: u32, max: u32, regen: u32) -> Self {
        self.starting_energy = starting;
        self.max_energy = max;
        self.energy_regen = regen;
        self
    }

    /// Energy cost of a subtype.
    #[must_use]
    pub fn cost(&self, subtype: Subtype) -> u32 {
        match subtype {
            Subtype::Continuous => self.continuous_cost,
            Subtype::Projectile => self.projectile_cost,
            Subtype::Wall => self.wall_cost,
            Subtype::Deflection => self.deflection_cost,
            Subtype::Miner(MinerKind::Deflection) => self.deflection_miner_cost,
            Subtype::Miner(MinerKind::Projectile) => self.projectile_miner_cost,
            Subtype::Miner(MinerKind::Continuous) => self.continuous_miner_cost,
            Subtype::Miner(MinerKind::Repair) => self.repair_miner_cost,
        }
    }

    /// Base power of an attack.
    #[must_use]
    pub fn attack_power(&self, kind: AttackKind) -> i32 {
        match kind {
            AttackKind::Continuous => self.continuous_power,
            AttackKind::Projectile => self.projectile_power,
        }
    }

    /// Turns between timed payouts. Zero for the reactive Deflection miner.
    #[must_use]
    pub fn payout_interval(&self, kind: MinerKind) -> u32 {
        match kind {
            MinerKind::Deflection => 0,
            MinerKind::Projectile => self.projectile_miner_interval,
            MinerKind::Continuous => self.continuous_miner_interval,
            MinerKind::Repair => self.repair_miner_interval,
        }
    }

    /// Draft countdown for a 1-based round number.
    #[must_use]
    pub fn draft_timer(&self, round: usize) -> u32 {
        if round <= 4 {
            self.draft_timer_early
        } else {
            self.draft_timer_late
        }
    }

    /// Check the table is runnable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_energy < self.starting_energy {
            return Err(ConfigError::EnergyCap {
                max: self.max_energy,
                starting: self.starting_energy,
            });
        }
        if self.hand_size > self.deck_size {
            return Err(ConfigError::HandLargerThanDeck {
                hand: self.hand_size,
                deck: self.deck_size,
            });
        }

        let positive: [(&'static str, bool); 8] = [
            ("starting_health", self.starting_health > 0),
            ("hand_size", self.hand_size > 0),
            ("options_per_round", self.options_per_round > 0),
            ("draft_timer_early", self.draft_timer_early > 0),
            ("draft_timer_late", self.draft_timer_late > 0),
            ("selection_timeout", self.selection_timeout > 0),
            ("wall_max_hp", self.wall_max_hp > 0),
            ("wall_decay", self.wall_decay > 0),
        ];
        match positive.iter().find(|(_, ok)| !ok) {
            Some(&(field, _)) => Err(ConfigError::NotPositive { field }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let config = RulesConfig::default();

        assert_eq!(config.starting_health, 20);
        assert_eq!((config.starting_energy, config.max_energy, config.energy_regen), (5, 10, 2));
        assert_eq!((config.deck_size, config.hand_size), (6, 4));
        assert_eq!(config.options_per_round, 4);
        assert_eq!(config.draft_timer(1), 12);
        assert_eq!(config.draft_timer(4), 12);
        assert_eq!(config.draft_timer(5), 15);
        assert_eq!(config.draft_timer(6), 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_costs_and_powers() {
        let config = RulesConfig::default();

        assert_eq!(config.cost(Subtype::Continuous), 5);
        assert_eq!(config.cost(Subtype::Projectile), 3);
        assert_eq!(config.cost(Subtype::Wall), 2);
        assert_eq!(config.cost(Subtype::Deflection), 1);
        assert_eq!(config.cost(Subtype::Miner(MinerKind::Deflection)), 2);
        assert_eq!(config.cost(Subtype::Miner(MinerKind::Projectile)), 3);
        assert_eq!(config.cost(Subtype::Miner(MinerKind::Continuous)), 5);
        assert_eq!(config.cost(Subtype::Miner(MinerKind::Repair)), 3);

        assert_eq!(config.attack_power(AttackKind::Continuous), 8);
        assert_eq!(config.attack_power(AttackKind::Projectile), 3);
    }

    #[test]
    fn test_payout_intervals() {
        let config = RulesConfig::default();

        assert_eq!(config.payout_interval(MinerKind::Deflection), 0);
        assert_eq!(config.payout_interval(MinerKind::Projectile), 2);
        assert_eq!(config.payout_interval(MinerKind::Continuous), 3);
        assert_eq!(config.payout_interval(MinerKind::Repair), 2);
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        let config = RulesConfig::default().with_energy(8, 6, 2);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EnergyCap { max: 6, starting: 8 })
        );

        let config = RulesConfig::default().with_selection_timeout(0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "selection_timeout" })
        );

        let mut config = RulesConfig::default();
        config.hand_size = 7;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::HandLargerThanDeck { hand: 7, deck: 6 })
        ));
    }

    #[test]
    fn test_config_serde() {
        let config = RulesConfig::default().with_draft_timers(20, 30);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RulesConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, deserialized);
    }
}
