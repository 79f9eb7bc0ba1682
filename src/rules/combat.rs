//! Combat resolution.
//!
//! `resolve` is a pure function from one attack and a view of the defender's
//! defenses to a `CombatOutcome`. `apply_outcome` writes that outcome back
//! onto the defender. Played attack cards and miner payouts go through the
//! same pair, so the miner-death rule is enforced in one place.
//!
//! ## Rules
//!
//! - Continuous: Deflection subtracts a fixed reduction first (floor 0),
//!   then the Wall absorbs up to its HP and any shortfall hits the base.
//! - Projectile: Walls are ignored. Deflection or a Deflection miner blocks
//!   it completely; otherwise full power hits the base.
//! - Any positive base damage destroys the defender's miner.

use serde::{Deserialize, Serialize};

use crate::board::PlayerState;
use crate::cards::AttackKind;
use crate::core::RulesConfig;

/// An attack as the resolver sees it: a kind and a power. Nothing else
/// about the originating card reaches combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub kind: AttackKind,
    pub power: i32,
}

impl Attack {
    /// An attack at the configured base power for its kind.
    #[must_use]
    pub fn base(kind: AttackKind, config: &RulesConfig) -> Self {
        Self {
            kind,
            power: config.attack_power(kind),
        }
    }
}

/// The defender's defenses at the moment an attack resolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefenderView {
    /// Current HP of the active wall, if any.
    pub wall_hp: Option<i32>,
    /// Whether a Deflection card was played this turn.
    pub played_deflection: bool,
    /// Whether the active miner is the reactive Deflection kind.
    pub deflection_miner: bool,
    /// Whether any miner is active.
    pub has_miner: bool,
}

impl DefenderView {
    /// Capture the defenses of a player.
    #[must_use]
    pub fn of(defender: &PlayerState) -> Self {
        Self {
            wall_hp: defender.wall.map(|w| w.current_hp()),
            played_deflection: defender.played_deflection,
            deflection_miner: defender.has_deflection_miner(),
            has_miner: defender.miner.is_some(),
        }
    }
}

/// Result of one attack against one defender.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    /// Damage soaked by the wall.
    pub wall_absorbed: i32,
    /// Damage dealt to the base.
    pub damage_to_base: i32,
    /// Whether the wall fell.
    pub wall_destroyed: bool,
    /// Whether the defender's miner died.
    pub miner_killed: bool,
    /// Whether a Projectile was stopped entirely by Deflection.
    pub blocked: bool,
}

/// Resolve one attack against a defender's current defenses.
#[must_use]
pub fn resolve(attack: Attack, defender: &DefenderView, config: &RulesConfig) -> CombatOutcome {
    let mut outcome = match attack.kind {
        AttackKind::Continuous => resolve_continuous(attack.power, defender, config),
        AttackKind::Projectile => resolve_projectile(attack.power, defender),
    };
    outcome.miner_killed = outcome.damage_to_base > 0 && defender.has_miner;
    outcome
}

fn resolve_continuous(power: i32, defender: &DefenderView, config: &RulesConfig) -> CombatOutcome {
    let damage = if defender.played_deflection {
        (power - config.deflection_reduction).max(0)
    } else {
        power.max(0)
    };

    match defender.wall_hp {
        Some(wall_hp) if damage > 0 => {
            let wall_absorbed = damage.min(wall_hp);
            CombatOutcome {
                wall_absorbed,
                damage_to_base: damage - wall_absorbed,
                wall_destroyed: wall_hp <= damage,
                ..CombatOutcome::default()
            }
        }
        Some(_) => CombatOutcome::default(),
        None => CombatOutcome {
            damage_to_base: damage,
            ..CombatOutcome::default()
        },
    }
}

fn resolve_projectile(power: i32, defender: &DefenderView) -> CombatOutcome {
    if defender.played_deflection || defender.deflection_miner {
        return CombatOutcome {
            blocked: true,
            ..CombatOutcome::default()
        };
    }
    CombatOutcome {
        damage_to_base: power.max(0),
        ..CombatOutcome::default()
    }
}

/// Write an outcome onto the defender.
pub fn apply_outcome(defender: &mut PlayerState, outcome: &CombatOutcome) {
    if outcome.wall_absorbed > 0 {
        let destroyed = defender.wear_wall(outcome.wall_absorbed);
        debug_assert_eq!(destroyed, outcome.wall_destroyed);
    }
    defender.damage_base(outcome.damage_to_base);
}

/// Resolve an attack against a live player and apply it.
pub fn strike(attack: Attack, defender: &mut PlayerState, config: &RulesConfig) -> CombatOutcome {
    let outcome = resolve(attack, &DefenderView::of(defender), config);
    apply_outcome(defender, &outcome);
    outcome
}
