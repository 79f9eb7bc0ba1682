//! Turn reports: what happened in one resolved turn.
//!
//! A report carries both revealed selections and an ordered event log, so a
//! UI can replay the turn step by step. Reports are the unit of the
//! byte-identical replay check: same seed and same inputs give the same
//! `to_bytes()` output turn after turn.

use serde::{Deserialize, Serialize};

use super::phase::Phase;
use crate::board::MinerPayout;
use crate::cards::{CardId, MinerKind, Subtype};
use crate::core::{PlayerId, PlayerMap};
use crate::rules::{Attack, CombatOutcome, GameResult, ResolvedSelection, SelectionFault};

/// Where an attack came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackSource {
    Card(CardId),
    Miner(MinerKind),
}

/// One step of a turn, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TurnEvent {
    EnergyGained {
        player: PlayerId,
        amount: u32,
        energy: u32,
    },
    Revealed {
        player: PlayerId,
        card: CardId,
    },
    /// Validation swapped a revealed card for another.
    Revalidated {
        player: PlayerId,
        from: CardId,
        to: CardId,
    },
    EnergySpent {
        player: PlayerId,
        card: CardId,
        amount: u32,
        energy: u32,
    },
    Played {
        player: PlayerId,
        card: CardId,
        subtype: Subtype,
    },
    Wasted {
        player: PlayerId,
        card: CardId,
        fault: SelectionFault,
    },
    WallPlaced {
        player: PlayerId,
        hp: i32,
    },
    MinerPlaced {
        player: PlayerId,
        kind: MinerKind,
    },
    Deflecting {
        player: PlayerId,
    },
    Combat {
        attacker: PlayerId,
        source: AttackSource,
        attack: Attack,
        outcome: CombatOutcome,
    },
    MinerFired {
        player: PlayerId,
        payout: MinerPayout,
    },
    WallRepaired {
        player: PlayerId,
        restored: i32,
    },
    /// A Repair miner fired with no wall to mend.
    RepairFizzled {
        player: PlayerId,
    },
    WallDecayed {
        player: PlayerId,
        hp: i32,
        destroyed: bool,
    },
    MinerDestroyed {
        player: PlayerId,
    },
    CardsDrawn {
        player: PlayerId,
        cards: Vec<CardId>,
    },
    MatchEnded {
        result: GameResult,
    },
}

/// A turn that has started but not yet resolved.
///
/// Holds the events of the phases that ran before Selection opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnLog {
    pub(crate) turn: u32,
    pub(crate) events: Vec<TurnEvent>,
    pub(crate) phases: Vec<Phase>,
}

impl TurnLog {
    pub(crate) fn new(turn: u32) -> Self {
        Self {
            turn,
            events: Vec::new(),
            phases: Vec::with_capacity(Phase::ORDER.len()),
        }
    }

    pub(crate) fn push(&mut self, event: TurnEvent) {
        self.events.push(event);
    }

    /// The turn this log belongs to.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[TurnEvent] {
        &self.events
    }
}

/// The revealed result of one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u32,
    /// What each player actually played, after Validation.
    pub selections: PlayerMap<ResolvedSelection>,
    pub events: Vec<TurnEvent>,
    /// Phases executed, in order. Ends at VictoryCheck when the match ended.
    pub phases: Vec<Phase>,
    pub result: Option<GameResult>,
}

impl TurnReport {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Combat events of this turn.
    pub fn combats(&self) -> impl Iterator<Item = (&AttackSource, &CombatOutcome)> {
        self.events.iter().filter_map(|event| match event {
            TurnEvent::Combat { source, outcome, .. } => Some((source, outcome)),
            _ => None,
        })
    }

    /// Total base damage dealt to `player` this turn.
    #[must_use]
    pub fn damage_to(&self, player: PlayerId) -> i32 {
        self.events
            .iter()
            .filter_map(|event| match event {
                TurnEvent::Combat { attacker, outcome, .. } if *attacker != player => {
                    Some(outcome.damage_to_base)
                }
                _ => None,
            })
            .sum()
    }
}
