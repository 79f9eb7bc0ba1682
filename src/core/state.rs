//! Match state.
//!
//! ## GameState
//!
//! The single owned record a match mutates: turn counter, current phase,
//! both players, the match RNG, the result once decided, and the history of
//! resolved turns. Every phase function takes it by `&mut`.
//!
//! ## GameSnapshot
//!
//! Read-only copy handed to collaborators. It carries no RNG handle, only a
//! checkpoint, so holding one cannot influence the match.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};
use super::rng::{GameRng, GameRngState};
use crate::board::{Miner, PlayerState, Wall};
use crate::cards::CardId;
use crate::rules::GameResult;
use crate::turn::{Phase, TurnReport};

/// Complete state of a running match.
///
/// History uses `im::Vector` so snapshots and clones stay cheap however long
/// the match runs.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Turn number, starting at 1.
    pub turn: u32,
    pub phase: Phase,
    pub players: PlayerMap<PlayerState>,
    pub rng: GameRng,
    pub result: Option<GameResult>,
    pub history: Vector<TurnReport>,
}

impl GameState {
    /// A state at turn 1, before the first Energy phase.
    #[must_use]
    pub fn new(players: PlayerMap<PlayerState>, rng: GameRng) -> Self {
        Self {
            turn: 1,
            phase: Phase::Energy,
            players,
            rng,
            result: None,
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    /// Whether the match has a result.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// The most recently resolved turn.
    #[must_use]
    pub fn last_report(&self) -> Option<&TurnReport> {
        self.history.back()
    }

    /// Read-only copy for collaborators.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            turn: self.turn,
            phase: self.phase,
            players: PlayerMap::new(|id| PlayerView::of(&self.players[id])),
            result: self.result,
            rng: self.rng.state(),
            turns_resolved: self.history.len(),
        }
    }
}

/// Public view of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub health: i32,
    pub energy: u32,
    pub hand: Vec<CardId>,
    pub deck_size: usize,
    pub wall: Option<Wall>,
    pub miner: Option<Miner>,
    pub played_deflection: bool,
}

impl PlayerView {
    fn of(player: &PlayerState) -> Self {
        Self {
            health: player.health,
            energy: player.energy,
            hand: player.hand.cards().to_vec(),
            deck_size: player.deck.len(),
            wall: player.wall,
            miner: player.miner,
            played_deflection: player.played_deflection,
        }
    }
}

/// Read-only copy of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: u32,
    pub phase: Phase,
    pub players: PlayerMap<PlayerView>,
    pub result: Option<GameResult>,
    pub rng: GameRngState,
    pub turns_resolved: usize,
}

impl GameSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode from `to_bytes` output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
