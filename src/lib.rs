//! # duel-engine
//!
//! A deterministic rules engine for a two-player simultaneous card duel.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: every random decision draws from one seeded
//!    `GameRng`. Same seed and same inputs give byte-identical turn reports.
//!
//! 2. **One owned state**: a match is a single `GameState` passed by `&mut`
//!    through each phase function. There is no global state.
//!
//! 3. **Cosmetics stay cosmetic**: a card's element never reaches the
//!    combat resolver or the cost table. Both only see the subtype.
//!
//! ## Match Flow
//!
//! Draft (six timed rounds per player) → deck → thirteen-phase turns:
//! Energy, Selection, Reveal, Validation, Deduction, Placement, Resolution,
//! Payouts, Decay, DeathCheck, VictoryCheck, Cleanup, Advance.
//!
//! ## Modules
//!
//! - `core`: players, RNG, deadlines, configuration, errors, state
//! - `cards`: card definitions and the catalog
//! - `zones`: hand and deck
//! - `board`: player state, walls and miners
//! - `rules`: combat, selection fallback, victory
//! - `draft`: the deck draft
//! - `turn`: phases, the Selection barrier, the turn engine and reports
//! - `games`: the `DuelGame` facade
//!
//! ```
//! use duel_engine::{CardId, DuelGame, PlayerId};
//!
//! let mut game = DuelGame::new(7).unwrap();
//! let deck: Vec<CardId> = [1, 6, 11, 16, 23, 2].into_iter().map(CardId::new).collect();
//! game.start_match(deck.clone(), deck).unwrap();
//!
//! // Nobody commits: the deadline passes and both sides get the fallback.
//! let report = game.force_timeout().unwrap();
//! assert_eq!(report.turn, 1);
//! assert!(report.selections[PlayerId::FIRST].is_auto_selected());
//! ```

pub mod board;
pub mod cards;
pub mod core;
pub mod draft;
pub mod games;
pub mod rules;
pub mod turn;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    CatalogError, ConfigError, Countdown, DraftPickError, EngineError, GameRng, GameRngState,
    GameSnapshot, GameState, PlayerId, PlayerMap, PlayerView, RulesConfig,
};

pub use crate::cards::{
    AttackKind, CardDefinition, CardId, CardRegistry, CardStats, CardType, Element, MinerKind,
    Subtype,
};

pub use crate::board::{Miner, MinerPayout, PlayerState, Wall};

pub use crate::rules::{
    Attack, CombatOutcome, DefenderView, GameResult, ResolvedSelection, SelectionFault,
    SelectionOutcome,
};

pub use crate::draft::{DraftCategory, DraftEngine, DraftPick, DraftState};

pub use crate::turn::{
    AttackSource, Phase, RemoteSelections, SelectionBarrier, SelectionHandle, TurnEngine,
    TurnEvent, TurnReport,
};

pub use crate::games::{DuelGame, DuelGameBuilder};
