//! Duel rules.
//!
//! - `combat`: resolving one attack against one defender
//! - `selection`: settling what a player actually plays (fallback, waste)
//! - `victory`: deciding win, loss or draw after a turn

pub mod combat;
pub mod selection;
pub mod victory;

pub use combat::{apply_outcome, resolve, strike, Attack, CombatOutcome, DefenderView};
pub use selection::{
    check_play, legal_cards, resolve_selection, ResolvedSelection, SelectionFault, SelectionOutcome,
};
pub use victory::{evaluate, GameResult};
