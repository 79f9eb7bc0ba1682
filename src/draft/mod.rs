//! Deck drafting.
//!
//! Each player drafts a six-card deck over six timed rounds. Round
//! categories are fixed (Wall, Deflection, Continuous attack, Projectile
//! attack, Miner, Wildcard) and every round offers four options.
//!
//! ## Key Types
//!
//! - `DraftEngine`: one player's draft, from dealing to the finished deck
//! - `DraftRound`: options, countdown and pick of one round
//! - `DraftState`: serializable view for display

pub mod engine;
pub mod round;

pub use engine::{validate_deck, DraftEngine, DraftState};
pub use round::{DraftCategory, DraftOption, DraftPick, DraftRound};
