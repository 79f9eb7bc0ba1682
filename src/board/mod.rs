//! Player boards: per-player state and the structures placed on it.
//!
//! ## Key Types
//!
//! - `PlayerState`: health, energy, hand, deck, structures, per-turn flags
//! - `Wall`: decaying barrier, at most one per player
//! - `Miner`: periodic or reactive structure, at most one per player

pub mod miner;
pub mod player_state;
pub mod wall;

pub use miner::{Miner, MinerPayout};
pub use player_state::PlayerState;
pub use wall::{Wall, WallStatus};
