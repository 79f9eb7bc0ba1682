//! Core engine types: players, RNG, deadlines, configuration, errors, state.
//!
//! Nothing here knows the card rules; `rules`, `draft` and `turn` build on
//! these pieces.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;
pub mod timer;

pub use config::RulesConfig;
pub use error::{CatalogError, ConfigError, DraftPickError, EngineError};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use state::{GameSnapshot, GameState, PlayerView};
pub use timer::Countdown;
