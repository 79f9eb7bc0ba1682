//! Game facades built on the engine.

pub mod duel;

pub use duel::{DuelGame, DuelGameBuilder};
