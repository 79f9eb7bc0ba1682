//! Two-player duel.
//!
//! Each player drafts a six-card deck, then both play simultaneous turns
//! until one base (or both) falls:
//! - Both gain energy, then commit one card each behind a barrier
//! - Cards are revealed, checked, paid for and placed
//! - Attacks resolve against Walls and Deflection, miners pay out
//! - Walls decay, victory is checked, hands are refilled
//!
//! `DuelGame` is the only surface collaborators (UI, network, AI) mutate.

mod game;

pub use game::{DuelGame, DuelGameBuilder};
