//! Card locations: each player's hand and draw pile.
//!
//! ## Key Types
//!
//! - `Hand`: Up to `hand_size` cards, refilled during Cleanup
//! - `Deck`: Ordered draw pile, shuffled once, never reshuffled

pub mod deck;
pub mod hand;

pub use deck::Deck;
pub use hand::Hand;
