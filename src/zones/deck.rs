//! The draw pile.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::GameRng;

/// Ordered draw pile. Index 0 is the bottom, the last entry is the top.
///
/// A deck is shuffled once when the match starts and is never refilled:
/// once empty, draws simply return `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardId>,
}

impl Deck {
    /// Create a deck from cards listed bottom to top.
    #[must_use]
    pub fn new(cards: Vec<CardId>) -> Self {
        Self { cards }
    }

    /// Shuffle in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    /// Peek at the top card.
    #[must_use]
    pub fn top(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    /// Cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }
}
