//! A player's hand.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::deck::Deck;
use crate::cards::CardId;

/// Cards held by a player.
///
/// Order carries no rules meaning but is kept stable for display and for
/// deterministic tie-breaks. Duplicates are allowed (a deck may hold two
/// copies of the same catalog card).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[CardId; 4]>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card.
    pub fn push(&mut self, card: CardId) {
        self.cards.push(card);
    }

    /// Remove one copy of a card. Returns true if it was held.
    pub fn remove(&mut self, card: CardId) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Whether the hand holds at least one copy of `card`.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    /// Draw from `deck` until the hand holds `capacity` cards or the deck
    /// runs out. Returns the cards drawn.
    pub fn refill(&mut self, deck: &mut Deck, capacity: usize) -> Vec<CardId> {
        let mut drawn = Vec::new();
        while self.cards.len() < capacity {
            match deck.draw() {
                Some(card) => {
                    self.cards.push(card);
                    drawn.push(card);
                }
                None => break,
            }
        }
        drawn
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in hand order.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }
}
