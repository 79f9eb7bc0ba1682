//! Error types.
//!
//! Three tiers:
//! - Selection faults (unaffordable, illegal placement, timeout) are not
//!   errors at all; they resolve through fallback substitution and show up
//!   as `SelectionOutcome` values.
//! - Rejected requests (`DraftPickError`, committing twice, calling an
//!   operation in the wrong state) leave state untouched and can be retried.
//! - Fatal errors mean corrupted state or a broken catalog and abort the
//!   match. See `EngineError::is_fatal`.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::CardId;
use crate::draft::DraftCategory;

/// Incoherent `RulesConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max energy {max} is below starting energy {starting}")]
    EnergyCap { max: u32, starting: u32 },
    #[error("hand size {hand} exceeds deck size {deck}")]
    HandLargerThanDeck { hand: usize, deck: usize },
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
}

/// Broken card catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("card {0} is registered twice")]
    DuplicateId(CardId),
    #[error("catalog has {found} cards for {category:?}, a draft round needs {needed}")]
    Shortfall {
        category: DraftCategory,
        needed: usize,
        found: usize,
    },
}

/// A draft pick the engine refused. The round stays open.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftPickError {
    #[error("pick is for round {got} but round {expected} is open")]
    WrongRound { expected: usize, got: usize },
    #[error("{card} is not among the options of round {round}")]
    NotOffered { card: CardId, round: usize },
    #[error("{card} does not belong to category {category:?}")]
    WrongCategory { card: CardId, category: DraftCategory },
    #[error("draft is already complete")]
    DraftComplete,
}

/// Errors surfaced by the engine's public operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{player} has an empty hand during selection")]
    EmptyHand { player: PlayerId },
    #[error("drafted deck is missing required categories: {missing:?}")]
    DeckComposition { missing: Vec<DraftCategory> },
    #[error("card catalog is broken: {0}")]
    Catalog(#[from] CatalogError),
    #[error("invalid rules config: {0}")]
    Config(#[from] ConfigError),
    #[error("draft pick rejected: {0}")]
    DraftPick(#[from] DraftPickError),
    #[error("unknown card {0}")]
    UnknownCard(CardId),
    #[error("deck for {player} has {found} cards, expected {expected}")]
    DeckSize {
        player: PlayerId,
        expected: usize,
        found: usize,
    },
    #[error("{player} has no draft in progress")]
    NoDraft { player: PlayerId },
    #[error("draft for {player} is not complete")]
    DraftIncomplete { player: PlayerId },
    #[error("no match in progress")]
    NoMatch,
    #[error("match is already over")]
    MatchOver,
    #[error("match was aborted after a fatal error")]
    MatchAborted,
    #[error("selection window is closed")]
    SelectionClosed,
    #[error("{player} already committed a selection this turn")]
    AlreadyCommitted { player: PlayerId },
    #[error("seat {seat} does not exist in a duel")]
    UnknownSeat { seat: u8 },
}

impl EngineError {
    /// Whether this error must abort the match.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::EmptyHand { .. }
                | EngineError::DeckComposition { .. }
                | EngineError::Catalog(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(EngineError::EmptyHand { player: PlayerId::FIRST }.is_fatal());
        assert!(EngineError::DeckComposition { missing: vec![DraftCategory::Wall] }.is_fatal());
        assert!(EngineError::Catalog(CatalogError::DuplicateId(CardId::new(1))).is_fatal());

        assert!(!EngineError::DraftPick(DraftPickError::DraftComplete).is_fatal());
        assert!(!EngineError::AlreadyCommitted { player: PlayerId::SECOND }.is_fatal());
        assert!(!EngineError::SelectionClosed.is_fatal());
    }

    #[test]
    fn test_messages() {
        let err = EngineError::from(DraftPickError::WrongRound { expected: 2, got: 4 });
        assert_eq!(
            err.to_string(),
            "draft pick rejected: pick is for round 4 but round 2 is open"
        );

        let err = EngineError::EmptyHand { player: PlayerId::SECOND };
        assert_eq!(err.to_string(), "Player 1 has an empty hand during selection");
    }
}
