//! Victory evaluation.
//!
//! Checked once per turn after Resolution, Payouts and Decay. Both bases
//! falling in the same turn is a draw; there is no tie-break.

use serde::{Deserialize, Serialize};

use crate::board::PlayerState;
use crate::core::{PlayerId, PlayerMap};

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// One base fell; the other player wins.
    Winner(PlayerId),
    /// Both bases fell in the same turn.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winner, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// Inspect both bases. `None` while the match continues.
#[must_use]
pub fn evaluate(players: &PlayerMap<PlayerState>) -> Option<GameResult> {
    let first_down = players[PlayerId::FIRST].is_defeated();
    let second_down = players[PlayerId::SECOND].is_defeated();

    match (first_down, second_down) {
        (true, true) => Some(GameResult::Draw),
        (true, false) => Some(GameResult::Winner(PlayerId::SECOND)),
        (false, true) => Some(GameResult::Winner(PlayerId::FIRST)),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RulesConfig;
    use crate::zones::Deck;

    fn players(first: i32, second: i32) -> PlayerMap<PlayerState> {
        let config = RulesConfig::default();
        let mut map = PlayerMap::new(|_| PlayerState::new(&config, Deck::default()));
        map[PlayerId::FIRST].health = first;
        map[PlayerId::SECOND].health = second;
        map
    }

    #[test]
    fn test_match_continues() {
        assert_eq!(evaluate(&players(1, 20)), None);
    }

    #[test]
    fn test_single_elimination() {
        assert_eq!(evaluate(&players(0, 5)), Some(GameResult::Winner(PlayerId::SECOND)));
        assert_eq!(evaluate(&players(5, -3)), Some(GameResult::Winner(PlayerId::FIRST)));
    }

    #[test]
    fn test_simultaneous_elimination_is_draw() {
        let result = evaluate(&players(-2, 0));
        assert_eq!(result, Some(GameResult::Draw));
        assert_eq!(result.and_then(|r| r.winner()), None);
    }

    #[test]
    fn test_is_winner() {
        let result = GameResult::Winner(PlayerId::SECOND);
        assert!(result.is_winner(PlayerId::SECOND));
        assert!(!result.is_winner(PlayerId::FIRST));
        assert!(!GameResult::Draw.is_winner(PlayerId::FIRST));
    }
}
