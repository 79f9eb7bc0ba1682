//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. A duel always has exactly two seats.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by a two-slot array for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::EngineError;

/// Number of seats in a duel.
pub const PLAYER_COUNT: usize = 2;

/// Seat identifier.
///
/// Seat indices are 0-based: the first player is seat 0. The field is
/// private and deserialization goes through `try_new`, so every `PlayerId`
/// in existence names a real seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The first seat.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The second seat.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Both seats in resolution order.
    pub const ALL: [PlayerId; PLAYER_COUNT] = [PlayerId::FIRST, PlayerId::SECOND];

    /// Create a player ID.
    ///
    /// Panics if `id` is not a valid seat.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < PLAYER_COUNT, "A duel has exactly two seats");
        Self(id)
    }

    /// Create a player ID from an untrusted index.
    #[must_use]
    pub const fn try_new(id: u8) -> Option<Self> {
        if (id as usize) < PLAYER_COUNT {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    ///
    /// ```
    /// use duel_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::FIRST.opponent(), PlayerId::SECOND);
    /// assert_eq!(PlayerId::SECOND.opponent(), PlayerId::FIRST);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = EngineError;

    fn try_from(seat: u8) -> Result<Self, Self::Error> {
        Self::try_new(seat).ok_or(EngineError::UnknownSeat { seat })
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> u8 {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use duel_engine::core::{PlayerId, PlayerMap};
///
/// let mut health: PlayerMap<i32> = PlayerMap::new(|_| 20);
/// health[PlayerId::SECOND] -= 3;
///
/// assert_eq!(health[PlayerId::FIRST], 20);
/// assert_eq!(health[PlayerId::SECOND], 17);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Like `new`, stopping at the first error.
    pub fn try_new<E>(mut factory: impl FnMut(PlayerId) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            data: [factory(PlayerId::FIRST)?, factory(PlayerId::SECOND)?],
        })
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Borrow a player's entry and the opponent's entry at once.
    pub fn split_mut(&mut self, player: PlayerId) -> (&mut T, &mut T) {
        let [first, second] = &mut self.data;
        if player == PlayerId::FIRST {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Transform every entry.
    pub fn map<U>(self, mut f: impl FnMut(PlayerId, T) -> U) -> PlayerMap<U> {
        let [first, second] = self.data;
        PlayerMap {
            data: [f(PlayerId::FIRST, first), f(PlayerId::SECOND, second)],
        }
    }

    /// Unwrap into `[first, second]`.
    pub fn into_array(self) -> [T; PLAYER_COUNT] {
        self.data
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::FIRST.index(), 0);
        assert_eq!(PlayerId::SECOND.index(), 1);
        assert_eq!(format!("{}", PlayerId::SECOND), "Player 1");
        assert_eq!(PlayerId::try_new(2), None);
        assert_eq!(PlayerId::try_new(1), Some(PlayerId::SECOND));
    }

    #[test]
    fn test_player_id_deserialize_checks_seat() {
        assert_eq!(serde_json::from_str::<PlayerId>("1").unwrap(), PlayerId::SECOND);
        assert!(serde_json::from_str::<PlayerId>("2").is_err());
        assert!(serde_json::from_str::<PlayerId>("9").is_err());
        assert_eq!(serde_json::to_string(&PlayerId::SECOND).unwrap(), "1");

        assert_eq!(PlayerId::try_from(0), Ok(PlayerId::FIRST));
        assert_eq!(PlayerId::try_from(7), Err(EngineError::UnknownSeat { seat: 7 }));
    }

    #[test]
    #[should_panic(expected = "exactly two seats")]
    fn test_player_id_out_of_range() {
        let _ = PlayerId::new(2);
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::FIRST], 0);
        assert_eq!(map[PlayerId::SECOND], 10);
    }

    #[test]
    fn test_player_map_split_mut() {
        let mut map: PlayerMap<i32> = PlayerMap::with_value(0);

        let (me, them) = map.split_mut(PlayerId::SECOND);
        *me = 1;
        *them = 2;

        assert_eq!(map[PlayerId::SECOND], 1);
        assert_eq!(map[PlayerId::FIRST], 2);
    }

    #[test]
    fn test_player_map_iter_and_map() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 + 1);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::FIRST, &1), (PlayerId::SECOND, &2)]);

        let doubled = map.map(|_, v| v * 2);
        assert_eq!(doubled[PlayerId::SECOND], 4);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
