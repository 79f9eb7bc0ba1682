//! Walls: decaying barriers that soak Continuous damage.

use serde::{Deserialize, Serialize};

/// Whether a wall survived a hit or decay tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub enum WallStatus {
    Standing,
    Destroyed,
}

/// An active wall.
///
/// `0 < current_hp <= max_hp` holds for every wall that exists; the owner
/// drops the wall as soon as an operation reports `Destroyed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    current_hp: i32,
    max_hp: i32,
    turn_placed: u32,
}

impl Wall {
    /// A fresh wall at full HP.
    #[must_use]
    pub fn new(max_hp: i32, turn_placed: u32) -> Self {
        Self {
            current_hp: max_hp,
            max_hp,
            turn_placed,
        }
    }

    /// A wall at a specific HP, clamped to `1..=max_hp`.
    #[must_use]
    pub fn with_hp(current_hp: i32, max_hp: i32, turn_placed: u32) -> Self {
        Self {
            current_hp: current_hp.clamp(1, max_hp.max(1)),
            max_hp,
            turn_placed,
        }
    }

    #[must_use]
    pub fn current_hp(&self) -> i32 {
        self.current_hp
    }

    #[must_use]
    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    #[must_use]
    pub fn turn_placed(&self) -> u32 {
        self.turn_placed
    }

    /// Remove `amount` HP.
    pub fn wear(&mut self, amount: i32) -> WallStatus {
        self.current_hp -= amount.max(0);
        if self.current_hp <= 0 {
            self.current_hp = 0;
            WallStatus::Destroyed
        } else {
            WallStatus::Standing
        }
    }

    /// Restore to full. Returns the HP restored.
    pub fn repair(&mut self) -> i32 {
        let restored = self.max_hp - self.current_hp;
        self.current_hp = self.max_hp;
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_lifespan() {
        let mut wall = Wall::new(12, 1);

        assert_eq!(wall.wear(4), WallStatus::Standing);
        assert_eq!(wall.current_hp(), 8);
        assert_eq!(wall.wear(4), WallStatus::Standing);
        assert_eq!(wall.current_hp(), 4);
        assert_eq!(wall.wear(4), WallStatus::Destroyed);
    }

    #[test]
    fn test_overkill_floors_at_zero() {
        let mut wall = Wall::with_hp(3, 12, 2);
        assert_eq!(wall.wear(8), WallStatus::Destroyed);
        assert_eq!(wall.current_hp(), 0);
    }

    #[test]
    fn test_repair() {
        let mut wall = Wall::with_hp(5, 12, 1);
        assert_eq!(wall.repair(), 7);
        assert_eq!(wall.current_hp(), 12);
        assert_eq!(wall.repair(), 0);
    }

    #[test]
    fn test_with_hp_clamps() {
        assert_eq!(Wall::with_hp(40, 12, 1).current_hp(), 12);
        assert_eq!(Wall::with_hp(-3, 12, 1).current_hp(), 1);
    }
}
