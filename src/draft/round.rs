//! Draft rounds and categories.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardId, Subtype};
use crate::core::Countdown;

/// The fixed category of a draft round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftCategory {
    Wall,
    Deflection,
    ContinuousAttack,
    ProjectileAttack,
    /// Options are one card of each distinct miner kind.
    Miner,
    /// Options are drawn from the whole catalog.
    Wildcard,
}

impl DraftCategory {
    /// Round order: round `n` (1-based) uses `ORDER[n - 1]`.
    pub const ORDER: [DraftCategory; 6] = [
        DraftCategory::Wall,
        DraftCategory::Deflection,
        DraftCategory::ContinuousAttack,
        DraftCategory::ProjectileAttack,
        DraftCategory::Miner,
        DraftCategory::Wildcard,
    ];

    /// Categories every finished deck must contain at least once.
    pub const REQUIRED: [DraftCategory; 5] = [
        DraftCategory::Wall,
        DraftCategory::Deflection,
        DraftCategory::ContinuousAttack,
        DraftCategory::ProjectileAttack,
        DraftCategory::Miner,
    ];

    /// Category of a 1-based round number.
    #[must_use]
    pub fn for_round(round: usize) -> Option<Self> {
        round.checked_sub(1).and_then(|i| Self::ORDER.get(i).copied())
    }

    /// Whether a card of `subtype` belongs to this category.
    #[must_use]
    pub fn admits(self, subtype: Subtype) -> bool {
        match self {
            DraftCategory::Wall => subtype == Subtype::Wall,
            DraftCategory::Deflection => subtype == Subtype::Deflection,
            DraftCategory::ContinuousAttack => subtype == Subtype::Continuous,
            DraftCategory::ProjectileAttack => subtype == Subtype::Projectile,
            DraftCategory::Miner => matches!(subtype, Subtype::Miner(_)),
            DraftCategory::Wildcard => true,
        }
    }
}

/// One card offered in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOption {
    pub card: CardId,
    pub subtype: Subtype,
}

/// A settled pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    /// 1-based round number.
    pub round: usize,
    pub card: CardId,
    pub subtype: Subtype,
    /// True when the timer ran out and the engine chose.
    pub auto_selected: bool,
}

/// A single draft round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRound {
    /// 1-based round number.
    pub number: usize,
    pub category: DraftCategory,
    pub options: SmallVec<[DraftOption; 4]>,
    pub countdown: Countdown,
    pub pick: Option<DraftPick>,
}

impl DraftRound {
    /// Look up an offered card.
    #[must_use]
    pub fn option(&self, card: CardId) -> Option<&DraftOption> {
        self.options.iter().find(|o| o.card == card)
    }

    /// Offered card IDs in display order.
    #[must_use]
    pub fn option_ids(&self) -> Vec<CardId> {
        self.options.iter().map(|o| o.card).collect()
    }
}
