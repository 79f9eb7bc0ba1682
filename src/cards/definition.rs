//! Card definitions - static catalog data.
//!
//! A card's mechanics are fully determined by its `Subtype`. The `Element`
//! tag is decorative: it lives on `CardDefinition` for display, and nothing
//! that resolves combat, costs, or payouts ever receives a `CardDefinition`.
//! Rules code works on `Subtype`, `AttackKind` and `MinerKind` only.

use serde::{Deserialize, Serialize};

/// Unique identifier for a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Top-level card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Attack,
    Defense,
    Miner,
}

/// The two attack flavours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Mitigated by Walls, attenuated by Deflection.
    Continuous,
    /// Ignores Walls, fully blocked by Deflection.
    Projectile,
}

/// The four miner kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinerKind {
    /// Reactive: blocks incoming Projectiles while alive. No timed payout.
    Deflection,
    /// Periodically fires a free Projectile.
    Projectile,
    /// Periodically fires a free Continuous attack.
    Continuous,
    /// Periodically restores the owner's Wall to full.
    Repair,
}

impl MinerKind {
    /// All miner kinds, in catalog order.
    pub const ALL: [MinerKind; 4] = [
        MinerKind::Deflection,
        MinerKind::Projectile,
        MinerKind::Continuous,
        MinerKind::Repair,
    ];
}

/// Mechanical subtype. Cost and numeric effect derive from this alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subtype {
    Continuous,
    Projectile,
    Wall,
    Deflection,
    Miner(MinerKind),
}

impl Subtype {
    /// The card type this subtype belongs to.
    #[must_use]
    pub const fn card_type(self) -> CardType {
        match self {
            Subtype::Continuous | Subtype::Projectile => CardType::Attack,
            Subtype::Wall | Subtype::Deflection => CardType::Defense,
            Subtype::Miner(_) => CardType::Miner,
        }
    }

    /// Attack flavour, if this is an attack card.
    #[must_use]
    pub const fn attack_kind(self) -> Option<AttackKind> {
        match self {
            Subtype::Continuous => Some(AttackKind::Continuous),
            Subtype::Projectile => Some(AttackKind::Projectile),
            _ => None,
        }
    }

    /// Miner kind, if this is a miner card.
    #[must_use]
    pub const fn miner_kind(self) -> Option<MinerKind> {
        match self {
            Subtype::Miner(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Decorative element tag. Carries no mechanics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Frost,
    Storm,
    Stone,
    Void,
}

impl Element {
    /// All elements, in catalog order.
    pub const ALL: [Element; 5] = [
        Element::Fire,
        Element::Frost,
        Element::Storm,
        Element::Stone,
        Element::Void,
    ];
}

/// Static card definition.
///
/// ```
/// use duel_engine::cards::{CardDefinition, CardId, CardType, Element, Subtype};
///
/// let card = CardDefinition::new(CardId::new(1), "Ember Lance", Subtype::Continuous, Element::Fire);
/// assert_eq!(card.card_type(), CardType::Attack);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Mechanical subtype.
    pub subtype: Subtype,

    /// Cosmetic element.
    pub element: Element,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, subtype: Subtype, element: Element) -> Self {
        Self {
            id,
            name: name.into(),
            subtype,
            element,
        }
    }

    /// Card type, derived from the subtype.
    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.subtype.card_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_subtype_classification() {
        assert_eq!(Subtype::Continuous.card_type(), CardType::Attack);
        assert_eq!(Subtype::Projectile.card_type(), CardType::Attack);
        assert_eq!(Subtype::Wall.card_type(), CardType::Defense);
        assert_eq!(Subtype::Deflection.card_type(), CardType::Defense);
        for kind in MinerKind::ALL {
            assert_eq!(Subtype::Miner(kind).card_type(), CardType::Miner);
            assert_eq!(Subtype::Miner(kind).miner_kind(), Some(kind));
        }

        assert_eq!(Subtype::Projectile.attack_kind(), Some(AttackKind::Projectile));
        assert_eq!(Subtype::Wall.attack_kind(), None);
        assert_eq!(Subtype::Wall.miner_kind(), None);
    }

    #[test]
    fn test_card_definition_serialization() {
        let card = CardDefinition::new(
            CardId::new(9),
            "Tide Drill",
            Subtype::Miner(MinerKind::Repair),
            Element::Frost,
        );

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
