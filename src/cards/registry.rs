//! Card catalog.
//!
//! The `CardRegistry` stores every card definition for the process
//! lifetime. It is built once and then shared read-only. Iteration follows
//! registration order so anything sampled from it is reproducible.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, Element, MinerKind, Subtype};
use crate::core::{CatalogError, RulesConfig};

/// The numbers a card carries under a ruleset. Derived from the subtype
/// alone; `None` fields do not apply to the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStats {
    pub cost: u32,
    /// Base power of an attack card.
    pub power: Option<i32>,
    /// HP of the wall a Wall card places.
    pub wall_hp: Option<i32>,
    /// Amount a Deflection card takes off a Continuous attack.
    pub reduction: Option<i32>,
    /// Turns between payouts of a timed miner.
    pub payout_interval: Option<u32>,
}

impl CardStats {
    #[must_use]
    pub fn of(subtype: Subtype, config: &RulesConfig) -> Self {
        Self {
            cost: config.cost(subtype),
            power: subtype.attack_kind().map(|kind| config.attack_power(kind)),
            wall_hp: (subtype == Subtype::Wall).then_some(config.wall_max_hp),
            reduction: (subtype == Subtype::Deflection).then_some(config.deflection_reduction),
            payout_interval: subtype
                .miner_kind()
                .map(|kind| config.payout_interval(kind))
                .filter(|&interval| interval > 0),
        }
    }
}

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::{CardDefinition, CardId, CardRegistry, Element, Subtype};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardDefinition::new(CardId::new(1), "Granite Bulwark", Subtype::Wall, Element::Stone))
///     .unwrap();
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().subtype, Subtype::Wall);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    order: Vec<CardId>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard catalog.
    ///
    /// Attack and defense subtypes come in all five elements; each miner
    /// kind comes in two. IDs are assigned from 1 in that order.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        let mut next_id = 1u32;

        let mut add = |registry: &mut Self, subtype: Subtype, element: Element| {
            let id = CardId::new(next_id);
            next_id += 1;
            registry.insert(CardDefinition::new(id, display_name(subtype, element), subtype, element));
        };

        for subtype in [Subtype::Wall, Subtype::Deflection, Subtype::Continuous, Subtype::Projectile] {
            for element in Element::ALL {
                add(&mut registry, subtype, element);
            }
        }
        for kind in MinerKind::ALL {
            for element in [Element::Fire, Element::Stone] {
                add(&mut registry, Subtype::Miner(kind), element);
            }
        }

        registry
    }

    /// Build a registry from a list of definitions.
    pub fn from_definitions(
        cards: impl IntoIterator<Item = CardDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut registry = Self::new();
        for card in cards {
            registry.register(card)?;
        }
        Ok(registry)
    }

    /// Register a card definition.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), CatalogError> {
        if self.cards.contains_key(&card.id) {
            return Err(CatalogError::DuplicateId(card.id));
        }
        self.insert(card);
        Ok(())
    }

    fn insert(&mut self, card: CardDefinition) {
        self.order.push(card.id);
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Get a card's subtype.
    #[must_use]
    pub fn subtype(&self, id: CardId) -> Option<Subtype> {
        self.get(id).map(|card| card.subtype)
    }

    /// Energy cost of a card under `config`.
    #[must_use]
    pub fn cost(&self, id: CardId, config: &RulesConfig) -> Option<u32> {
        self.subtype(id).map(|subtype| config.cost(subtype))
    }

    /// Cost and effect numbers of a card under `config`, for display.
    #[must_use]
    pub fn stats(&self, id: CardId, config: &RulesConfig) -> Option<CardStats> {
        self.subtype(id).map(|subtype| CardStats::of(subtype, config))
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over all definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    /// Find cards matching a predicate, in registration order.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.iter().filter(move |c| predicate(c))
    }
}

fn display_name(subtype: Subtype, element: Element) -> String {
    let prefix = match element {
        Element::Fire => "Ember",
        Element::Frost => "Rime",
        Element::Storm => "Gale",
        Element::Stone => "Granite",
        Element::Void => "Hollow",
    };
    let noun = match subtype {
        Subtype::Continuous => "Beam",
        Subtype::Projectile => "Bolt",
        Subtype::Wall => "Bulwark",
        Subtype::Deflection => "Ward",
        Subtype::Miner(MinerKind::Deflection) => "Warding Rig",
        Subtype::Miner(MinerKind::Projectile) => "Bolt Rig",
        Subtype::Miner(MinerKind::Continuous) => "Beam Rig",
        Subtype::Miner(MinerKind::Repair) => "Mending Rig",
    };
    format!("{prefix} {noun}")
}
