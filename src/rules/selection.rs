//! Selection resolution.
//!
//! Every path that turns "what a player asked to play" into "what the
//! player actually plays" goes through `resolve_selection`: Selection uses it
//! for timeouts and bad picks, Validation uses it for the re-check, and
//! Deduction/Placement only read the tagged `SelectionOutcome` it returns.
//!
//! ## Fallback order
//!
//! 1. The requested card, if it is in hand, affordable and placeable.
//! 2. A uniformly random affordable, placeable card from hand.
//! 3. The cheapest card in hand (earliest on ties), played as a waste.
//! 4. Empty hand: fatal.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::board::PlayerState;
use crate::cards::{CardId, CardRegistry, Subtype};
use crate::core::{EngineError, GameRng, PlayerId, RulesConfig};

/// Why a requested card could not be played as asked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionFault {
    /// Nothing was committed before the deadline.
    TimedOut,
    /// The committed card is not in the player's hand.
    NotInHand,
    /// The card costs more energy than the player has.
    Unaffordable,
    /// A Wall or Miner was chosen while that slot is occupied.
    SlotOccupied,
}

/// How a selection was settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    /// The requested card is played as asked.
    Accepted,
    /// Another card from hand is played in its place.
    Substituted(SelectionFault),
    /// The card is consumed without effect.
    Wasted(SelectionFault),
}

/// A settled selection, ready for Deduction and Placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSelection {
    pub player: PlayerId,
    /// What the player committed, if anything.
    pub requested: Option<CardId>,
    /// What is actually played.
    pub card: CardId,
    pub subtype: Subtype,
    pub outcome: SelectionOutcome,
}

impl ResolvedSelection {
    /// Whether the card is consumed without effect.
    #[must_use]
    pub fn is_wasted(&self) -> bool {
        matches!(self.outcome, SelectionOutcome::Wasted(_))
    }

    /// Whether the engine chose the card rather than the player.
    #[must_use]
    pub fn is_auto_selected(&self) -> bool {
        self.requested != Some(self.card)
    }

    /// Whether Deduction charges energy. An unaffordable waste cannot be
    /// paid for, so it costs nothing.
    #[must_use]
    pub fn spends_energy(&self) -> bool {
        self.outcome != SelectionOutcome::Wasted(SelectionFault::Unaffordable)
    }
}

/// Check whether a card of `subtype` can be paid for and placed.
pub fn check_play(
    player: &PlayerState,
    subtype: Subtype,
    config: &RulesConfig,
) -> Result<(), SelectionFault> {
    if !player.can_afford(config.cost(subtype)) {
        return Err(SelectionFault::Unaffordable);
    }
    let occupied = match subtype {
        Subtype::Wall => player.wall.is_some(),
        Subtype::Miner(_) => player.miner.is_some(),
        _ => false,
    };
    if occupied {
        return Err(SelectionFault::SlotOccupied);
    }
    Ok(())
}

/// Cards in hand that can be played as-is, in hand order. One entry per
/// hand slot, so a card held twice is listed twice.
pub fn legal_cards(
    player: &PlayerState,
    registry: &CardRegistry,
    config: &RulesConfig,
) -> Result<Vec<CardId>, EngineError> {
    let mut legal = Vec::new();
    for &card in player.hand.cards() {
        if check_play(player, subtype_of(registry, card)?, config).is_ok() {
            legal.push(card);
        }
    }
    Ok(legal)
}

/// Settle a player's selection.
///
/// A faulty or missing pick is replaced by a uniform draw over the legal
/// hand slots from [`legal_cards`]. Duplicate copies each hold a slot, so a
/// card held twice is twice as likely as one held once. With no legal slot
/// the cheapest card in hand is played as a waste.
pub fn resolve_selection(
    player_id: PlayerId,
    player: &PlayerState,
    requested: Option<CardId>,
    registry: &CardRegistry,
    config: &RulesConfig,
    rng: &mut GameRng,
) -> Result<ResolvedSelection, EngineError> {
    if player.hand.is_empty() {
        return Err(EngineError::EmptyHand { player: player_id });
    }

    let fault = match requested {
        None => SelectionFault::TimedOut,
        Some(card) if !player.hand.contains(card) => SelectionFault::NotInHand,
        Some(card) => {
            let subtype = subtype_of(registry, card)?;
            match check_play(player, subtype, config) {
                Ok(()) => {
                    return Ok(ResolvedSelection {
                        player: player_id,
                        requested,
                        card,
                        subtype,
                        outcome: SelectionOutcome::Accepted,
                    });
                }
                Err(fault) => fault,
            }
        }
    };

    let candidates = legal_cards(player, registry, config)?;
    if let Some(&card) = rng.choose(&candidates) {
        trace!(%player_id, %card, options = candidates.len(), "fallback picked a legal card");
        warn!(%player_id, ?requested, %card, ?fault, "selection substituted");
        return Ok(ResolvedSelection {
            player: player_id,
            requested,
            card,
            subtype: subtype_of(registry, card)?,
            outcome: SelectionOutcome::Substituted(fault),
        });
    }

    let mut cheapest: Option<(CardId, Subtype)> = None;
    for &card in player.hand.cards() {
        let subtype = subtype_of(registry, card)?;
        let cheaper = cheapest.map_or(true, |(_, best)| config.cost(subtype) < config.cost(best));
        if cheaper {
            cheapest = Some((card, subtype));
        }
    }
    let Some((card, subtype)) = cheapest else {
        return Err(EngineError::EmptyHand { player: player_id });
    };
    let waste = check_play(player, subtype, config).err().unwrap_or(fault);
    warn!(%player_id, ?requested, %card, ?waste, "no legal card in hand; play is wasted");

    Ok(ResolvedSelection {
        player: player_id,
        requested,
        card,
        subtype,
        outcome: SelectionOutcome::Wasted(waste),
    })
}

fn subtype_of(registry: &CardRegistry, card: CardId) -> Result<Subtype, EngineError> {
    registry.subtype(card).ok_or(EngineError::UnknownCard(card))
}
