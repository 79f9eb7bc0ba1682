//! The draft engine.
//!
//! All six rounds are dealt when the draft starts, so a catalog that cannot
//! fill a round fails immediately instead of halfway through. Rounds are
//! played strictly in order; each needs exactly one pick, made either by the
//! player or by the engine when the round's countdown runs out.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, error, info, warn};

use super::round::{DraftCategory, DraftOption, DraftPick, DraftRound};
use crate::cards::{CardDefinition, CardId, CardRegistry, MinerKind, Subtype};
use crate::core::{CatalogError, Countdown, DraftPickError, EngineError, GameRng, PlayerId, RulesConfig};

/// Read-only view of a draft, for UIs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftState {
    pub owner: PlayerId,
    /// 1-based number of the open round, `None` once complete.
    pub round: Option<usize>,
    pub category: Option<DraftCategory>,
    pub options: Vec<CardId>,
    pub remaining_time: u32,
    pub picks: Vec<DraftPick>,
    pub complete: bool,
}

/// One player's draft.
#[derive(Clone, Debug)]
pub struct DraftEngine {
    owner: PlayerId,
    rounds: Vec<DraftRound>,
    /// Index of the open round; equals `rounds.len()` when complete.
    current: usize,
    rng: GameRng,
}

impl DraftEngine {
    /// Deal every round and open round 1.
    pub fn start(
        owner: PlayerId,
        registry: &CardRegistry,
        config: &RulesConfig,
        mut rng: GameRng,
    ) -> Result<Self, EngineError> {
        let mut rounds = Vec::with_capacity(DraftCategory::ORDER.len());
        for (i, &category) in DraftCategory::ORDER.iter().enumerate() {
            let number = i + 1;
            let options = deal_options(category, registry, config.options_per_round, &mut rng)
                .inspect_err(|err| error!(%owner, round = number, %err, "catalog cannot fill draft round"))?;
            rounds.push(DraftRound {
                number,
                category,
                options,
                countdown: Countdown::new(config.draft_timer(number)),
                pick: None,
            });
        }

        info!(%owner, "draft started");
        Ok(Self {
            owner,
            rounds,
            current: 0,
            rng,
        })
    }

    /// The player this draft belongs to.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// The open round, if any.
    #[must_use]
    pub fn current_round(&self) -> Option<&DraftRound> {
        self.rounds.get(self.current)
    }

    /// Every round, settled or not.
    #[must_use]
    pub fn rounds(&self) -> &[DraftRound] {
        &self.rounds
    }

    /// Whether all rounds have a pick.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.rounds.len()
    }

    /// Picks made so far, in round order.
    #[must_use]
    pub fn picks(&self) -> Vec<DraftPick> {
        self.rounds.iter().filter_map(|r| r.pick).collect()
    }

    /// Submit a pick for the open round.
    ///
    /// A rejected pick leaves the round open with its countdown untouched.
    pub fn submit_pick(&mut self, round: usize, card: CardId) -> Result<DraftPick, DraftPickError> {
        let owner = self.owner;
        let Some(open) = self.rounds.get(self.current) else {
            return Err(DraftPickError::DraftComplete);
        };
        if round != open.number {
            return Err(DraftPickError::WrongRound {
                expected: open.number,
                got: round,
            });
        }
        let Some(option) = open.option(card).copied() else {
            return Err(DraftPickError::NotOffered { card, round });
        };
        if !open.category.admits(option.subtype) {
            return Err(DraftPickError::WrongCategory {
                card,
                category: open.category,
            });
        }

        debug!(%owner, round, %card, "draft pick");
        Ok(self.settle(option, false))
    }

    /// Advance the open round's countdown. Units past the deadline do not
    /// carry into the next round.
    ///
    /// Returns the auto-pick if the countdown ran out.
    pub fn tick(&mut self, units: u32) -> Option<DraftPick> {
        let round = self.rounds.get_mut(self.current)?;
        if round.countdown.tick(units) {
            self.auto_pick()
        } else {
            None
        }
    }

    /// Expire the open round now and auto-pick.
    pub fn expire_round(&mut self) -> Option<DraftPick> {
        let round = self.rounds.get_mut(self.current)?;
        round.countdown.expire();
        self.auto_pick()
    }

    fn auto_pick(&mut self) -> Option<DraftPick> {
        let round = self.rounds.get(self.current)?;
        if round.options.is_empty() {
            return None;
        }
        let option = round.options[self.rng.gen_index(round.options.len())];
        warn!(owner = %self.owner, round = round.number, card = %option.card, "draft timer expired; auto-selected");
        Some(self.settle(option, true))
    }

    fn settle(&mut self, option: DraftOption, auto_selected: bool) -> DraftPick {
        let round = &mut self.rounds[self.current];
        let pick = DraftPick {
            round: round.number,
            card: option.card,
            subtype: option.subtype,
            auto_selected,
        };
        round.pick = Some(pick);
        self.current += 1;
        if self.is_complete() {
            info!(owner = %self.owner, "draft complete");
        }
        pick
    }

    /// Snapshot for display.
    #[must_use]
    pub fn state(&self) -> DraftState {
        let open = self.current_round();
        DraftState {
            owner: self.owner,
            round: open.map(|r| r.number),
            category: open.map(|r| r.category),
            options: open.map(DraftRound::option_ids).unwrap_or_default(),
            remaining_time: open.map_or(0, |r| r.countdown.remaining()),
            picks: self.picks(),
            complete: self.is_complete(),
        }
    }

    /// The drafted deck, in pick order.
    ///
    /// Fails if the draft is still running or the deck misses a required
    /// category; the latter means the catalog is mis-authored.
    pub fn finish(&self) -> Result<Vec<CardId>, EngineError> {
        if !self.is_complete() {
            return Err(EngineError::DraftIncomplete { player: self.owner });
        }
        let picks = self.picks();
        let subtypes: Vec<Subtype> = picks.iter().map(|p| p.subtype).collect();
        validate_deck(&subtypes).inspect_err(|err| error!(owner = %self.owner, %err, "drafted deck is invalid"))?;
        Ok(picks.iter().map(|p| p.card).collect())
    }
}

/// Check a deck covers every required category.
pub fn validate_deck(subtypes: &[Subtype]) -> Result<(), EngineError> {
    let missing: Vec<DraftCategory> = DraftCategory::REQUIRED
        .iter()
        .copied()
        .filter(|category| !subtypes.iter().any(|&s| category.admits(s)))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::DeckComposition { missing })
    }
}

fn deal_options(
    category: DraftCategory,
    registry: &CardRegistry,
    count: usize,
    rng: &mut GameRng,
) -> Result<SmallVec<[DraftOption; 4]>, CatalogError> {
    let mut chosen: Vec<&CardDefinition> = if category == DraftCategory::Miner {
        // One random card per kind, then a random subset of kinds.
        let mut per_kind = Vec::new();
        for kind in MinerKind::ALL {
            let pool: Vec<&CardDefinition> = registry.find(|c| c.subtype == Subtype::Miner(kind)).collect();
            if let Some(&card) = rng.choose(&pool) {
                per_kind.push(card);
            }
        }
        per_kind
    } else {
        registry.find(|c| category.admits(c.subtype)).collect()
    };

    if chosen.len() < count {
        return Err(CatalogError::Shortfall {
            category,
            needed: count,
            found: chosen.len(),
        });
    }
    rng.shuffle(&mut chosen);

    Ok(chosen
        .into_iter()
        .take(count)
        .map(|c| DraftOption {
            card: c.id,
            subtype: c.subtype,
        })
        .collect())
}
