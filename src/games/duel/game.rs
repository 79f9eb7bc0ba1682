//! The duel facade.

use im::Vector;
use tracing::{error, info};

use crate::board::PlayerState;
use crate::cards::{CardId, CardRegistry, Subtype};
use crate::core::{EngineError, GameRng, GameSnapshot, GameState, PlayerId, PlayerMap, RulesConfig};
use crate::draft::{validate_deck, DraftEngine, DraftPick, DraftState};
use crate::rules::{legal_cards, GameResult};
use crate::turn::{SelectionBarrier, TurnEngine, TurnLog, TurnReport};
use crate::zones::Deck;

/// Builder for creating a DuelGame.
#[derive(Clone, Debug, Default)]
pub struct DuelGameBuilder {
    seed: u64,
    config: RulesConfig,
    registry: Option<CardRegistry>,
}

impl DuelGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed for every random decision in drafts and the match.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Card catalog. Defaults to `CardRegistry::standard()`.
    pub fn registry(mut self, registry: CardRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Validate the config and build the game.
    pub fn build(self) -> Result<DuelGame, EngineError> {
        self.config.validate()?;
        Ok(DuelGame {
            seed: self.seed,
            config: self.config,
            registry: self.registry.unwrap_or_else(CardRegistry::standard),
            drafts: PlayerMap::default(),
            session: None,
        })
    }
}

/// A running match and its open Selection window.
#[derive(Clone, Debug)]
struct Session {
    state: GameState,
    barrier: SelectionBarrier,
    /// Events of the open turn's Energy phase.
    pending: TurnLog,
    aborted: bool,
}

/// One duel: both players' drafts and the match they lead to.
///
/// All mutation goes through these operations. Collaborators read the
/// match through `get_game_state`, which hands out a snapshot.
#[derive(Clone, Debug)]
pub struct DuelGame {
    seed: u64,
    config: RulesConfig,
    registry: CardRegistry,
    drafts: PlayerMap<Option<DraftEngine>>,
    session: Option<Session>,
}

impl DuelGame {
    /// A game with default rules, the standard catalog and the given seed.
    pub fn new(seed: u64) -> Result<Self, EngineError> {
        DuelGameBuilder::new().seed(seed).build()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    // === Draft ===

    /// Start (or restart) `player`'s draft.
    pub fn start_draft(&mut self, player: PlayerId) -> Result<DraftState, EngineError> {
        let rng = GameRng::new(self.seed).for_context(&format!("draft/{}", player.index()));
        let draft = DraftEngine::start(player, &self.registry, &self.config, rng)?;
        let state = draft.state();
        self.drafts[player] = Some(draft);
        Ok(state)
    }

    /// Pick a card in `player`'s open draft round.
    pub fn submit_draft_pick(
        &mut self,
        player: PlayerId,
        round: usize,
        card: CardId,
    ) -> Result<DraftPick, EngineError> {
        Ok(self.draft_mut(player)?.submit_pick(round, card)?)
    }

    pub fn get_draft_state(&self, player: PlayerId) -> Result<DraftState, EngineError> {
        self.drafts[player]
            .as_ref()
            .map(DraftEngine::state)
            .ok_or(EngineError::NoDraft { player })
    }

    /// Advance `player`'s draft clock. Returns the auto-pick on expiry.
    pub fn draft_tick(&mut self, player: PlayerId, units: u32) -> Result<Option<DraftPick>, EngineError> {
        Ok(self.draft_mut(player)?.tick(units))
    }

    /// Expire `player`'s open draft round now.
    pub fn expire_draft_round(&mut self, player: PlayerId) -> Result<Option<DraftPick>, EngineError> {
        Ok(self.draft_mut(player)?.expire_round())
    }

    fn draft_mut(&mut self, player: PlayerId) -> Result<&mut DraftEngine, EngineError> {
        self.drafts[player].as_mut().ok_or(EngineError::NoDraft { player })
    }

    // === Match ===

    /// Start a match from two decks. Each deck is shuffled, four cards are
    /// drawn, and turn 1 opens at Selection.
    pub fn start_match(&mut self, deck_a: Vec<CardId>, deck_b: Vec<CardId>) -> Result<GameSnapshot, EngineError> {
        let decks = [deck_a, deck_b];
        let mut rng = GameRng::new(self.seed).for_context("match");
        let players = PlayerMap::try_new(|id| self.prepare_player(id, &decks[id.index()], &mut rng))?;

        let mut state = GameState::new(players, rng);
        let pending = TurnEngine::new(&self.registry, &self.config).begin_turn(&mut state);
        info!(seed = self.seed, "match started");

        let snapshot = state.snapshot();
        self.session = Some(Session {
            state,
            barrier: SelectionBarrier::new(self.config.selection_timeout),
            pending,
            aborted: false,
        });
        Ok(snapshot)
    }

    /// Start a match from both players' completed drafts.
    pub fn start_match_from_drafts(&mut self) -> Result<GameSnapshot, EngineError> {
        let decks = PlayerMap::try_new(|id| {
            self.drafts[id]
                .as_ref()
                .ok_or(EngineError::NoDraft { player: id })?
                .finish()
        })?;
        let [deck_a, deck_b] = decks.into_array();
        self.start_match(deck_a, deck_b)
    }

    fn prepare_player(&self, id: PlayerId, cards: &[CardId], rng: &mut GameRng) -> Result<PlayerState, EngineError> {
        if cards.len() != self.config.deck_size {
            return Err(EngineError::DeckSize {
                player: id,
                expected: self.config.deck_size,
                found: cards.len(),
            });
        }
        let subtypes = cards
            .iter()
            .map(|&card| self.registry.subtype(card).ok_or(EngineError::UnknownCard(card)))
            .collect::<Result<Vec<Subtype>, _>>()?;
        validate_deck(&subtypes).inspect_err(|err| error!(player = %id, %err, "deck fails composition check"))?;

        let mut deck = Deck::new(cards.to_vec());
        deck.shuffle(rng);
        let mut player = PlayerState::new(&self.config, deck);
        player.hand.refill(&mut player.deck, self.config.hand_size);
        Ok(player)
    }

    /// Commit `player`'s card for this turn. The turn resolves as soon as
    /// both players have committed; its report is returned then.
    pub fn submit_selection(&mut self, player: PlayerId, card: CardId) -> Result<Option<TurnReport>, EngineError> {
        let session = self.live_session_mut()?;
        if session.barrier.commit(player, card)? {
            self.resolve_open_turn().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Advance the Selection clock. If the deadline passes, the turn
    /// resolves with the fallback for whoever has not committed.
    pub fn advance_clock(&mut self, units: u32) -> Result<Option<TurnReport>, EngineError> {
        let session = self.live_session_mut()?;
        session.barrier.tick(units);
        if session.barrier.is_ready() {
            self.resolve_open_turn().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Expire the Selection window now and resolve the turn.
    pub fn force_timeout(&mut self) -> Result<TurnReport, EngineError> {
        self.live_session_mut()?.barrier.force();
        self.resolve_open_turn()
    }

    /// Resolve the turn from commits gathered elsewhere, for example by
    /// `RemoteSelections::join`. Missing commits get the fallback.
    ///
    /// Every joined commit is checked before any is written, so a rejected
    /// call leaves the Selection window as it was.
    pub fn submit_joined(&mut self, commits: PlayerMap<Option<CardId>>) -> Result<TurnReport, EngineError> {
        let session = self.live_session_mut()?;
        for (player, card) in commits.iter() {
            if card.is_some() {
                session.barrier.check_commit(player)?;
            }
        }
        for (player, card) in commits.iter() {
            if let Some(&card) = card.as_ref() {
                session.barrier.commit(player, card)?;
            }
        }
        session.barrier.force();
        self.resolve_open_turn()
    }

    fn live_session_mut(&mut self) -> Result<&mut Session, EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NoMatch)?;
        if session.aborted {
            return Err(EngineError::MatchAborted);
        }
        if session.state.is_over() {
            return Err(EngineError::MatchOver);
        }
        Ok(session)
    }

    fn resolve_open_turn(&mut self) -> Result<TurnReport, EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NoMatch)?;
        let timeout = self.config.selection_timeout;
        let commits = std::mem::replace(&mut session.barrier, SelectionBarrier::new(timeout)).close();
        let log = std::mem::replace(&mut session.pending, TurnLog::new(session.state.turn));

        let engine = TurnEngine::new(&self.registry, &self.config);
        match engine.resolve_turn(&mut session.state, log, commits) {
            Ok(report) => {
                if !session.state.is_over() {
                    session.pending = engine.begin_turn(&mut session.state);
                }
                Ok(report)
            }
            Err(err) => {
                if err.is_fatal() {
                    error!(state = ?session.state, %err, "fatal error; match aborted");
                    session.aborted = true;
                }
                Err(err)
            }
        }
    }

    // === Queries ===

    /// Report of the most recently resolved turn.
    pub fn get_revealed_turn_result(&self) -> Option<&TurnReport> {
        self.session.as_ref().and_then(|s| s.state.last_report())
    }

    /// Read-only snapshot of the match.
    pub fn get_game_state(&self) -> Result<GameSnapshot, EngineError> {
        self.session
            .as_ref()
            .map(|s| s.state.snapshot())
            .ok_or(EngineError::NoMatch)
    }

    /// The result, once the match is over.
    pub fn get_victory_result(&self) -> Option<GameResult> {
        self.session.as_ref().and_then(|s| s.state.result)
    }

    /// Every resolved turn, oldest first.
    pub fn history(&self) -> Vector<TurnReport> {
        self.session
            .as_ref()
            .map(|s| s.state.history.clone())
            .unwrap_or_default()
    }

    /// Cards `player` could play as-is this turn, in hand order.
    pub fn legal_selections(&self, player: PlayerId) -> Result<Vec<CardId>, EngineError> {
        let session = self.session.as_ref().ok_or(EngineError::NoMatch)?;
        legal_cards(&session.state.players[player], &self.registry, &self.config)
    }

    /// Whether `player` has committed this turn. Never reveals the card.
    pub fn has_committed(&self, player: PlayerId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.barrier.has_committed(player))
    }

    /// Units left in the Selection window.
    pub fn selection_time_left(&self) -> Option<u32> {
        self.session
            .as_ref()
            .filter(|s| !s.aborted && !s.state.is_over())
            .map(|s| s.barrier.remaining())
    }

    /// Whether a fatal error ended the match.
    pub fn is_aborted(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.aborted)
    }
}
