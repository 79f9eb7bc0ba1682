//! The turn state machine.
//!
//! A turn is split in two around the Selection barrier:
//!
//! - `begin_turn` runs Energy and opens Selection.
//! - `resolve_turn` takes both commits and runs Selection through Advance
//!   (or through VictoryCheck, if the match ends).
//!
//! Every phase is an ordinary function over `&mut GameState`; nothing runs
//! concurrently once the commits are in.

use tracing::{debug, info, warn};

use super::phase::Phase;
use super::report::{AttackSource, TurnEvent, TurnLog, TurnReport};
use crate::board::{Miner, MinerPayout, Wall};
use crate::cards::{CardId, CardRegistry, MinerKind, Subtype};
use crate::core::{EngineError, GameState, PlayerId, PlayerMap, RulesConfig};
use crate::rules::{
    check_play, evaluate, resolve_selection, strike, Attack, ResolvedSelection, SelectionFault,
    SelectionOutcome,
};

/// Runs turns against a fixed catalog and ruleset.
#[derive(Clone, Copy, Debug)]
pub struct TurnEngine<'a> {
    registry: &'a CardRegistry,
    config: &'a RulesConfig,
}

impl<'a> TurnEngine<'a> {
    #[must_use]
    pub fn new(registry: &'a CardRegistry, config: &'a RulesConfig) -> Self {
        Self { registry, config }
    }

    /// Run the Energy phase and open Selection.
    pub fn begin_turn(&self, state: &mut GameState) -> TurnLog {
        let mut log = TurnLog::new(state.turn);

        enter(state, &mut log, Phase::Energy);
        for (player, p) in state.players.iter_mut() {
            let amount = p.gain_energy(self.config.energy_regen, self.config.max_energy);
            log.push(TurnEvent::EnergyGained {
                player,
                amount,
                energy: p.energy,
            });
        }

        enter(state, &mut log, Phase::Selection);
        log
    }

    /// Resolve the open turn from both players' commits.
    ///
    /// A `None` commit means the player did not commit before the deadline.
    /// The report is also appended to the state's history.
    pub fn resolve_turn(
        &self,
        state: &mut GameState,
        mut log: TurnLog,
        commits: PlayerMap<Option<CardId>>,
    ) -> Result<TurnReport, EngineError> {
        if state.is_over() {
            return Err(EngineError::MatchOver);
        }

        let selected = self.select(state, &commits)?;

        enter(state, &mut log, Phase::Reveal);
        for (player, s) in selected.iter() {
            log.push(TurnEvent::Revealed { player, card: s.card });
        }

        enter(state, &mut log, Phase::Validation);
        let selections = self.validate(state, &mut log, &selected)?;

        enter(state, &mut log, Phase::Deduction);
        self.deduct(state, &mut log, &selections);

        enter(state, &mut log, Phase::Placement);
        self.place(state, &mut log, &selections);

        enter(state, &mut log, Phase::Resolution);
        self.resolve_attacks(state, &mut log, &selections);

        enter(state, &mut log, Phase::Payouts);
        self.payouts(state, &mut log);

        enter(state, &mut log, Phase::Decay);
        self.decay(state, &mut log);

        enter(state, &mut log, Phase::DeathCheck);
        death_check(state, &mut log);

        enter(state, &mut log, Phase::VictoryCheck);
        if let Some(result) = evaluate(&state.players) {
            info!(turn = state.turn, ?result, "match over");
            state.result = Some(result);
            log.push(TurnEvent::MatchEnded { result });
            return Ok(finish(state, log, selections));
        }

        enter(state, &mut log, Phase::Cleanup);
        self.cleanup(state, &mut log);

        enter(state, &mut log, Phase::Advance);
        state.turn += 1;

        Ok(finish(state, log, selections))
    }

    fn select(
        &self,
        state: &mut GameState,
        commits: &PlayerMap<Option<CardId>>,
    ) -> Result<PlayerMap<ResolvedSelection>, EngineError> {
        PlayerMap::try_new(|id| {
            resolve_selection(
                id,
                &state.players[id],
                commits[id],
                self.registry,
                self.config,
                &mut state.rng,
            )
        })
    }

    /// Re-check each revealed card. A card that is no longer playable goes
    /// back through the fallback.
    fn validate(
        &self,
        state: &mut GameState,
        log: &mut TurnLog,
        selected: &PlayerMap<ResolvedSelection>,
    ) -> Result<PlayerMap<ResolvedSelection>, EngineError> {
        PlayerMap::try_new(|id| {
            let selection = selected[id];
            let player = &state.players[id];
            if selection.is_wasted() || check_play(player, selection.subtype, self.config).is_ok() {
                return Ok(selection);
            }

            let mut redone = resolve_selection(
                id,
                player,
                Some(selection.card),
                self.registry,
                self.config,
                &mut state.rng,
            )?;
            redone.requested = selection.requested;
            log.push(TurnEvent::Revalidated {
                player: id,
                from: selection.card,
                to: redone.card,
            });
            Ok(redone)
        })
    }

    fn deduct(&self, state: &mut GameState, log: &mut TurnLog, selections: &PlayerMap<ResolvedSelection>) {
        for (id, player) in state.players.iter_mut() {
            let selection = &selections[id];
            player.hand.remove(selection.card);

            if !selection.spends_energy() {
                continue;
            }
            let amount = self.config.cost(selection.subtype);
            if player.spend(amount) {
                log.push(TurnEvent::EnergySpent {
                    player: id,
                    card: selection.card,
                    amount,
                    energy: player.energy,
                });
            } else {
                warn!(player = %id, card = %selection.card, amount, "validated card could not be paid for");
            }
        }
    }

    fn place(&self, state: &mut GameState, log: &mut TurnLog, selections: &PlayerMap<ResolvedSelection>) {
        let turn = state.turn;
        for (id, player) in state.players.iter_mut() {
            let selection = selections[id];
            if let SelectionOutcome::Wasted(fault) = selection.outcome {
                log.push(TurnEvent::Wasted {
                    player: id,
                    card: selection.card,
                    fault,
                });
                continue;
            }

            log.push(TurnEvent::Played {
                player: id,
                card: selection.card,
                subtype: selection.subtype,
            });
            match selection.subtype {
                Subtype::Wall if player.wall.is_none() => {
                    let wall = Wall::new(self.config.wall_max_hp, turn);
                    player.wall = Some(wall);
                    log.push(TurnEvent::WallPlaced {
                        player: id,
                        hp: wall.current_hp(),
                    });
                }
                Subtype::Miner(kind) if player.miner.is_none() => {
                    player.miner = Some(Miner::new(kind, self.config.payout_interval(kind), turn));
                    log.push(TurnEvent::MinerPlaced { player: id, kind });
                }
                Subtype::Wall | Subtype::Miner(_) => {
                    warn!(player = %id, card = %selection.card, "slot occupied at placement; play wasted");
                    log.push(TurnEvent::Wasted {
                        player: id,
                        card: selection.card,
                        fault: SelectionFault::SlotOccupied,
                    });
                }
                Subtype::Deflection => {
                    player.played_deflection = true;
                    log.push(TurnEvent::Deflecting { player: id });
                }
                Subtype::Continuous | Subtype::Projectile => {}
            }
        }
    }

    fn resolve_attacks(&self, state: &mut GameState, log: &mut TurnLog, selections: &PlayerMap<ResolvedSelection>) {
        for attacker in PlayerId::ALL {
            let selection = selections[attacker];
            if selection.is_wasted() {
                continue;
            }
            let Some(kind) = selection.subtype.attack_kind() else {
                continue;
            };
            self.attack(
                state,
                log,
                attacker,
                AttackSource::Card(selection.card),
                Attack::base(kind, self.config),
            );
        }
    }

    fn attack(&self, state: &mut GameState, log: &mut TurnLog, attacker: PlayerId, source: AttackSource, attack: Attack) {
        let (_, defender) = state.players.split_mut(attacker);
        let outcome = strike(attack, defender, self.config);
        debug!(%attacker, ?source, ?attack, ?outcome, "combat");

        log.push(TurnEvent::Combat {
            attacker,
            source,
            attack,
            outcome,
        });
        if outcome.miner_killed {
            log.push(TurnEvent::MinerDestroyed {
                player: attacker.opponent(),
            });
        }
    }

    /// Miners that fire are decided from the state on entry; effects then
    /// apply first player first.
    fn payouts(&self, state: &mut GameState, log: &mut TurnLog) {
        let fired: PlayerMap<Option<(MinerKind, MinerPayout)>> = PlayerMap::new(|id| {
            let miner = state.players[id].miner.as_mut()?;
            let kind = miner.kind();
            miner.tick().map(|payout| (kind, payout))
        });

        for (id, fired) in fired.iter() {
            let Some((kind, payout)) = *fired else {
                continue;
            };
            log.push(TurnEvent::MinerFired { player: id, payout });

            match payout {
                MinerPayout::Attack(attack_kind) => {
                    self.attack(
                        state,
                        log,
                        id,
                        AttackSource::Miner(kind),
                        Attack::base(attack_kind, self.config),
                    );
                }
                MinerPayout::RepairWall => match state.players[id].wall.as_mut() {
                    Some(wall) => {
                        let restored = wall.repair();
                        log.push(TurnEvent::WallRepaired { player: id, restored });
                    }
                    None => {
                        debug!(player = %id, "repair payout fizzled");
                        log.push(TurnEvent::RepairFizzled { player: id });
                    }
                },
            }
        }
    }

    fn decay(&self, state: &mut GameState, log: &mut TurnLog) {
        for (id, player) in state.players.iter_mut() {
            if player.wall.is_none() {
                continue;
            }
            let destroyed = player.wear_wall(self.config.wall_decay);
            log.push(TurnEvent::WallDecayed {
                player: id,
                hp: player.wall.map_or(0, |w| w.current_hp()),
                destroyed,
            });
        }
    }

    fn cleanup(&self, state: &mut GameState, log: &mut TurnLog) {
        for (id, player) in state.players.iter_mut() {
            player.clear_turn_flags();
            let cards = player.hand.refill(&mut player.deck, self.config.hand_size);
            if !cards.is_empty() {
                log.push(TurnEvent::CardsDrawn { player: id, cards });
            }
        }
    }
}

/// Remove any miner whose owner took base damage this turn. Combat already
/// does this; the sweep only catches what slipped through.
fn death_check(state: &mut GameState, log: &mut TurnLog) {
    for (id, player) in state.players.iter_mut() {
        if player.base_damaged && player.miner.take().is_some() {
            warn!(player = %id, "miner outlived base damage; removed at death check");
            log.push(TurnEvent::MinerDestroyed { player: id });
        }
    }
}

fn enter(state: &mut GameState, log: &mut TurnLog, phase: Phase) {
    debug!(turn = state.turn, %phase, "phase");
    state.phase = phase;
    log.phases.push(phase);
}

fn finish(state: &mut GameState, log: TurnLog, selections: PlayerMap<ResolvedSelection>) -> TurnReport {
    let report = TurnReport {
        turn: log.turn,
        selections,
        events: log.events,
        phases: log.phases,
        result: state.result,
    };
    state.history.push_back(report.clone());
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PlayerState;
    use crate::core::GameRng;
    use crate::zones::Deck;

    const WALL: CardId = CardId(1);
    const DEFLECTION: CardId = CardId(6);
    const CONTINUOUS: CardId = CardId(11);
    const PROJECTILE: CardId = CardId(16);
    const PROJECTILE_MINER: CardId = CardId(23);
    const REPAIR_MINER: CardId = CardId(27);

    struct Fixture {
        registry: CardRegistry,
        config: RulesConfig,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: CardRegistry::standard(),
                config: RulesConfig::default(),
            }
        }

        fn engine(&self) -> TurnEngine<'_> {
            TurnEngine::new(&self.registry, &self.config)
        }

        fn state(&self, hands: [&[CardId]; 2]) -> GameState {
            let players = PlayerMap::new(|id| {
                let mut p = PlayerState::new(&self.config, Deck::default());
                for &card in hands[id.index()] {
                    p.hand.push(card);
                }
                p
            });
            GameState::new(players, GameRng::new(17))
        }

        fn play(&self, state: &mut GameState, first: Option<CardId>, second: Option<CardId>) -> TurnReport {
            let engine = self.engine();
            let log = engine.begin_turn(state);
            let mut commits = PlayerMap::default();
            commits[PlayerId::FIRST] = first;
            commits[PlayerId::SECOND] = second;
            engine.resolve_turn(state, log, commits).unwrap()
        }
    }

    #[test]
    fn test_full_turn_runs_every_phase() {
        let fx = Fixture::new();
        let mut state = fx.state([&[CONTINUOUS, WALL], &[WALL, DEFLECTION]]);

        let report = fx.play(&mut state, Some(CONTINUOUS), Some(WALL));

        assert_eq!(report.phases, Phase::ORDER.to_vec());
        assert_eq!(report.turn, 1);
        assert_eq!(state.turn, 2);
        assert_eq!(state.phase, Phase::Advance);
        assert_eq!(state.history.len(), 1);

        // Wall placed this turn absorbs 8, then decays 4
        let defender = state.player(PlayerId::SECOND);
        assert_eq!(defender.health, 20);
        assert_eq!(defender.wall.map(|w| w.current_hp()), None);
        assert_eq!(state.player(PlayerId::FIRST).energy, 2);
    }

    #[test]
    fn test_energy_gained_before_selection() {
        let fx = Fixture::new();
        let mut state = fx.state([&[CONTINUOUS], &[PROJECTILE]]);

        let log = fx.engine().begin_turn(&mut state);
        assert_eq!(state.phase, Phase::Selection);
        assert_eq!(log.phases, vec![Phase::Energy, Phase::Selection]);
        assert_eq!(state.player(PlayerId::FIRST).energy, 7);
    }

    #[test]
    fn test_unaffordable_waste_keeps_energy() {
        let fx = Fixture::new();
        let mut state = fx.state([&[CONTINUOUS], &[DEFLECTION]]);
        state.player_mut(PlayerId::FIRST).energy = 0;

        let report = fx.play(&mut state, Some(CONTINUOUS), Some(DEFLECTION));

        assert!(report.selections[PlayerId::FIRST].is_wasted());
        assert_eq!(state.player(PlayerId::FIRST).energy, 2);
        assert!(state.player(PlayerId::FIRST).hand.is_empty());
        assert_eq!(state.player(PlayerId::SECOND).health, 20);
    }

    #[test]
    fn test_occupied_wall_waste_spends_energy() {
        let fx = Fixture::new();
        let mut state = fx.state([&[WALL], &[DEFLECTION]]);
        state.player_mut(PlayerId::FIRST).wall = Some(Wall::new(12, 0));

        let report = fx.play(&mut state, Some(WALL), Some(DEFLECTION));

        assert_eq!(
            report.selections[PlayerId::FIRST].outcome,
            SelectionOutcome::Wasted(SelectionFault::SlotOccupied)
        );
        assert_eq!(state.player(PlayerId::FIRST).energy, 5);
        // Existing wall is kept, then decays
        assert_eq!(state.player(PlayerId::FIRST).wall.map(|w| w.current_hp()), Some(8));
    }

    #[test]
    fn test_projectile_miner_fires_on_literal_countdown() {
        let fx = Fixture::new();
        let mut state = fx.state([
            &[PROJECTILE_MINER, DEFLECTION, DEFLECTION, DEFLECTION],
            &[WALL, WALL, WALL, WALL],
        ]);
        let mut fired_on = Vec::new();

        for turn in 1..=4 {
            let first = state.player(PlayerId::FIRST).hand.cards()[0];
            let second = state.player(PlayerId::SECOND).hand.cards()[0];
            let report = fx.play(&mut state, Some(first), Some(second));
            if report.events.iter().any(|e| matches!(e, TurnEvent::MinerFired { .. })) {
                fired_on.push(turn);
            }
        }

        // Placed turn 1 at 2: ticks to 1, 0, fires turn 3
        assert_eq!(fired_on, vec![3]);
        assert_eq!(state.player(PlayerId::SECOND).health, 17);
    }

    #[test]
    fn test_repair_fizzles_without_wall() {
        let fx = Fixture::new();
        let mut state = fx.state([&[DEFLECTION], &[DEFLECTION]]);
        state.player_mut(PlayerId::FIRST).miner = Some(Miner::new(MinerKind::Repair, 0, 0));

        let report = fx.play(&mut state, Some(DEFLECTION), Some(DEFLECTION));

        assert!(report
            .events
            .contains(&TurnEvent::RepairFizzled { player: PlayerId::FIRST }));
        assert_eq!(state.player(PlayerId::FIRST).miner.map(|m| m.turns_until_payout()), Some(0));
    }

    #[test]
    fn test_repair_restores_wall_before_decay() {
        let fx = Fixture::new();
        let mut state = fx.state([&[DEFLECTION], &[DEFLECTION]]);
        {
            let p = state.player_mut(PlayerId::FIRST);
            p.wall = Some(Wall::with_hp(3, 12, 0));
            p.miner = Some(Miner::new(MinerKind::Repair, 0, 0));
        }

        let report = fx.play(&mut state, Some(DEFLECTION), Some(DEFLECTION));

        assert!(report.events.contains(&TurnEvent::WallRepaired {
            player: PlayerId::FIRST,
            restored: 9
        }));
        assert_eq!(state.player(PlayerId::FIRST).wall.map(|w| w.current_hp()), Some(8));
    }

    #[test]
    fn test_miner_killed_the_turn_it_is_placed() {
        let fx = Fixture::new();
        let mut state = fx.state([&[REPAIR_MINER], &[PROJECTILE]]);

        let report = fx.play(&mut state, Some(REPAIR_MINER), Some(PROJECTILE));

        assert!(state.player(PlayerId::FIRST).miner.is_none());
        assert!(report
            .events
            .contains(&TurnEvent::MinerDestroyed { player: PlayerId::FIRST }));
        assert!(!report.events.iter().any(|e| matches!(e, TurnEvent::MinerFired { .. })));
    }

    #[test]
    fn test_simultaneous_elimination_is_draw() {
        let fx = Fixture::new();
        let mut state = fx.state([&[CONTINUOUS], &[CONTINUOUS]]);
        state.player_mut(PlayerId::FIRST).health = 5;
        state.player_mut(PlayerId::SECOND).health = 8;

        let report = fx.play(&mut state, Some(CONTINUOUS), Some(CONTINUOUS));

        assert_eq!(report.result, Some(crate::rules::GameResult::Draw));
        assert_eq!(report.phases.last(), Some(&Phase::VictoryCheck));
        assert_eq!(state.turn, 1);
        assert_eq!(
            fx.engine().resolve_turn(&mut state, TurnLog::new(1), PlayerMap::default()),
            Err(EngineError::MatchOver)
        );
    }

    #[test]
    fn test_empty_hand_is_fatal() {
        let fx = Fixture::new();
        let mut state = fx.state([&[], &[WALL]]);
        let engine = fx.engine();
        let log = engine.begin_turn(&mut state);

        assert_eq!(
            engine.resolve_turn(&mut state, log, PlayerMap::default()),
            Err(EngineError::EmptyHand { player: PlayerId::FIRST })
        );
    }

    #[test]
    fn test_cleanup_refills_and_clears_flags() {
        let fx = Fixture::new();
        let mut state = fx.state([&[DEFLECTION, WALL], &[WALL]]);
        state.player_mut(PlayerId::FIRST).deck = Deck::new(vec![PROJECTILE, CONTINUOUS, WALL]);

        let report = fx.play(&mut state, Some(DEFLECTION), Some(WALL));

        let first = state.player(PlayerId::FIRST);
        assert!(!first.played_deflection);
        assert_eq!(first.hand.len(), 4);
        assert!(first.deck.is_empty());
        // Second player's deck is empty: hand stays short
        assert!(state.player(PlayerId::SECOND).hand.is_empty());
        assert!(report.events.iter().any(|e| matches!(
            e,
            TurnEvent::CardsDrawn { player: PlayerId::FIRST, cards } if cards.len() == 3
        )));
    }
}
