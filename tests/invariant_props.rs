//! Property-based tests for match invariants.
//!
//! Random seeds and random selection scripts; after every turn the
//! public state must stay inside its bounds.

use proptest::prelude::*;

use duel_engine::{
    Attack, AttackKind, CardId, DefenderView, DuelGame, EngineError, GameSnapshot, Phase, PlayerId,
    RulesConfig,
};

/// One player's move in a turn: an index into the hand, an arbitrary card
/// id, or no commit at all.
#[derive(Clone, Debug)]
enum Move {
    FromHand(usize),
    AnyCard(u32),
    Timeout,
}

fn move_strategy() -> impl Strategy<Value = Move> {
    prop_oneof![
        4 => (0usize..4).prop_map(Move::FromHand),
        1 => (1u32..=30).prop_map(Move::AnyCard),
        1 => Just(Move::Timeout),
    ]
}

fn check_bounds(snapshot: &GameSnapshot) -> Result<(), TestCaseError> {
    for (_, player) in snapshot.players.iter() {
        prop_assert!(player.energy <= 10);
        prop_assert!(player.hand.len() <= 4);
        if let Some(wall) = player.wall {
            prop_assert!(wall.current_hp() > 0);
            prop_assert!(wall.current_hp() <= 12);
        }
        if let Some(miner) = player.miner {
            prop_assert!(miner.turns_until_payout() <= miner.payout_interval());
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Bounds hold after every turn of a drafted match, turns strictly
    /// increase, and phases never skip.
    #[test]
    fn prop_match_invariants(
        seed in any::<u64>(),
        script in prop::collection::vec((move_strategy(), move_strategy()), 8),
    ) {
        let mut game = DuelGame::new(seed).unwrap();
        for player in PlayerId::ALL {
            game.start_draft(player).unwrap();
            while game.expire_draft_round(player).unwrap().is_some() {}
        }
        let mut snapshot = game.start_match_from_drafts().unwrap();
        check_bounds(&snapshot)?;

        for (first, second) in script {
            let turn = snapshot.turn;
            let mut resolved = None;
            for (player, mv) in [(PlayerId::FIRST, first), (PlayerId::SECOND, second)] {
                let card = match mv {
                    Move::FromHand(i) => snapshot.players[player].hand.get(i).copied(),
                    Move::AnyCard(raw) => Some(CardId::new(raw)),
                    Move::Timeout => None,
                };
                let Some(card) = card else {
                    continue;
                };
                // The turn resolves on the second commit
                match game.submit_selection(player, card) {
                    Ok(report) => resolved = resolved.or(report),
                    Err(EngineError::EmptyHand { .. }) => return Ok(()),
                    Err(err) => return Err(TestCaseError::fail(err.to_string())),
                }
            }

            let report = match resolved {
                Some(report) => report,
                None => match game.force_timeout() {
                    Ok(report) => report,
                    Err(EngineError::EmptyHand { .. }) => return Ok(()),
                    Err(err) => return Err(TestCaseError::fail(err.to_string())),
                },
            };

            prop_assert_eq!(report.turn, turn);
            let expected: &[Phase] = if report.result.is_some() {
                &Phase::ORDER[..=Phase::VictoryCheck.index()]
            } else {
                &Phase::ORDER
            };
            prop_assert_eq!(report.phases.as_slice(), expected);

            snapshot = game.get_game_state().unwrap();
            check_bounds(&snapshot)?;
            if report.result.is_some() {
                prop_assert_eq!(snapshot.turn, turn);
                break;
            }
            prop_assert_eq!(snapshot.turn, turn + 1);
        }
    }

    /// Continuous damage splits exactly between wall and base.
    #[test]
    fn prop_continuous_damage_conserved(
        wall_hp in prop::option::of(1i32..=12),
        deflected in any::<bool>(),
        has_miner in any::<bool>(),
    ) {
        let config = RulesConfig::default();
        let view = DefenderView {
            wall_hp,
            played_deflection: deflected,
            deflection_miner: false,
            has_miner,
        };
        let outcome = duel_engine::rules::resolve(Attack::base(AttackKind::Continuous, &config), &view, &config);

        let effective = if deflected { 6 } else { 8 };
        prop_assert_eq!(outcome.wall_absorbed + outcome.damage_to_base, effective);
        prop_assert!(outcome.wall_absorbed <= wall_hp.unwrap_or(0));
        prop_assert_eq!(outcome.wall_destroyed, wall_hp.is_some_and(|hp| hp <= effective));
        prop_assert_eq!(outcome.miner_killed, has_miner && outcome.damage_to_base > 0);
    }

    /// Projectiles never touch walls and are all-or-nothing.
    #[test]
    fn prop_projectile_ignores_walls(
        wall_hp in prop::option::of(1i32..=12),
        deflected in any::<bool>(),
        deflection_miner in any::<bool>(),
    ) {
        let config = RulesConfig::default();
        let view = DefenderView {
            wall_hp,
            played_deflection: deflected,
            deflection_miner,
            has_miner: deflection_miner,
        };
        let outcome = duel_engine::rules::resolve(Attack::base(AttackKind::Projectile, &config), &view, &config);

        prop_assert_eq!(outcome.wall_absorbed, 0);
        prop_assert!(!outcome.wall_destroyed);
        let blocked = deflected || deflection_miner;
        prop_assert_eq!(outcome.damage_to_base, if blocked { 0 } else { 3 });
        prop_assert_eq!(outcome.blocked, blocked);
    }
}
