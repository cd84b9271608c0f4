//! Random playouts.
//!
//! Every action of a seeded random game is replayed from the pre-action
//! state and must reproduce the committed state. Games must terminate
//! without ever leaving the machine without a decision, and refused
//! actions must leave the state untouched.

use proptest::prelude::*;
use rust_citadel::{
    ActionRejected, GameAction, GameController, GameError, GameRng, GamePhase, GameState, Leader,
    PlayerColor, StandardController, TileId,
};

const MAX_STEPS: usize = 400;

fn assert_decision_invariants(state: &GameState) {
    match state.phase() {
        GamePhase::Playing => {
            let pending = state.possible_actions().expect("playing state awaits a decision");
            assert!(!pending.is_empty());
            assert_eq!(state.current_player(), Some(pending.player()));
        }
        GamePhase::Finished => {
            assert!(state.possible_actions().is_none());
            assert_eq!(state.current_player(), None);
        }
        GamePhase::Setup => panic!("initialized game still in setup"),
    }
}

/// Play `choices` (wrapping) until the game ends, checking each replay.
fn playout(controller: &StandardController, mut state: GameState, choices: &[usize]) -> GameState {
    for step in 0..MAX_STEPS {
        assert_decision_invariants(&state);
        if state.is_finished() {
            return state;
        }

        let pending = state.possible_actions().unwrap();
        let pick = choices[step % choices.len()] % pending.len();
        let (player, action) = (pending.player(), pending.actions()[pick]);

        let before = state.clone();
        let outcome = controller.perform_action(&mut state, player, &action).unwrap();

        let mut replay = before;
        outcome.change.apply(controller, &mut replay).unwrap();
        assert_eq!(replay, state, "replay of {action} diverged");
    }
    panic!("game did not finish within {MAX_STEPS} actions");
}

/// Every action shape over the whole board and leader deck.
fn every_action() -> Vec<GameAction> {
    let mut actions = Vec::new();
    for tile in TileId::all() {
        actions.push(GameAction::MoveArchitect { to: tile });
        actions.push(GameAction::PlaceCube { tile });
        actions.push(GameAction::RaiseStar { tile });
        actions.push(GameAction::Construct { tile });
    }
    actions.extend(Leader::ALL.map(|leader| GameAction::RecruitLeader { leader }));
    actions
}

/// Submit a refused request at the current decision and check nothing moved.
fn assert_refused_without_effect(
    controller: &StandardController,
    state: &mut GameState,
    wrong_player: bool,
    pick: usize,
) {
    let snapshot = state.clone();
    let pending = state.possible_actions().unwrap().clone();

    let (player, action, expected) = if wrong_player {
        let seats: Vec<PlayerColor> = state.turn_order().collect();
        let seat = seats.iter().position(|&c| c == pending.player()).unwrap();
        let other = seats[(seat + 1 + pick % (seats.len() - 1)) % seats.len()];
        let action = pending.actions()[pick % pending.len()];
        let expected = ActionRejected::NotYourTurn {
            expected: pending.player(),
            actual: other,
        };
        (other, action, expected)
    } else {
        let candidates = every_action();
        let action = (0..candidates.len())
            .map(|i| candidates[(pick % candidates.len() + i) % candidates.len()])
            .find(|a| !pending.contains(a))
            .unwrap();
        (pending.player(), action, ActionRejected::NotPossible(action))
    };

    let result = controller.perform_action(state, player, &action);
    assert_eq!(result, Err(GameError::Rejected(expected)));
    assert_eq!(*state, snapshot);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_replay_reproduces_every_action(
        seed in any::<u64>(),
        players in 2usize..=5,
        choices in proptest::collection::vec(any::<usize>(), 1..32),
    ) {
        let controller = StandardController::default();
        let colors = &PlayerColor::NORMAL[..players];
        let state = controller.init_game(colors, &mut GameRng::new(seed)).unwrap();

        let finished = playout(&controller, state, &choices);

        prop_assert!(controller.result(&finished).is_some());
        let total_cubes: u32 = finished
            .tiles()
            .iter()
            .map(|t| colors.iter().map(|&c| u32::from(t.cubes(c))).sum::<u32>())
            .sum();
        let reserve: u32 = finished.players().iter().map(|p| u32::from(p.cubes())).sum();
        prop_assert_eq!(total_cubes + reserve, 12 * players as u32);
    }

    #[test]
    fn prop_same_seed_same_game(seed in any::<u64>(), pick in any::<usize>()) {
        let controller = StandardController::default();
        let colors = [PlayerColor::Orange, PlayerColor::Gray, PlayerColor::Brown];

        let a = controller.init_game(&colors, &mut GameRng::new(seed)).unwrap();
        let b = controller.init_game(&colors, &mut GameRng::new(seed)).unwrap();
        prop_assert_eq!(&a, &b);

        let a = playout(&controller, a, &[pick]);
        let b = playout(&controller, b, &[pick]);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_refused_actions_leave_state_untouched(
        seed in any::<u64>(),
        players in 2usize..=5,
        steps in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<usize>()), 1..64),
    ) {
        let controller = StandardController::default();
        let colors = &PlayerColor::NORMAL[..players];
        let mut state = controller.init_game(colors, &mut GameRng::new(seed)).unwrap();

        for (refuse, wrong_player, pick) in steps {
            if state.is_finished() {
                break;
            }
            if refuse {
                assert_refused_without_effect(&controller, &mut state, wrong_player, pick);
            }
            let pending = state.possible_actions().unwrap();
            let (player, action) = (pending.player(), pending.actions()[pick % pending.len()]);
            controller.perform_action(&mut state, player, &action).unwrap();
        }
    }
}
