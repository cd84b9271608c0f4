//! The standard ruleset.
//!
//! ## Turn structure
//!
//! The current player places an architect from reserve on an open tile.
//! The building on that tile then offers a follow-up to the same player;
//! an empty follow-up is skipped. The turn then passes on, skipping
//! players who cannot place an architect.
//!
//! ## Centuries
//!
//! A century closes when nobody can place an architect. It is scored,
//! architects go back to reserve, unrecruited leaders are discarded and a
//! fresh citadel is drawn. Century `c` is opened by seat `(c - 1) % n`.
//! After the last century, held leaders are scored and the game ends.

use tracing::{debug, info, instrument, trace};

use super::controller::{GameController, GameResult};
use super::scoring;
use crate::actions::{GameAction, PossibleActions};
use crate::changes::GameStateChange;
use crate::core::{
    shuffled, ActionType, GameConfig, GameError, GamePhase, GameState, Leader,
    LeaderDestination, PlayerColor, PlayerState, RuleViolation, SetupError, Shuffler, TileId,
};
use crate::messages::ScoreReason;

/// Controller for the standard ruleset.
#[derive(Clone, Debug, Default)]
pub struct StandardController {
    config: GameConfig,
}

impl StandardController {
    /// Create a controller, rejecting unplayable configurations.
    pub fn new(config: GameConfig) -> Result<Self, SetupError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// `player` has an architect in reserve and an open tile to put it on.
    pub fn can_place_architect(
        &self,
        state: &GameState,
        player: PlayerColor,
    ) -> Result<bool, RuleViolation> {
        let has_architect = state.player(player)?.architects() > 0;
        Ok(has_architect && state.tiles().iter().any(|t| t.is_open()))
    }

    /// Some seated player can place an architect.
    pub fn any_architect_move(&self, state: &GameState) -> Result<bool, RuleViolation> {
        for color in state.turn_order() {
            if self.can_place_architect(state, color)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn check_players(&self, players: &[PlayerColor]) -> Result<(), SetupError> {
        let (min, max) = (self.config.min_players, self.config.max_players);
        if !(min..=max).contains(&players.len()) {
            return Err(SetupError::PlayerCount {
                count: players.len(),
                min,
                max,
            });
        }
        for (i, &color) in players.iter().enumerate() {
            if !color.is_normal() {
                return Err(SetupError::NotNormalColor(color));
            }
            if players[..i].contains(&color) {
                return Err(SetupError::DuplicateColor(color));
            }
        }
        Ok(())
    }

    /// Draw the citadel, set the century marker and its opening player.
    fn open_century(
        &self,
        state: &GameState,
        century: u8,
    ) -> Result<GameStateChange, RuleViolation> {
        let mut change = GameStateChange::composite(
            state
                .leader_deck()
                .iter()
                .take(self.config.citadel_size)
                .map(|&leader| GameStateChange::MoveLeader {
                    leader,
                    from: LeaderDestination::Deck,
                    to: LeaderDestination::Citadel,
                }),
        );
        change.push(GameStateChange::SetCentury { century });

        let seat = usize::from(century.saturating_sub(1)) % state.player_count().max(1);
        let opener = state
            .turn_order()
            .nth(seat)
            .ok_or(RuleViolation::NoCurrentPlayer)?;
        change.push(GameStateChange::instantaneous(
            GameStateChange::SetCurrentPlayer { color: opener },
        ));
        Ok(change)
    }

    /// Changes that score the current century and either open the next one
    /// or end the game.
    pub fn century_close_change(&self, state: &GameState) -> Result<GameStateChange, RuleViolation> {
        let century = state.century();

        let mut change = if century >= self.config.centuries {
            let mut last = GameStateChange::composite(scoring::leader_scoring(state));
            last.push(GameStateChange::EndGame);
            last
        } else {
            let mut reset = GameStateChange::composite(state.tiles().iter().filter_map(|tile| {
                tile.architect().map(|color| GameStateChange::MoveArchitect {
                    color,
                    from: Some(tile.tile()),
                    to: None,
                })
            }));
            for &leader in state.citadel() {
                reset.push(GameStateChange::MoveLeader {
                    leader,
                    from: LeaderDestination::Citadel,
                    to: LeaderDestination::Discard,
                });
            }
            reset.push(self.open_century(state, century + 1)?);
            reset
        };
        // Scoring reads the board before the reset.
        change.add_to_front(GameStateChange::composite(scoring::century_scoring(state)?));

        debug!(century, "century closed");
        Ok(change)
    }

    fn close_century(&self, state: &mut GameState) -> Result<(), RuleViolation> {
        self.century_close_change(state)?.apply(self, state)
    }
}

impl GameController for StandardController {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    #[instrument(level = "debug", skip_all, fields(players = players.len()))]
    fn init_game(
        &self,
        players: &[PlayerColor],
        shuffler: &mut dyn Shuffler,
    ) -> Result<GameState, GameError> {
        self.check_players(players)?;

        let layout = shuffled(shuffler, &ActionType::building_pool())?;
        let deck = shuffled(shuffler, &Leader::ALL)?;
        let tiles: Vec<TileId> = TileId::all().collect();
        let start_tiles = shuffled(shuffler, &tiles)?;

        let seats = players.iter().map(|&color| {
            PlayerState::new(
                color,
                self.config.cubes_per_player,
                self.config.architects_per_player,
            )
        });
        let mut state = GameState::new(seats, &layout)?;
        state.set_leader_deck(deck);

        let mut setup = GameStateChange::composite(
            players
                .iter()
                .zip(start_tiles)
                .map(|(&color, tile)| GameStateChange::PlaceCube { color, tile }),
        );
        setup.push(self.open_century(&state, 1)?);
        setup.apply(self, &mut state)?;

        state.set_phase(GamePhase::Playing);
        self.configure_possible_actions(&mut state)?;

        info!(players = players.len(), "game initialized");
        Ok(state)
    }

    fn configure_possible_actions(&self, state: &mut GameState) -> Result<(), RuleViolation> {
        let limit = self.config.max_decision_iterations;
        for _ in 0..limit {
            match state.phase() {
                GamePhase::Finished => {
                    state.clear_possible_actions();
                    return Ok(());
                }
                GamePhase::Setup => return Err(RuleViolation::NotPlaying),
                GamePhase::Playing => {}
            }

            let player = state.current_player().ok_or(RuleViolation::NoCurrentPlayer)?;
            let mut actions = PossibleActions::new(player);
            self.possible_move_architect_actions(state, player, &mut actions)?;
            if !actions.is_empty() {
                return GameStateChange::QueuePossibleActions(actions).apply(self, state);
            }

            if self.any_architect_move(state)? {
                let next = state.next_player()?;
                trace!(%player, %next, "no architect move, turn passes");
            } else {
                self.close_century(state)?;
            }
        }
        Err(RuleViolation::DecisionLoop(limit))
    }

    fn possible_move_architect_actions(
        &self,
        state: &GameState,
        player: PlayerColor,
        actions: &mut PossibleActions,
    ) -> Result<(), RuleViolation> {
        if state.player(player)?.architects() == 0 {
            return Ok(());
        }
        for tile in state.tiles().iter().filter(|t| t.is_open()) {
            actions.push(GameAction::MoveArchitect { to: tile.tile() });
        }
        Ok(())
    }

    fn prepare_next_century(&self, state: &mut GameState) -> Result<(), RuleViolation> {
        self.close_century(state)?;
        self.configure_possible_actions(state)
    }

    fn resolve_action(
        &self,
        state: &GameState,
        player: PlayerColor,
        action: &GameAction,
    ) -> Result<GameStateChange, RuleViolation> {
        let color = player.ensure_normal()?;
        let changes = match *action {
            GameAction::MoveArchitect { to } => vec![
                GameStateChange::MoveArchitect {
                    color,
                    from: None,
                    to: Some(to),
                },
                GameStateChange::PrepareAction { color, tile: to },
            ],
            GameAction::PlaceCube { tile } => vec![GameStateChange::PlaceCube { color, tile }],
            GameAction::RaiseStar { tile } => {
                let raise = match state.find_tile_state(tile)?.star_token() {
                    None => GameStateChange::PlaceStarToken { color, tile },
                    Some(token) => GameStateChange::IncreaseStarToken {
                        color,
                        tile,
                        nb_stars_after: token.count + 1,
                    },
                };
                vec![raise]
            }
            GameAction::RecruitLeader { leader } => vec![GameStateChange::MoveLeader {
                leader,
                from: LeaderDestination::Citadel,
                to: LeaderDestination::Player(color),
            }],
            GameAction::Construct { tile } => vec![
                GameStateChange::SetBuildingFacing { tile },
                GameStateChange::ScorePoints {
                    color,
                    points: 1,
                    reason: ScoreReason::Construction { tile },
                },
            ],
        };
        Ok(GameStateChange::Composite(changes))
    }

    fn end_turn_change(&self, state: &GameState) -> Result<GameStateChange, RuleViolation> {
        if self.any_architect_move(state)? {
            Ok(GameStateChange::composite([
                GameStateChange::instantaneous(GameStateChange::NextPlayer),
                GameStateChange::ConfigurePossibleActions,
            ]))
        } else {
            let mut change = self.century_close_change(state)?;
            change.push(GameStateChange::ConfigurePossibleActions);
            Ok(change)
        }
    }

    fn result(&self, state: &GameState) -> Option<GameResult> {
        if state.is_finished() {
            scoring::game_result(state)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionRejected, GameRng, IdentityShuffler, TILE_COUNT};

    const THREE: [PlayerColor; 3] = [PlayerColor::Black, PlayerColor::White, PlayerColor::Orange];

    fn start(players: &[PlayerColor]) -> (StandardController, GameState) {
        let controller = StandardController::default();
        let state = controller.init_game(players, &mut IdentityShuffler).unwrap();
        (controller, state)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig::new().with_centuries(0);
        assert!(matches!(
            StandardController::new(config),
            Err(SetupError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_init_game_layout() {
        let (_, state) = start(&THREE);

        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.century(), 1);
        assert_eq!(state.current_player(), Some(PlayerColor::Black));

        // Pool order with the identity shuffler.
        let layout: Vec<ActionType> = state.tiles().iter().map(|t| t.action_type()).collect();
        assert_eq!(layout, ActionType::building_pool());

        // Starting cubes on the first tiles, one each.
        for (i, color) in THREE.iter().enumerate() {
            let tile = state.find_tile_state(TileId::new(i as u8)).unwrap();
            assert_eq!(tile.cubes(*color), 1);
            assert_eq!(state.player(*color).unwrap().cubes(), 11);
            assert_eq!(state.player(*color).unwrap().architects(), 2);
        }

        let citadel: Vec<Leader> = state.citadel().iter().copied().collect();
        assert_eq!(citadel, Leader::ALL[..3].to_vec());
        assert_eq!(state.leader_deck().len(), 6);
    }

    #[test]
    fn test_first_decision_is_architect_placement() {
        let (_, state) = start(&THREE);

        let pending = state.possible_actions().unwrap();
        assert_eq!(pending.player(), PlayerColor::Black);
        assert_eq!(pending.trigger(), None);
        assert_eq!(pending.len(), TILE_COUNT);
        assert!(pending
            .iter()
            .all(|a| matches!(a, GameAction::MoveArchitect { .. })));
    }

    #[test]
    fn test_init_game_rejects_bad_players() {
        let controller = StandardController::default();

        assert_eq!(
            controller.init_game(&[PlayerColor::Black], &mut IdentityShuffler),
            Err(GameError::Setup(SetupError::PlayerCount {
                count: 1,
                min: 2,
                max: 5,
            }))
        );
        assert_eq!(
            controller.init_game(
                &[PlayerColor::Black, PlayerColor::Gray, PlayerColor::Black],
                &mut IdentityShuffler
            ),
            Err(GameError::Setup(SetupError::DuplicateColor(PlayerColor::Black)))
        );
        assert_eq!(
            controller.init_game(&[PlayerColor::Black, PlayerColor::None], &mut IdentityShuffler),
            Err(GameError::Setup(SetupError::NotNormalColor(PlayerColor::None)))
        );
    }

    #[test]
    fn test_seeded_setup_is_reproducible() {
        let controller = StandardController::default();
        let a = controller.init_game(&THREE, &mut GameRng::new(11)).unwrap();
        let b = controller.init_game(&THREE, &mut GameRng::new(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_market_follow_up() {
        let (controller, mut state) = start(&THREE);

        controller
            .perform_action(&mut state, PlayerColor::Black, &GameAction::MoveArchitect {
                to: TileId::new(0),
            })
            .unwrap();

        let pending = state.possible_actions().unwrap();
        assert_eq!(pending.player(), PlayerColor::Black);
        assert_eq!(pending.trigger().map(|t| t.action_type), Some(ActionType::Market));
        let offered: Vec<GameAction> = pending.iter().copied().collect();
        assert_eq!(
            offered,
            [0, 1, 4, 5]
                .into_iter()
                .map(|t| GameAction::PlaceCube { tile: TileId::new(t) })
                .collect::<Vec<_>>()
        );

        controller
            .perform_action(&mut state, PlayerColor::Black, &GameAction::PlaceCube {
                tile: TileId::new(5),
            })
            .unwrap();
        assert_eq!(state.current_player(), Some(PlayerColor::White));
        assert_eq!(
            state.find_tile_state(TileId::new(5)).unwrap().cubes(PlayerColor::Black),
            1
        );
    }

    #[test]
    fn test_workshop_places_then_raises() {
        let (controller, mut state) = start(&[PlayerColor::Black, PlayerColor::White]);
        let star = TileId::new(7);
        let turns = [
            (PlayerColor::Black, 6, 7),
            (PlayerColor::White, 4, 0),
            (PlayerColor::Black, 7, 7),
        ];

        let mut last = None;
        for (player, workshop, target) in turns {
            let place = GameAction::MoveArchitect {
                to: TileId::new(workshop),
            };
            controller.perform_action(&mut state, player, &place).unwrap();
            let raise = GameAction::RaiseStar {
                tile: TileId::new(target),
            };
            last = Some(controller.perform_action(&mut state, player, &raise).unwrap());
        }

        let token = state.find_tile_state(star).unwrap().star_token().unwrap();
        assert_eq!(token.color, PlayerColor::Black);
        assert_eq!(token.count, 2);

        let outcome = last.unwrap();
        assert_eq!(
            outcome.change.leaves()[0].change,
            &GameStateChange::IncreaseStarToken {
                color: PlayerColor::Black,
                tile: star,
                nb_stars_after: 2,
            }
        );
    }

    #[test]
    fn test_palace_recruits_leader() {
        let (controller, mut state) = start(&THREE);

        controller
            .perform_action(&mut state, PlayerColor::Black, &GameAction::MoveArchitect {
                to: TileId::new(8),
            })
            .unwrap();
        controller
            .perform_action(&mut state, PlayerColor::Black, &GameAction::RecruitLeader {
                leader: Leader::Admiral,
            })
            .unwrap();

        let black = state.player(PlayerColor::Black).unwrap();
        assert_eq!(black.leaders().iter().copied().collect::<Vec<_>>(), vec![Leader::Admiral]);
        assert!(!state.citadel().contains(&Leader::Admiral));
    }

    #[test]
    fn test_quarry_constructs_and_scores() {
        let (controller, mut state) = start(&THREE);

        controller
            .perform_action(&mut state, PlayerColor::Black, &GameAction::MoveArchitect {
                to: TileId::new(12),
            })
            .unwrap();
        let outcome = controller
            .perform_action(&mut state, PlayerColor::Black, &GameAction::Construct {
                tile: TileId::new(8),
            })
            .unwrap();

        assert!(state.find_tile_state(TileId::new(8)).unwrap().building_facing());
        assert_eq!(state.player(PlayerColor::Black).unwrap().score(), 1);
        assert_eq!(outcome.messages.len(), 1);

        // A built tile can no longer take an architect.
        let pending = state.possible_actions().unwrap();
        assert!(!pending.contains(&GameAction::MoveArchitect { to: TileId::new(8) }));
    }

    #[test]
    fn test_garden_is_skipped() {
        let (controller, mut state) = start(&THREE);

        let outcome = controller
            .perform_action(&mut state, PlayerColor::Black, &GameAction::MoveArchitect {
                to: TileId::new(14),
            })
            .unwrap();

        assert_eq!(state.current_player(), Some(PlayerColor::White));
        assert_eq!(state.possible_actions().unwrap().player(), PlayerColor::White);
        assert!(outcome.messages.iter().any(|m| matches!(
            m.message,
            crate::messages::Message::ActionSkipped {
                action_type: ActionType::Garden,
                ..
            }
        )));
    }

    #[test]
    fn test_rejections() {
        let (controller, mut state) = start(&THREE);
        let snapshot = state.clone();

        let place = GameAction::MoveArchitect { to: TileId::new(3) };
        assert_eq!(
            controller.perform_action(&mut state, PlayerColor::White, &place),
            Err(GameError::Rejected(ActionRejected::NotYourTurn {
                expected: PlayerColor::Black,
                actual: PlayerColor::White,
            }))
        );

        let cube = GameAction::PlaceCube { tile: TileId::new(3) };
        assert_eq!(
            controller.perform_action(&mut state, PlayerColor::Black, &cube),
            Err(GameError::Rejected(ActionRejected::NotPossible(cube)))
        );

        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_decision_loop_guard() {
        // Bypasses `validate` to force a guard smaller than one pass.
        let controller = StandardController {
            config: GameConfig::new().with_max_decision_iterations(1),
        };
        let mut state = start(&[PlayerColor::Black, PlayerColor::White]).1;
        let black = state.player_mut(PlayerColor::Black).unwrap();
        black.take_architect().unwrap();
        black.take_architect().unwrap();

        // Skipping black uses the only allowed iteration.
        assert_eq!(
            controller.configure_possible_actions(&mut state),
            Err(RuleViolation::DecisionLoop(1))
        );
    }

    #[test]
    fn test_minimum_guard_accepts_every_offered_move() {
        let config = GameConfig::new().with_architects_per_player(1);
        let config = config.clone().with_max_decision_iterations(config.min_decision_iterations());
        let controller = StandardController::new(config).unwrap();
        let mut state = controller
            .init_game(&[PlayerColor::Black, PlayerColor::White], &mut IdentityShuffler)
            .unwrap();

        // A garden placement skips its follow-up and passes the turn.
        controller
            .perform_action(&mut state, PlayerColor::Black, &GameAction::MoveArchitect {
                to: TileId::new(14),
            })
            .unwrap();

        // White's placement ends the century, either directly or through a
        // skipped follow-up.
        let pending = state.possible_actions().unwrap().clone();
        assert_eq!(pending.player(), PlayerColor::White);
        for action in pending.iter() {
            let mut scratch = state.clone();
            let outcome = controller.perform_action(&mut scratch, PlayerColor::White, action);
            assert!(outcome.is_ok(), "{action} failed: {outcome:?}");
        }
    }

    #[test]
    fn test_century_close_is_logged() {
        let config = GameConfig::new().with_architects_per_player(1);
        let controller = StandardController::new(config).unwrap();
        let mut state = controller
            .init_game(&[PlayerColor::Black, PlayerColor::White], &mut IdentityShuffler)
            .unwrap();

        // Each player takes a market and adds a cube to its zone.
        let mut outcome = None;
        for (color, tile) in [(PlayerColor::Black, 0), (PlayerColor::White, 1)] {
            let tile = TileId::new(tile);
            controller
                .perform_action(&mut state, color, &GameAction::MoveArchitect { to: tile })
                .unwrap();
            outcome = Some(
                controller
                    .perform_action(&mut state, color, &GameAction::PlaceCube { tile })
                    .unwrap(),
            );
        }
        let outcome = outcome.unwrap();

        assert_eq!(state.century(), 2);
        let leaves = outcome.change.leaves();
        assert!(leaves.iter().any(|l| matches!(
            l.change,
            GameStateChange::ScorePoints {
                reason: ScoreReason::ZoneMajority { .. },
                ..
            }
        )));
        assert!(leaves.iter().any(|l| matches!(
            l.change,
            GameStateChange::MoveArchitect { to: None, .. }
        )));
        assert!(leaves
            .iter()
            .any(|l| l.change == &GameStateChange::SetCentury { century: 2 }));
    }

    #[test]
    fn test_prepare_next_century_matches_close_change() {
        let (controller, state) = start(&THREE);

        let mut delegated = state.clone();
        GameStateChange::PrepareNextCentury
            .apply(&controller, &mut delegated)
            .unwrap();

        let mut logged = state.clone();
        let mut change = controller.century_close_change(&state).unwrap();
        change.push(GameStateChange::ConfigurePossibleActions);
        change.apply(&controller, &mut logged).unwrap();

        assert_eq!(delegated, logged);
        assert_eq!(logged.century(), 2);
    }

    #[test]
    fn test_configure_requires_playing_phase() {
        let controller = StandardController::default();
        let players = [PlayerState::new(PlayerColor::Black, 1, 1)];
        let mut state = GameState::new(players, &ActionType::building_pool()).unwrap();

        assert_eq!(
            controller.configure_possible_actions(&mut state),
            Err(RuleViolation::NotPlaying)
        );
    }
}
