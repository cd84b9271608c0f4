//! State change definitions.
//!
//! A `GameStateChange` is an atomic, serializable mutation of a
//! `GameState`. Resolving a player action produces a tree of changes
//! (usually a `Composite`); applying that tree in order to the pre-action
//! state reproduces the post-action state exactly.
//!
//! ## Controller callbacks
//!
//! A few variants hand control back to the `GameController`:
//! - `PrepareAction`: auto-skips an empty tile follow-up
//! - `PrepareNextCentury`: closes the century
//! - `ConfigurePossibleActions`: finds the next decision point
//!
//! The controller is deterministic, so replaying these variants yields
//! the same result as the original application.
//!
//! ## Rendering
//!
//! Changes are never reverse-applied. Renderers walk a change with
//! `leaves()` to animate each atomic step in order.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::actions::{BoardAction, PossibleActions};
use crate::core::{
    GamePhase, GameState, Leader, LeaderDestination, PlayerColor, RuleViolation, TileId,
};
use crate::messages::{Message, ScoreReason};
use crate::rules::GameController;

/// An atomic state mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStateChange {
    // === Turn ===

    /// Point the current player at `color`.
    SetCurrentPlayer { color: PlayerColor },

    /// Advance the current player with wraparound.
    NextPlayer,

    // === Board ===

    /// Move an architect. `None` is the player's reserve.
    MoveArchitect {
        color: PlayerColor,
        from: Option<TileId>,
        to: Option<TileId>,
    },

    /// Move one cube from reserve to a tile.
    PlaceCube { color: PlayerColor, tile: TileId },

    /// Put a new one-star token on a tile.
    PlaceStarToken { color: PlayerColor, tile: TileId },

    /// Raise a star token to exactly `nb_stars_after`.
    ///
    /// Fails unless the token holds `nb_stars_after - 1` stars.
    IncreaseStarToken {
        color: PlayerColor,
        tile: TileId,
        nb_stars_after: u8,
    },

    /// Turn a building face up.
    SetBuildingFacing { tile: TileId },

    // === Leaders and score ===

    MoveLeader {
        leader: Leader,
        from: LeaderDestination,
        to: LeaderDestination,
    },

    ScorePoints {
        color: PlayerColor,
        points: u32,
        reason: ScoreReason,
    },

    // === Game flow ===

    SetCentury { century: u8 },

    /// Finish the game.
    EndGame,

    /// Compute the follow-up of the building on `tile` for `color`.
    ///
    /// Installs the follow-up decision, or journals a skip and ends the
    /// turn with the controller's `end_turn_change`.
    PrepareAction { color: PlayerColor, tile: TileId },

    /// Close the current century.
    PrepareNextCentury,

    /// Find and install the next decision point.
    ConfigurePossibleActions,

    /// Install a precomputed decision.
    QueuePossibleActions(PossibleActions),

    // === Structure ===

    /// Children applied strictly in order.
    Composite(Vec<GameStateChange>),

    /// A change that needs no visible transition.
    Instantaneous(Box<GameStateChange>),
}

/// One atomic step of a change tree, as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangeLeaf<'a> {
    pub change: &'a GameStateChange,
    /// Wrapped, directly or through an ancestor, in `Instantaneous`.
    pub instantaneous: bool,
}

impl GameStateChange {
    /// Bundle changes applied in order.
    pub fn composite(changes: impl IntoIterator<Item = GameStateChange>) -> Self {
        Self::Composite(changes.into_iter().collect())
    }

    /// Mark `change` as needing no visible transition.
    #[must_use]
    pub fn instantaneous(change: GameStateChange) -> Self {
        Self::Instantaneous(Box::new(change))
    }

    #[must_use]
    pub fn is_instantaneous(&self) -> bool {
        matches!(self, Self::Instantaneous(_))
    }

    /// Append a change to run after the existing ones.
    ///
    /// A non-composite change is first wrapped into a composite.
    pub fn push(&mut self, change: GameStateChange) {
        let mut children = self.take_children();
        children.push(change);
        *self = Self::Composite(children);
    }

    /// Prepend a change to run before the existing ones.
    ///
    /// A non-composite change is first wrapped into a composite.
    pub fn add_to_front(&mut self, change: GameStateChange) {
        let mut children = self.take_children();
        children.insert(0, change);
        *self = Self::Composite(children);
    }

    fn take_children(&mut self) -> Vec<GameStateChange> {
        match std::mem::replace(self, Self::Composite(Vec::new())) {
            Self::Composite(children) => children,
            single => vec![single],
        }
    }

    /// Atomic steps in application order.
    ///
    /// Callback variants are leaves themselves: whatever the controller
    /// does inside `PrepareAction`, `PrepareNextCentury` or
    /// `ConfigurePossibleActions` (a century closed after a skipped
    /// follow-up, for one) shows up only through the journaled messages.
    #[must_use]
    pub fn leaves(&self) -> Vec<ChangeLeaf<'_>> {
        let mut out = Vec::new();
        self.collect_leaves(false, &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, instantaneous: bool, out: &mut Vec<ChangeLeaf<'a>>) {
        match self {
            Self::Composite(children) => {
                for child in children {
                    child.collect_leaves(instantaneous, out);
                }
            }
            Self::Instantaneous(inner) => inner.collect_leaves(true, out),
            change => out.push(ChangeLeaf {
                change,
                instantaneous,
            }),
        }
    }

    /// Apply this change to `state`.
    ///
    /// On error the state may be partially modified; callers apply changes
    /// to a scratch copy.
    pub fn apply<C: GameController + ?Sized>(
        &self,
        controller: &C,
        state: &mut GameState,
    ) -> Result<(), RuleViolation> {
        match self {
            Self::SetCurrentPlayer { color } => state.set_current_player(*color),

            Self::NextPlayer => state.next_player().map(|_| ()),

            Self::MoveArchitect { color, from, to } => state.move_architect(*color, *from, *to),

            Self::PlaceCube { color, tile } => state.place_cube(*color, *tile),

            Self::PlaceStarToken { color, tile } => {
                state.find_tile_state_mut(*tile)?.place_star_token(*color)
            }

            Self::IncreaseStarToken {
                color,
                tile,
                nb_stars_after,
            } => state
                .find_tile_state_mut(*tile)?
                .increase_star_token(*color, *nb_stars_after),

            Self::SetBuildingFacing { tile } => {
                state.find_tile_state_mut(*tile)?.set_building_facing()
            }

            Self::MoveLeader { leader, from, to } => {
                from.remove_from(state, *leader)?;
                to.add_to(state, *leader)
            }

            Self::ScorePoints {
                color,
                points,
                reason,
            } => {
                state.add_score(*color, *points)?;
                state.push_message(Message::PointsScored {
                    color: *color,
                    points: *points,
                    reason: *reason,
                });
                Ok(())
            }

            Self::SetCentury { century } => {
                state.set_century(*century);
                state.push_message(Message::CenturyStarted { century: *century });
                Ok(())
            }

            Self::EndGame => {
                state.set_phase(GamePhase::Finished);
                state.clear_possible_actions();
                state.clear_current_player();
                if let Some(result) = controller.result(state) {
                    let winners = result.winners().to_vec();
                    let score = match winners.first() {
                        Some(&color) => state.player(color)?.score(),
                        None => 0,
                    };
                    state.push_message(Message::GameOver { winners, score });
                }
                Ok(())
            }

            Self::PrepareAction { color, tile } => {
                let board_action = BoardAction::for_tile(state, *tile)?;
                match board_action.possible_actions(state, *color)? {
                    Some(actions) => {
                        state.set_possible_actions(actions);
                        Ok(())
                    }
                    None => {
                        trace!(%color, %tile, action = %board_action.action_type, "follow-up skipped");
                        state.push_message(Message::ActionSkipped {
                            color: *color,
                            tile: *tile,
                            action_type: board_action.action_type,
                        });
                        controller.end_turn_change(state)?.apply(controller, state)
                    }
                }
            }

            Self::PrepareNextCentury => controller.prepare_next_century(state),

            Self::ConfigurePossibleActions => controller.configure_possible_actions(state),

            Self::QueuePossibleActions(actions) => {
                state.set_possible_actions(actions.clone());
                Ok(())
            }

            Self::Composite(children) => {
                for child in children {
                    child.apply(controller, state)?;
                }
                Ok(())
            }

            Self::Instantaneous(inner) => inner.apply(controller, state),
        }
    }
}
