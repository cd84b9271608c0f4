//! Tile-bound follow-up rules.
//!
//! Placing an architect on a tile triggers the action printed on its
//! building. `BoardAction` enumerates what that action lets the player do.
//! An empty enumeration is reported as `None` and auto-skipped by the
//! caller.

use serde::{Deserialize, Serialize};

use super::action::GameAction;
use super::possible::PossibleActions;
use crate::core::{ActionType, GameState, PlayerColor, RuleViolation, TileId};

/// The action of the building on `tile`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardAction {
    pub tile: TileId,
    pub action_type: ActionType,
}

impl BoardAction {
    #[must_use]
    pub fn new(tile: TileId, action_type: ActionType) -> Self {
        Self { tile, action_type }
    }

    /// The action of the building currently on `tile`.
    pub fn for_tile(state: &GameState, tile: TileId) -> Result<Self, RuleViolation> {
        let action_type = state.find_tile_state(tile)?.action_type();
        Ok(Self::new(tile, action_type))
    }

    /// Follow-up choices for `player`, or `None` when there is nothing to
    /// choose.
    ///
    /// Tiles are offered in board order, leaders in citadel order.
    pub fn possible_actions(
        &self,
        state: &GameState,
        player: PlayerColor,
    ) -> Result<Option<PossibleActions>, RuleViolation> {
        let seated = state.player(player)?;
        let mut actions = PossibleActions::for_board_action(player, *self);

        match self.action_type {
            ActionType::Market => {
                if seated.cubes() > 0 {
                    for tile in self.tile.zone().tiles() {
                        actions.push(GameAction::PlaceCube { tile });
                    }
                }
            }
            ActionType::Workshop => {
                for tile in self.tile.zone().tiles() {
                    if state.find_tile_state(tile)?.can_raise_star(player) {
                        actions.push(GameAction::RaiseStar { tile });
                    }
                }
            }
            ActionType::Palace => {
                for &leader in state.citadel() {
                    actions.push(GameAction::RecruitLeader { leader });
                }
            }
            ActionType::Quarry => {
                let candidates = std::iter::once(self.tile).chain(self.tile.neighbours());
                for tile in candidates {
                    if !state.find_tile_state(tile)?.building_facing() {
                        actions.push(GameAction::Construct { tile });
                    }
                }
            }
            ActionType::Garden => {}
        }

        Ok((!actions.is_empty()).then_some(actions))
    }
}
