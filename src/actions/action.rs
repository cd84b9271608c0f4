//! Player choices.
//!
//! A `GameAction` is what a player picks at a decision point. It names the
//! choice only; the controller resolves it into state changes.

use serde::{Deserialize, Serialize};

use crate::core::{Leader, TileId};

/// A choice offered to a player.
///
/// ## Example
///
/// ```
/// use rust_citadel::actions::GameAction;
/// use rust_citadel::core::TileId;
///
/// let action = GameAction::MoveArchitect { to: TileId::new(5) };
/// assert_eq!(action.tile(), Some(TileId::new(5)));
/// assert_eq!(action.to_string(), "place an architect on Tile(5)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Place an architect from reserve on a tile.
    MoveArchitect { to: TileId },
    /// Market follow-up.
    PlaceCube { tile: TileId },
    /// Workshop follow-up: place a star token or raise one's own.
    RaiseStar { tile: TileId },
    /// Palace follow-up.
    RecruitLeader { leader: Leader },
    /// Quarry follow-up.
    Construct { tile: TileId },
}

impl GameAction {
    /// The tile the action targets, if any.
    #[must_use]
    pub fn tile(&self) -> Option<TileId> {
        match *self {
            GameAction::MoveArchitect { to } => Some(to),
            GameAction::PlaceCube { tile }
            | GameAction::RaiseStar { tile }
            | GameAction::Construct { tile } => Some(tile),
            GameAction::RecruitLeader { .. } => None,
        }
    }
}

impl std::fmt::Display for GameAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameAction::MoveArchitect { to } => write!(f, "place an architect on {to}"),
            GameAction::PlaceCube { tile } => write!(f, "place a cube on {tile}"),
            GameAction::RaiseStar { tile } => write!(f, "raise a star on {tile}"),
            GameAction::RecruitLeader { leader } => write!(f, "recruit the {leader}"),
            GameAction::Construct { tile } => write!(f, "construct the building on {tile}"),
        }
    }
}
