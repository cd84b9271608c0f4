//! Error taxonomy.
//!
//! - `ActionRejected`: a player asked for something not on offer. The state
//!   is left untouched and the caller may retry.
//! - `RuleViolation`: an invariant would have been broken while applying a
//!   change. Indicates an inconsistent change, not bad input.
//! - `SetupError`: a game could not be created from the given players or
//!   configuration.

use thiserror::Error;

use super::board::TileId;
use super::leader::{Leader, LeaderDestination};
use super::player::PlayerColor;
use crate::actions::GameAction;

/// An invariant of the game state would be broken.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("{0} is not a normal player color")]
    NotNormalColor(PlayerColor),

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerColor),

    #[error("no current player is set")]
    NoCurrentPlayer,

    #[error("{0} is not on the board")]
    UnknownTile(TileId),

    #[error("{tile} already holds a star token")]
    StarTokenPresent { tile: TileId },

    #[error("{tile} has no star token")]
    StarTokenMissing { tile: TileId },

    #[error("star token on {tile} belongs to {owner}, not {color}")]
    StarTokenOwner {
        tile: TileId,
        owner: PlayerColor,
        color: PlayerColor,
    },

    #[error("star token on {tile} holds {current} stars and cannot become {requested}")]
    StarCountOutOfSequence {
        tile: TileId,
        current: u8,
        requested: u8,
    },

    #[error("{requested} stars on {tile} is outside the raisable range")]
    StarCountOutOfRange { tile: TileId, requested: u8 },

    #[error("{0} already has an architect")]
    TileOccupied(TileId),

    #[error("no {color} architect stands on {tile}")]
    ArchitectMissing { color: PlayerColor, tile: TileId },

    #[error("{0} has no architect in reserve")]
    NoArchitectInReserve(PlayerColor),

    #[error("{0} has no cube in reserve")]
    NoCubeInReserve(PlayerColor),

    #[error("building on {0} is already constructed")]
    BuildingAlreadyFacing(TileId),

    #[error("{leader} is not in {location}")]
    LeaderNotAt {
        leader: Leader,
        location: LeaderDestination,
    },

    #[error("{leader} is already in {location}")]
    LeaderAlreadyAt {
        leader: Leader,
        location: LeaderDestination,
    },

    #[error("no decision point reached after {0} iterations")]
    DecisionLoop(usize),

    #[error("game is not in progress")]
    NotPlaying,
}

/// A requested action was refused. Nothing was applied.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionRejected {
    #[error("no decision is pending")]
    NoPendingDecision,

    #[error("it is {expected}'s decision, not {actual}'s")]
    NotYourTurn {
        expected: PlayerColor,
        actual: PlayerColor,
    },

    #[error("{0} is not among the possible actions")]
    NotPossible(GameAction),

    #[error("the game is over")]
    GameFinished,
}

/// A game could not be set up.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("{count} players requested, expected {min} to {max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("{0} is seated twice")]
    DuplicateColor(PlayerColor),

    #[error("{0} cannot be seated")]
    NotNormalColor(PlayerColor),

    #[error("board layout has {0} tiles")]
    InvalidLayout(usize),

    #[error("shuffler returned an invalid permutation of {0} items")]
    InvalidShuffle(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Any failure surfaced by the controller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Rejected(#[from] ActionRejected),

    #[error(transparent)]
    Violation(#[from] RuleViolation),

    #[error(transparent)]
    Setup(#[from] SetupError),
}
