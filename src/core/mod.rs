//! Core game types: board, players, tiles, leaders, state, RNG, configuration.
//!
//! Everything the rules act on lives here. Nothing in this module knows
//! about turn sequencing; that belongs to `rules`.

pub mod board;
pub mod config;
pub mod error;
pub mod leader;
pub mod player;
pub mod rng;
pub mod state;
pub mod tile;

pub use board::{ActionType, InfluenceZone, TileId, BOARD_COLUMNS, BOARD_ROWS, TILE_COUNT};
pub use config::GameConfig;
pub use error::{ActionRejected, GameError, RuleViolation, SetupError};
pub use leader::{Leader, LeaderDestination};
pub use player::{ColorMap, PlayerColor, PlayerState};
pub use rng::{shuffled, GameRng, IdentityShuffler, Shuffler};
pub use state::{GamePhase, GameState};
pub use tile::{StarToken, TileState, MAX_STARS, MIN_STARS};
