//! # rust-citadel
//!
//! Rules engine for a century-based board game of architects, influence
//! zones and leaders.
//!
//! ## Design Principles
//!
//! 1. **Replayable**: Every action resolves into an ordered log of
//!    `GameStateChange`s. Applying the log to the pre-action state
//!    reproduces the post-action state.
//!
//! 2. **Validate, then apply**: An action is checked against the installed
//!    `PossibleActions`, applied to a scratch copy and committed only when
//!    every change succeeded. A rejected or failed action leaves the state
//!    untouched.
//!
//! 3. **No stalls**: Empty decision points are skipped inside an explicit
//!    loop with an iteration guard. The machine either awaits a decision or
//!    the game is over.
//!
//! 4. **Injected randomness**: Setup shuffling goes through the `Shuffler`
//!    capability passed to `init_game`. Nothing else is random.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` makes the
//!   scratch copy cheap.
//!
//! - **Closed variant sets**: changes, actions and messages are enums
//!   matched exhaustively.
//!
//! ## Modules
//!
//! - `core`: Board, players, tiles, leaders, state, RNG, configuration, errors
//! - `actions`: Player choices and decision points
//! - `changes`: The state change log
//! - `messages`: Explanatory messages journaled by the engine
//! - `rules`: `GameController` trait, standard ruleset, scoring
//!
//! ## Example
//!
//! ```
//! use rust_citadel::{GameController, GameRng, PlayerColor, StandardController};
//!
//! let controller = StandardController::default();
//! let players = [PlayerColor::Black, PlayerColor::White];
//! let mut state = controller.init_game(&players, &mut GameRng::new(42)).unwrap();
//!
//! // Play the first offered action until the game ends.
//! while !state.is_finished() {
//!     let pending = state.possible_actions().unwrap();
//!     let (player, action) = (pending.player(), pending.actions()[0]);
//!     controller.perform_action(&mut state, player, &action).unwrap();
//! }
//! assert!(controller.result(&state).is_some());
//! ```

pub mod actions;
pub mod changes;
pub mod core;
pub mod messages;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ActionRejected, ActionType, ColorMap, GameConfig, GameError, GamePhase, GameRng,
    GameState, IdentityShuffler, InfluenceZone, Leader, LeaderDestination,
    PlayerColor, PlayerState, RuleViolation, SetupError, Shuffler, StarToken, TileId, TileState,
};

pub use crate::actions::{BoardAction, GameAction, PossibleActions};

pub use crate::changes::{ChangeLeaf, GameStateChange};

pub use crate::messages::{BoardAnchor, Message, ScoreReason, TextBoxInfo};

pub use crate::rules::{ActionOutcome, GameController, GameResult, StandardController};
