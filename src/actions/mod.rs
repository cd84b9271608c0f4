//! Decision points.
//!
//! - `GameAction`: one choice a player can make
//! - `PossibleActions`: the choices installed for the current decision
//! - `BoardAction`: enumerates the follow-up choices of a tile's building

mod action;
mod board_action;
mod possible;

pub use action::GameAction;
pub use board_action::BoardAction;
pub use possible::PossibleActions;
