//! Turn sequencing and scoring.
//!
//! `GameController` is the state machine seam: it sets up a game, finds
//! decision points, resolves actions into changes and closes centuries.
//! `StandardController` implements the standard ruleset and `scoring`
//! holds the scoring rules it uses.

mod controller;
pub mod scoring;
mod standard;

pub use controller::{ActionOutcome, GameController, GameResult};
pub use standard::StandardController;
