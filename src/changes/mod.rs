//! The state change log.
//!
//! Every mutation an action causes is expressed as a `GameStateChange`.
//! The log of one action is a replay record: applied in order to the
//! pre-action state it reproduces the post-action state.

mod change;

pub use change::{ChangeLeaf, GameStateChange};
