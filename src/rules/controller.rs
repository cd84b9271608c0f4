//! Game controller trait.
//!
//! A `GameController` drives the state machine of one ruleset:
//! - Set up a game
//! - Find the next decision point, skipping players with nothing to do
//! - Resolve a chosen action into state changes
//! - Close centuries and score
//!
//! `validate_action` and `perform_action` are provided on top of those
//! hooks and implement the validate-then-apply discipline.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::actions::{GameAction, PossibleActions};
use crate::changes::GameStateChange;
use crate::core::{
    ActionRejected, GameConfig, GameError, GameState, PlayerColor, RuleViolation, Shuffler,
};
use crate::messages::TextBoxInfo;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerColor),
    /// Shared victory on a tied score.
    Winners(Vec<PlayerColor>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerColor) -> bool {
        self.winners().contains(&player)
    }

    /// Every winning color, in turn order.
    #[must_use]
    pub fn winners(&self) -> &[PlayerColor] {
        match self {
            GameResult::Winner(color) => std::slice::from_ref(color),
            GameResult::Winners(colors) => colors,
        }
    }
}

/// What a successful `perform_action` produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Every change applied, in order. Replaying it with `apply` against the
    /// pre-action state reproduces the post-action state.
    pub change: GameStateChange,
    /// Messages journaled while applying `change`.
    pub messages: Vec<TextBoxInfo>,
}

/// Game controller trait.
///
/// ## Implementation Notes
///
/// - Every hook must be deterministic: replaying a change log calls back
///   into the controller and must reach the same state.
/// - `configure_possible_actions` must either install a non-empty decision
///   or finish the game.
/// - Hooks report broken invariants as `RuleViolation`, never panic.
pub trait GameController {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Create a game for `players`, seated in the given order.
    ///
    /// `shuffler` is consulted for every random setup step and nowhere
    /// else. The returned state awaits the first decision.
    fn init_game(
        &self,
        players: &[PlayerColor],
        shuffler: &mut dyn Shuffler,
    ) -> Result<GameState, GameError>;

    /// Install the next decision point, starting from the current player.
    fn configure_possible_actions(&self, state: &mut GameState) -> Result<(), RuleViolation>;

    /// Append the architect placements available to `player`.
    fn possible_move_architect_actions(
        &self,
        state: &GameState,
        player: PlayerColor,
        actions: &mut PossibleActions,
    ) -> Result<(), RuleViolation>;

    /// Close the current century, then reconfigure or finish the game.
    fn prepare_next_century(&self, state: &mut GameState) -> Result<(), RuleViolation>;

    /// Express `action` by `player` as state changes.
    fn resolve_action(
        &self,
        state: &GameState,
        player: PlayerColor,
        action: &GameAction,
    ) -> Result<GameStateChange, RuleViolation>;

    /// Changes that close a turn once an action left no decision pending.
    ///
    /// A century close is spelled out as its individual changes so it
    /// appears in the action's log.
    fn end_turn_change(&self, state: &GameState) -> Result<GameStateChange, RuleViolation>;

    /// Winner(s), once the game is finished.
    fn result(&self, state: &GameState) -> Option<GameResult>;

    // === Provided ===

    /// Check `action` by `player` against the installed decision.
    fn validate_action(
        &self,
        state: &GameState,
        player: PlayerColor,
        action: &GameAction,
    ) -> Result<(), ActionRejected> {
        if state.is_finished() {
            return Err(ActionRejected::GameFinished);
        }
        let pending = state
            .possible_actions()
            .ok_or(ActionRejected::NoPendingDecision)?;
        if pending.player() != player {
            return Err(ActionRejected::NotYourTurn {
                expected: pending.player(),
                actual: player,
            });
        }
        if !pending.contains(action) {
            return Err(ActionRejected::NotPossible(*action));
        }
        Ok(())
    }

    /// Validate and apply `action` by `player`.
    ///
    /// The action is applied to a scratch copy of `state`, which replaces
    /// `state` only once every change applied. On any error `state` is
    /// left exactly as it was.
    #[instrument(level = "debug", skip_all, fields(player = %player, action = %action))]
    fn perform_action(
        &self,
        state: &mut GameState,
        player: PlayerColor,
        action: &GameAction,
    ) -> Result<ActionOutcome, GameError> {
        if let Err(rejected) = self.validate_action(state, player, action) {
            debug!(%rejected, "action rejected");
            return Err(rejected.into());
        }

        let mark = state.messages().len();
        let mut scratch = state.clone();
        scratch.clear_possible_actions();

        let applied = self
            .resolve_action(&scratch, player, action)
            .and_then(|mut change| {
                change.apply(self, &mut scratch)?;
                if scratch.possible_actions().is_none() && !scratch.is_finished() {
                    let tail = self.end_turn_change(&scratch)?;
                    tail.apply(self, &mut scratch)?;
                    change.push(tail);
                }
                Ok(change)
            });

        let change = match applied {
            Ok(change) => change,
            Err(violation) => {
                error!(%violation, "action produced an inconsistent change, discarded");
                return Err(violation.into());
            }
        };

        let messages = scratch.messages_since(mark);
        debug!(messages = messages.len(), century = scratch.century(), "action applied");
        *state = scratch;
        Ok(ActionOutcome { change, messages })
    }
}
