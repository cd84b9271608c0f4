//! The legal choices of one decision point.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::GameAction;
use super::board_action::BoardAction;
use crate::core::PlayerColor;

/// Legal choices offered to one player.
///
/// Built by the controller (or a `BoardAction`), installed on the state,
/// and replaced at the next decision point. Actions keep insertion order
/// and are never duplicated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossibleActions {
    player: PlayerColor,

    /// Tile follow-up that produced this decision, if any.
    trigger: Option<BoardAction>,

    actions: SmallVec<[GameAction; 8]>,
}

impl PossibleActions {
    /// An empty decision for `player`.
    #[must_use]
    pub fn new(player: PlayerColor) -> Self {
        Self {
            player,
            trigger: None,
            actions: SmallVec::new(),
        }
    }

    /// An empty follow-up decision for `player` triggered by `trigger`.
    #[must_use]
    pub fn for_board_action(player: PlayerColor, trigger: BoardAction) -> Self {
        Self {
            player,
            trigger: Some(trigger),
            actions: SmallVec::new(),
        }
    }

    /// Player who must decide.
    #[must_use]
    pub fn player(&self) -> PlayerColor {
        self.player
    }

    #[must_use]
    pub fn trigger(&self) -> Option<BoardAction> {
        self.trigger
    }

    /// Add an action unless already present.
    pub fn push(&mut self, action: GameAction) {
        if !self.contains(&action) {
            self.actions.push(action);
        }
    }

    #[must_use]
    pub fn contains(&self, action: &GameAction) -> bool {
        self.actions.contains(action)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameAction> {
        self.actions.iter()
    }

    #[must_use]
    pub fn actions(&self) -> &[GameAction] {
        &self.actions
    }
}
