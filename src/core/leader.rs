//! Leader cards and the places they can sit.
//!
//! Leaders start shuffled in the deck, are drawn into the citadel at the
//! start of each century, and are recruited by players through palace
//! actions. Leaders left in the citadel when a century closes go to the
//! discard. `LeaderDestination` moves a leader with a symmetric
//! `remove_from` / `add_to` pair so a relocation is one atomic change.

use serde::{Deserialize, Serialize};

use super::error::RuleViolation;
use super::player::PlayerColor;
use super::state::GameState;

/// A leader card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Leader {
    Abbess,
    Admiral,
    Bishop,
    Chancellor,
    General,
    Merchant,
    Queen,
    Scholar,
    Steward,
}

impl Leader {
    /// The full leader deck, unshuffled.
    pub const ALL: [Leader; 9] = [
        Leader::Abbess,
        Leader::Admiral,
        Leader::Bishop,
        Leader::Chancellor,
        Leader::General,
        Leader::Merchant,
        Leader::Queen,
        Leader::Scholar,
        Leader::Steward,
    ];

    /// Points scored at the end of the game by the holder.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Leader::Abbess => 2,
            Leader::Admiral => 3,
            Leader::Bishop => 4,
            Leader::Chancellor => 5,
            Leader::General => 3,
            Leader::Merchant => 2,
            Leader::Queen => 6,
            Leader::Scholar => 4,
            Leader::Steward => 1,
        }
    }
}

impl std::fmt::Display for Leader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Where a leader can be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaderDestination {
    /// Face-down draw pile. Drawn from the front.
    Deck,
    /// Leaders available for recruitment this century.
    Citadel,
    /// Leaders no longer in play.
    Discard,
    /// Held by a player.
    Player(PlayerColor),
}

impl LeaderDestination {
    /// Put `leader` at the back of this location.
    pub fn add_to(self, state: &mut GameState, leader: Leader) -> Result<(), RuleViolation> {
        let pile = state.leader_pile_mut(self)?;
        if pile.contains(&leader) {
            return Err(RuleViolation::LeaderAlreadyAt {
                leader,
                location: self,
            });
        }
        pile.push_back(leader);
        Ok(())
    }

    /// Take `leader` out of this location.
    pub fn remove_from(self, state: &mut GameState, leader: Leader) -> Result<(), RuleViolation> {
        let pile = state.leader_pile_mut(self)?;
        let index = pile
            .index_of(&leader)
            .ok_or(RuleViolation::LeaderNotAt {
                leader,
                location: self,
            })?;
        pile.remove(index);
        Ok(())
    }
}

impl std::fmt::Display for LeaderDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderDestination::Deck => f.write_str("the deck"),
            LeaderDestination::Citadel => f.write_str("the citadel"),
            LeaderDestination::Discard => f.write_str("the discard"),
            LeaderDestination::Player(color) => write!(f, "{color}'s hand"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionType, PlayerState, TILE_COUNT};

    fn state() -> GameState {
        let players = [PlayerColor::Black, PlayerColor::White]
            .into_iter()
            .map(|c| PlayerState::new(c, 12, 2));
        let mut state = GameState::new(players, &[ActionType::Garden; TILE_COUNT]).unwrap();
        state.set_leader_deck(Leader::ALL);
        state
    }

    #[test]
    fn test_leader_points() {
        let total: u32 = Leader::ALL.iter().map(|l| l.points()).sum();
        assert_eq!(total, 30);
    }

    #[test]
    fn test_move_deck_to_citadel() {
        let mut state = state();

        LeaderDestination::Deck.remove_from(&mut state, Leader::Queen).unwrap();
        LeaderDestination::Citadel.add_to(&mut state, Leader::Queen).unwrap();

        assert!(!state.leader_deck().contains(&Leader::Queen));
        assert_eq!(state.citadel().iter().copied().collect::<Vec<_>>(), vec![Leader::Queen]);
    }

    #[test]
    fn test_remove_missing_leader() {
        let mut state = state();

        let err = LeaderDestination::Citadel
            .remove_from(&mut state, Leader::Bishop)
            .unwrap_err();
        assert_eq!(
            err,
            RuleViolation::LeaderNotAt {
                leader: Leader::Bishop,
                location: LeaderDestination::Citadel,
            }
        );
    }

    #[test]
    fn test_add_to_player() {
        let mut state = state();
        let hand = LeaderDestination::Player(PlayerColor::White);

        hand.add_to(&mut state, Leader::Scholar).unwrap();
        assert!(matches!(
            hand.add_to(&mut state, Leader::Scholar),
            Err(RuleViolation::LeaderAlreadyAt { .. })
        ));

        let white = state.player(PlayerColor::White).unwrap();
        assert_eq!(white.leaders().len(), 1);
    }

    #[test]
    fn test_unseated_player_destination() {
        let mut state = state();

        assert_eq!(
            LeaderDestination::Player(PlayerColor::Brown).add_to(&mut state, Leader::Abbess),
            Err(RuleViolation::UnknownPlayer(PlayerColor::Brown))
        );
        assert_eq!(
            LeaderDestination::Player(PlayerColor::None).add_to(&mut state, Leader::Abbess),
            Err(RuleViolation::NotNormalColor(PlayerColor::None))
        );
    }
}
