//! Game state.
//!
//! `GameState` is the single mutable aggregate of a game: the sixteen tile
//! states, the seated players in turn order, the current player pointer,
//! century and phase markers, leader locations, the pending decision and
//! the message journal.
//!
//! All collections are `im` persistent structures so the controller can
//! apply an action to a scratch clone and commit it only when every change
//! succeeded.
//!
//! ## Invariants
//!
//! - While `phase` is `Playing`, a current player is set.
//! - `possible_actions` is `Some` exactly when a player must decide.
//! - Tiles are stored in `TileId` order.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::board::{ActionType, TileId, TILE_COUNT};
use super::error::{RuleViolation, SetupError};
use super::leader::{Leader, LeaderDestination};
use super::player::{PlayerColor, PlayerState};
use super::tile::TileState;
use crate::actions::PossibleActions;
use crate::messages::{Message, TextBoxInfo};

/// Macro phase of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created, `init_game` has not finished.
    #[default]
    Setup,
    /// Centuries are being played.
    Playing,
    /// Final scoring done.
    Finished,
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    phase: GamePhase,

    /// Current century, 1-based. 0 during setup.
    century: u8,

    /// Seated players in turn order.
    players: Vector<PlayerState>,

    /// Index into `players`.
    current_player: Option<usize>,

    tiles: Vector<TileState>,

    leader_deck: Vector<Leader>,
    citadel: Vector<Leader>,
    discard: Vector<Leader>,

    possible_actions: Option<PossibleActions>,

    messages: Vector<TextBoxInfo>,
}

impl GameState {
    /// Create a state with `players` seated in the given order and one tile
    /// per entry of `layout`.
    pub fn new(
        players: impl IntoIterator<Item = PlayerState>,
        layout: &[ActionType],
    ) -> Result<Self, SetupError> {
        if layout.len() != TILE_COUNT {
            return Err(SetupError::InvalidLayout(layout.len()));
        }
        let tiles = TileId::all()
            .zip(layout.iter().copied())
            .map(|(tile, action_type)| TileState::new(tile, action_type))
            .collect();

        Ok(Self {
            phase: GamePhase::Setup,
            century: 0,
            players: players.into_iter().collect(),
            current_player: None,
            tiles,
            leader_deck: Vector::new(),
            citadel: Vector::new(),
            discard: Vector::new(),
            possible_actions: None,
            messages: Vector::new(),
        })
    }

    // === Phase ===

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    #[must_use]
    pub fn century(&self) -> u8 {
        self.century
    }

    pub fn set_century(&mut self, century: u8) {
        self.century = century;
    }

    // === Players ===

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &Vector<PlayerState> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Colors in turn order.
    pub fn turn_order(&self) -> impl Iterator<Item = PlayerColor> + '_ {
        self.players.iter().map(PlayerState::color)
    }

    fn seat_of(&self, color: PlayerColor) -> Result<usize, RuleViolation> {
        color.ensure_normal()?;
        self.players
            .iter()
            .position(|p| p.color() == color)
            .ok_or(RuleViolation::UnknownPlayer(color))
    }

    /// Look up a seated player.
    pub fn player(&self, color: PlayerColor) -> Result<&PlayerState, RuleViolation> {
        let seat = self.seat_of(color)?;
        Ok(&self.players[seat])
    }

    pub fn player_mut(&mut self, color: PlayerColor) -> Result<&mut PlayerState, RuleViolation> {
        let seat = self.seat_of(color)?;
        Ok(&mut self.players[seat])
    }

    #[must_use]
    pub fn current_player(&self) -> Option<PlayerColor> {
        self.current_player.map(|i| self.players[i].color())
    }

    #[must_use]
    pub fn current_player_index(&self) -> Option<usize> {
        self.current_player
    }

    pub fn set_current_player(&mut self, color: PlayerColor) -> Result<(), RuleViolation> {
        self.current_player = Some(self.seat_of(color)?);
        Ok(())
    }

    pub fn clear_current_player(&mut self) {
        self.current_player = None;
    }

    /// Pass the turn to the next seat, wrapping around.
    ///
    /// Returns the new current player.
    pub fn next_player(&mut self) -> Result<PlayerColor, RuleViolation> {
        let seat = self.current_player.ok_or(RuleViolation::NoCurrentPlayer)?;
        let next = (seat + 1) % self.players.len();
        self.current_player = Some(next);
        Ok(self.players[next].color())
    }

    pub fn add_score(&mut self, color: PlayerColor, points: u32) -> Result<(), RuleViolation> {
        self.player_mut(color)?.add_score(points);
        Ok(())
    }

    // === Board ===

    /// Tile states in board order.
    #[must_use]
    pub fn tiles(&self) -> &Vector<TileState> {
        &self.tiles
    }

    pub fn find_tile_state(&self, tile: TileId) -> Result<&TileState, RuleViolation> {
        self.tiles
            .get(tile.index())
            .ok_or(RuleViolation::UnknownTile(tile))
    }

    pub fn find_tile_state_mut(&mut self, tile: TileId) -> Result<&mut TileState, RuleViolation> {
        self.tiles
            .get_mut(tile.index())
            .ok_or(RuleViolation::UnknownTile(tile))
    }

    /// Move one cube of `color` from reserve onto `tile`.
    pub fn place_cube(&mut self, color: PlayerColor, tile: TileId) -> Result<(), RuleViolation> {
        self.find_tile_state(tile)?;
        self.player_mut(color)?.take_cube()?;
        self.find_tile_state_mut(tile)?.add_cube(color)
    }

    /// Move an architect of `color`. `None` is the player's reserve.
    pub fn move_architect(
        &mut self,
        color: PlayerColor,
        from: Option<TileId>,
        to: Option<TileId>,
    ) -> Result<(), RuleViolation> {
        match from {
            Some(tile) => self.find_tile_state_mut(tile)?.remove_architect(color)?,
            None => self.player_mut(color)?.take_architect()?,
        }
        match to {
            Some(tile) => self.find_tile_state_mut(tile)?.place_architect(color),
            None => {
                self.player_mut(color)?.return_architect();
                Ok(())
            }
        }
    }

    // === Leaders ===

    /// Leaders still to be drawn, front first.
    #[must_use]
    pub fn leader_deck(&self) -> &Vector<Leader> {
        &self.leader_deck
    }

    /// Leaders available for recruitment.
    #[must_use]
    pub fn citadel(&self) -> &Vector<Leader> {
        &self.citadel
    }

    #[must_use]
    pub fn discard(&self) -> &Vector<Leader> {
        &self.discard
    }

    pub fn set_leader_deck(&mut self, leaders: impl IntoIterator<Item = Leader>) {
        self.leader_deck = leaders.into_iter().collect();
    }

    /// The pile backing a leader destination.
    pub fn leader_pile_mut(
        &mut self,
        destination: LeaderDestination,
    ) -> Result<&mut Vector<Leader>, RuleViolation> {
        match destination {
            LeaderDestination::Deck => Ok(&mut self.leader_deck),
            LeaderDestination::Citadel => Ok(&mut self.citadel),
            LeaderDestination::Discard => Ok(&mut self.discard),
            LeaderDestination::Player(color) => Ok(self.player_mut(color)?.leaders_mut()),
        }
    }

    // === Decision point ===

    #[must_use]
    pub fn possible_actions(&self) -> Option<&PossibleActions> {
        self.possible_actions.as_ref()
    }

    pub fn set_possible_actions(&mut self, actions: PossibleActions) {
        self.possible_actions = Some(actions);
    }

    pub fn take_possible_actions(&mut self) -> Option<PossibleActions> {
        self.possible_actions.take()
    }

    pub fn clear_possible_actions(&mut self) {
        self.possible_actions = None;
    }

    // === Messages ===

    /// Journal a message at its natural anchor.
    pub fn push_message(&mut self, message: Message) {
        self.messages.push_back(TextBoxInfo::new(message));
    }

    /// Every message journaled so far.
    #[must_use]
    pub fn messages(&self) -> &Vector<TextBoxInfo> {
        &self.messages
    }

    /// Messages journaled after the first `mark`.
    #[must_use]
    pub fn messages_since(&self, mark: usize) -> Vec<TextBoxInfo> {
        self.messages.iter().skip(mark).cloned().collect()
    }
}
