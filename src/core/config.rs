//! Game configuration.
//!
//! `GameConfig` holds the rule constants the controller reads: seat limits,
//! reserves, century count, citadel size and the decision loop guard.
//! Defaults describe the standard game; tests and variants adjust them with
//! the `with_*` builder methods and check them with `validate`.

use serde::{Deserialize, Serialize};

use super::error::SetupError;
use super::leader::Leader;
use super::player::PlayerColor;

/// Complete rule configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fewest players allowed.
    pub min_players: usize,

    /// Most players allowed (at most the number of normal colors).
    pub max_players: usize,

    /// Cubes each player starts with, including the starting cube.
    pub cubes_per_player: u8,

    /// Architects each player places per century.
    pub architects_per_player: u8,

    /// Number of centuries before final scoring.
    pub centuries: u8,

    /// Leaders drawn into the citadel at the start of each century.
    pub citadel_size: usize,

    /// Upper bound on skip iterations while looking for a decision point.
    pub max_decision_iterations: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: PlayerColor::NORMAL.len(),
            cubes_per_player: 12,
            architects_per_player: 2,
            centuries: 3,
            citadel_size: 3,
            max_decision_iterations: 64,
        }
    }
}

impl GameConfig {
    /// Standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_player_range(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    #[must_use]
    pub fn with_cubes_per_player(mut self, cubes: u8) -> Self {
        self.cubes_per_player = cubes;
        self
    }

    #[must_use]
    pub fn with_architects_per_player(mut self, architects: u8) -> Self {
        self.architects_per_player = architects;
        self
    }

    #[must_use]
    pub fn with_centuries(mut self, centuries: u8) -> Self {
        self.centuries = centuries;
        self
    }

    #[must_use]
    pub fn with_citadel_size(mut self, size: usize) -> Self {
        self.citadel_size = size;
        self
    }

    #[must_use]
    pub fn with_max_decision_iterations(mut self, iterations: usize) -> Self {
        self.max_decision_iterations = iterations;
        self
    }

    /// Smallest `max_decision_iterations` that always reaches a decision:
    /// one pass around the table, or a close of every century followed by
    /// the end of the game.
    #[must_use]
    pub fn min_decision_iterations(&self) -> usize {
        self.max_players.max(usize::from(self.centuries) + 1) + 1
    }

    /// Check the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), SetupError> {
        let invalid = |reason: &str| Err(SetupError::InvalidConfig(reason.to_string()));

        if self.min_players == 0 || self.min_players > self.max_players {
            return invalid("player range is empty");
        }
        if self.max_players > PlayerColor::NORMAL.len() {
            return invalid("more players than colors");
        }
        // One cube goes on the board at setup.
        if self.cubes_per_player == 0 {
            return invalid("players need a starting cube");
        }
        if self.architects_per_player == 0 {
            return invalid("players need at least one architect");
        }
        if self.centuries == 0 {
            return invalid("game needs at least one century");
        }
        if self.citadel_size > Leader::ALL.len() {
            return invalid("citadel larger than the leader deck");
        }
        if self.max_decision_iterations < self.min_decision_iterations() {
            return invalid("decision loop guard too small to reach a decision");
        }
        Ok(())
    }
}
