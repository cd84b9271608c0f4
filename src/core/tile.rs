//! Mutable per-tile facts.
//!
//! A `TileState` tracks what is on a board location: the building and
//! whether it has been constructed (facing up), the star token, the
//! architect standing on it and the cubes of each color.
//!
//! ## Star tokens
//!
//! A star token belongs to one color and counts between `MIN_STARS` and
//! `MAX_STARS`. It is placed with one star and only ever raised one star at
//! a time; any other transition is a `RuleViolation`.

use serde::{Deserialize, Serialize};

use super::board::{ActionType, TileId};
use super::error::RuleViolation;
use super::player::{ColorMap, PlayerColor};

/// Stars on a freshly placed token.
pub const MIN_STARS: u8 = 1;

/// Stars on a complete token.
pub const MAX_STARS: u8 = 3;

/// A star token on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StarToken {
    pub color: PlayerColor,
    pub count: u8,
}

/// State of one board tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileState {
    tile: TileId,
    action_type: ActionType,
    building_facing: bool,
    star_token: Option<StarToken>,
    architect: Option<PlayerColor>,
    cubes: ColorMap<u8>,
}

impl TileState {
    /// An empty tile carrying an unbuilt building.
    #[must_use]
    pub fn new(tile: TileId, action_type: ActionType) -> Self {
        Self {
            tile,
            action_type,
            building_facing: false,
            star_token: None,
            architect: None,
            cubes: ColorMap::with_default(),
        }
    }

    #[must_use]
    pub fn tile(&self) -> TileId {
        self.tile
    }

    #[must_use]
    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// True once the building has been constructed.
    #[must_use]
    pub fn building_facing(&self) -> bool {
        self.building_facing
    }

    #[must_use]
    pub fn star_token(&self) -> Option<StarToken> {
        self.star_token
    }

    /// Stars on the tile, 0 without a token.
    #[must_use]
    pub fn star_count(&self) -> u8 {
        self.star_token.map_or(0, |t| t.count)
    }

    #[must_use]
    pub fn architect(&self) -> Option<PlayerColor> {
        self.architect
    }

    /// Cubes of `color` on this tile.
    #[must_use]
    pub fn cubes(&self, color: PlayerColor) -> u8 {
        self.cubes.get(color).copied().unwrap_or(0)
    }

    /// Cubes of every color.
    #[must_use]
    pub fn cube_counts(&self) -> &ColorMap<u8> {
        &self.cubes
    }

    /// An architect may be placed here.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.architect.is_none() && !self.building_facing
    }

    /// `color` may place or raise a star token here.
    #[must_use]
    pub fn can_raise_star(&self, color: PlayerColor) -> bool {
        match self.star_token {
            None => true,
            Some(token) => token.color == color && token.count < MAX_STARS,
        }
    }

    /// Put a new one-star token owned by `color`.
    pub fn place_star_token(&mut self, color: PlayerColor) -> Result<(), RuleViolation> {
        color.ensure_normal()?;
        if self.star_token.is_some() {
            return Err(RuleViolation::StarTokenPresent { tile: self.tile });
        }
        self.star_token = Some(StarToken {
            color,
            count: MIN_STARS,
        });
        Ok(())
    }

    /// Raise the token of `color` to exactly `nb_stars_after`.
    ///
    /// The token must exist, belong to `color` and hold
    /// `nb_stars_after - 1` stars.
    pub fn increase_star_token(
        &mut self,
        color: PlayerColor,
        nb_stars_after: u8,
    ) -> Result<(), RuleViolation> {
        color.ensure_normal()?;
        let tile = self.tile;
        if !(MIN_STARS + 1..=MAX_STARS).contains(&nb_stars_after) {
            return Err(RuleViolation::StarCountOutOfRange {
                tile,
                requested: nb_stars_after,
            });
        }
        let token = self
            .star_token
            .as_mut()
            .ok_or(RuleViolation::StarTokenMissing { tile })?;
        if token.color != color {
            return Err(RuleViolation::StarTokenOwner {
                tile,
                owner: token.color,
                color,
            });
        }
        if token.count + 1 != nb_stars_after {
            return Err(RuleViolation::StarCountOutOfSequence {
                tile,
                current: token.count,
                requested: nb_stars_after,
            });
        }
        token.count = nb_stars_after;
        Ok(())
    }

    /// Turn the building face up.
    pub fn set_building_facing(&mut self) -> Result<(), RuleViolation> {
        if self.building_facing {
            return Err(RuleViolation::BuildingAlreadyFacing(self.tile));
        }
        self.building_facing = true;
        Ok(())
    }

    /// Stand an architect of `color` here.
    pub fn place_architect(&mut self, color: PlayerColor) -> Result<(), RuleViolation> {
        color.ensure_normal()?;
        if self.building_facing {
            return Err(RuleViolation::BuildingAlreadyFacing(self.tile));
        }
        if self.architect.is_some() {
            return Err(RuleViolation::TileOccupied(self.tile));
        }
        self.architect = Some(color);
        Ok(())
    }

    /// Lift the architect of `color` off this tile.
    pub fn remove_architect(&mut self, color: PlayerColor) -> Result<(), RuleViolation> {
        if self.architect != Some(color) {
            return Err(RuleViolation::ArchitectMissing {
                color,
                tile: self.tile,
            });
        }
        self.architect = None;
        Ok(())
    }

    /// Add one cube of `color`.
    pub fn add_cube(&mut self, color: PlayerColor) -> Result<(), RuleViolation> {
        let count = self
            .cubes
            .get_mut(color)
            .ok_or(RuleViolation::NotNormalColor(color))?;
        *count += 1;
        Ok(())
    }
}
