//! Player colors and per-player data.
//!
//! ## PlayerColor
//!
//! Identity of each of up to five seated players, plus the `None` sentinel
//! used for unowned things. "Normal" colors exclude the sentinel.
//!
//! ## ColorMap
//!
//! Per-color storage backed by a `Vec` with one slot per normal color.
//!
//! ## PlayerState
//!
//! Reserves, score and leaders of one seated player.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::RuleViolation;
use super::leader::Leader;

/// Player identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerColor {
    Black,
    White,
    Orange,
    Gray,
    Brown,
    /// Neutral sentinel. Never seated.
    None,
}

impl PlayerColor {
    /// Every color a player can be seated as, in index order.
    pub const NORMAL: [PlayerColor; 5] = [
        PlayerColor::Black,
        PlayerColor::White,
        PlayerColor::Orange,
        PlayerColor::Gray,
        PlayerColor::Brown,
    ];

    /// Check if this is a seatable color.
    #[must_use]
    pub const fn is_normal(self) -> bool {
        !matches!(self, PlayerColor::None)
    }

    /// Index into `NORMAL`, or `None` for the sentinel.
    #[must_use]
    pub const fn normal_index(self) -> Option<usize> {
        match self {
            PlayerColor::Black => Some(0),
            PlayerColor::White => Some(1),
            PlayerColor::Orange => Some(2),
            PlayerColor::Gray => Some(3),
            PlayerColor::Brown => Some(4),
            PlayerColor::None => None,
        }
    }

    /// Return `self` if normal, a `NotNormalColor` violation otherwise.
    pub fn ensure_normal(self) -> Result<Self, RuleViolation> {
        if self.is_normal() {
            Ok(self)
        } else {
            Err(RuleViolation::NotNormalColor(self))
        }
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayerColor::Black => "black",
            PlayerColor::White => "white",
            PlayerColor::Orange => "orange",
            PlayerColor::Gray => "gray",
            PlayerColor::Brown => "brown",
            PlayerColor::None => "none",
        };
        f.write_str(name)
    }
}

/// Per-color data storage with O(1) access.
///
/// Holds one entry per normal color. Lookups with `PlayerColor::None`
/// return `None`.
///
/// ## Example
///
/// ```
/// use rust_citadel::core::{ColorMap, PlayerColor};
///
/// let mut cubes: ColorMap<u8> = ColorMap::with_default();
/// if let Some(count) = cubes.get_mut(PlayerColor::Orange) {
///     *count += 2;
/// }
///
/// assert_eq!(cubes.get(PlayerColor::Orange), Some(&2));
/// assert_eq!(cubes.get(PlayerColor::None), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: Vec<T>,
}

impl<T> ColorMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerColor) -> T) -> Self {
        Self {
            data: PlayerColor::NORMAL.iter().map(|&c| factory(c)).collect(),
        }
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a color's entry.
    #[must_use]
    pub fn get(&self, color: PlayerColor) -> Option<&T> {
        color.normal_index().map(|i| &self.data[i])
    }

    /// Get a color's entry mutably.
    pub fn get_mut(&mut self, color: PlayerColor) -> Option<&mut T> {
        match color.normal_index() {
            Some(i) => Some(&mut self.data[i]),
            None => None,
        }
    }

    /// Iterate over (PlayerColor, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerColor, &T)> {
        PlayerColor::NORMAL.iter().copied().zip(self.data.iter())
    }
}

/// Mutable facts about one seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    color: PlayerColor,
    cubes: u8,
    architects: u8,
    score: u32,
    leaders: Vector<Leader>,
}

impl PlayerState {
    /// Create a player with full reserves and no score.
    #[must_use]
    pub fn new(color: PlayerColor, cubes: u8, architects: u8) -> Self {
        Self {
            color,
            cubes,
            architects,
            score: 0,
            leaders: Vector::new(),
        }
    }

    #[must_use]
    pub fn color(&self) -> PlayerColor {
        self.color
    }

    /// Cubes left in reserve.
    #[must_use]
    pub fn cubes(&self) -> u8 {
        self.cubes
    }

    /// Architects left in reserve.
    #[must_use]
    pub fn architects(&self) -> u8 {
        self.architects
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Leaders held, in recruitment order.
    #[must_use]
    pub fn leaders(&self) -> &Vector<Leader> {
        &self.leaders
    }

    pub(crate) fn leaders_mut(&mut self) -> &mut Vector<Leader> {
        &mut self.leaders
    }

    /// Take one cube out of reserve.
    pub fn take_cube(&mut self) -> Result<(), RuleViolation> {
        self.cubes = self
            .cubes
            .checked_sub(1)
            .ok_or(RuleViolation::NoCubeInReserve(self.color))?;
        Ok(())
    }

    /// Take one architect out of reserve.
    pub fn take_architect(&mut self) -> Result<(), RuleViolation> {
        self.architects = self
            .architects
            .checked_sub(1)
            .ok_or(RuleViolation::NoArchitectInReserve(self.color))?;
        Ok(())
    }

    /// Put an architect back in reserve.
    pub fn return_architect(&mut self) {
        self.architects += 1;
    }

    /// Add points to the score.
    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }
}
