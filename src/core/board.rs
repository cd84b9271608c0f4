//! Board geometry: tiles, influence zones and building action types.
//!
//! The board is a 4x4 grid of tiles numbered row-major from the north-west
//! corner. Each 2x2 quadrant is an influence zone scored by cube majority.
//!
//! ```text
//!   0  1 |  2  3
//!   4  5 |  6  7
//!  ------+------
//!   8  9 | 10 11
//!  12 13 | 14 15
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Tiles per row.
pub const BOARD_COLUMNS: u8 = 4;

/// Rows on the board.
pub const BOARD_ROWS: u8 = 4;

/// Total number of tiles.
pub const TILE_COUNT: usize = (BOARD_COLUMNS * BOARD_ROWS) as usize;

/// Board location identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u8);

impl TileId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Tile at `(column, row)`, if on the board.
    #[must_use]
    pub const fn from_coords(column: u8, row: u8) -> Option<Self> {
        if column < BOARD_COLUMNS && row < BOARD_ROWS {
            Some(Self(row * BOARD_COLUMNS + column))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        (self.0 as usize) < TILE_COUNT
    }

    #[must_use]
    pub const fn column(self) -> u8 {
        self.0 % BOARD_COLUMNS
    }

    #[must_use]
    pub const fn row(self) -> u8 {
        self.0 / BOARD_COLUMNS
    }

    /// Every tile in board order.
    pub fn all() -> impl Iterator<Item = TileId> {
        (0..TILE_COUNT as u8).map(TileId)
    }

    /// Influence zone containing this tile.
    #[must_use]
    pub const fn zone(self) -> InfluenceZone {
        let east = self.column() >= BOARD_COLUMNS / 2;
        let south = self.row() >= BOARD_ROWS / 2;
        match (south, east) {
            (false, false) => InfluenceZone::NorthWest,
            (false, true) => InfluenceZone::NorthEast,
            (true, false) => InfluenceZone::SouthWest,
            (true, true) => InfluenceZone::SouthEast,
        }
    }

    /// Orthogonal neighbours in board order.
    #[must_use]
    pub fn neighbours(self) -> SmallVec<[TileId; 4]> {
        let (column, row) = (self.column(), self.row());
        let candidates = [
            row.checked_sub(1).and_then(|r| TileId::from_coords(column, r)),
            column.checked_sub(1).and_then(|c| TileId::from_coords(c, row)),
            TileId::from_coords(column + 1, row),
            TileId::from_coords(column, row + 1),
        ];
        candidates.into_iter().flatten().collect()
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// A quadrant of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InfluenceZone {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl InfluenceZone {
    pub const ALL: [InfluenceZone; 4] = [
        InfluenceZone::NorthWest,
        InfluenceZone::NorthEast,
        InfluenceZone::SouthWest,
        InfluenceZone::SouthEast,
    ];

    /// Points for first place in a cube majority.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            InfluenceZone::NorthWest => 3,
            InfluenceZone::NorthEast => 4,
            InfluenceZone::SouthWest => 5,
            InfluenceZone::SouthEast => 6,
        }
    }

    /// Tiles of the zone in board order.
    pub fn tiles(self) -> impl Iterator<Item = TileId> {
        TileId::all().filter(move |t| t.zone() == self)
    }
}

impl std::fmt::Display for InfluenceZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InfluenceZone::NorthWest => "north-west",
            InfluenceZone::NorthEast => "north-east",
            InfluenceZone::SouthWest => "south-west",
            InfluenceZone::SouthEast => "south-east",
        };
        f.write_str(name)
    }
}

/// Action printed on a tile's building.
///
/// Triggered when an architect is placed on the tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    /// Place a cube in the tile's zone.
    Market,
    /// Place or raise a star token in the tile's zone.
    Workshop,
    /// Recruit a leader from the citadel.
    Palace,
    /// Construct the building here or on a neighbouring tile.
    Quarry,
    /// No follow-up.
    Garden,
}

impl ActionType {
    /// The buildings shuffled onto the board at setup, one per tile.
    #[must_use]
    pub fn building_pool() -> Vec<ActionType> {
        let counts = [
            (ActionType::Market, 4),
            (ActionType::Workshop, 4),
            (ActionType::Palace, 3),
            (ActionType::Quarry, 3),
            (ActionType::Garden, 2),
        ];
        counts
            .iter()
            .flat_map(|&(action, count)| std::iter::repeat(action).take(count))
            .collect()
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionType::Market => "market",
            ActionType::Workshop => "workshop",
            ActionType::Palace => "palace",
            ActionType::Quarry => "quarry",
            ActionType::Garden => "garden",
        };
        f.write_str(name)
    }
}
