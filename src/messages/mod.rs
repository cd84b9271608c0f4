//! Explanatory messages.
//!
//! The core journals a `TextBoxInfo` whenever something happens that a
//! player would want explained: a century starting, points being scored, a
//! tile action being skipped, the game ending. Each message carries the
//! board location a presentation layer should point at. The core never
//! reads its own messages back.

use serde::{Deserialize, Serialize};

use crate::core::{ActionType, InfluenceZone, PlayerColor, TileId};

/// Why points were scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreReason {
    /// Cube majority in a zone at the end of a century.
    ZoneMajority { zone: InfluenceZone, cubes: u32 },
    /// A star token at the end of a century.
    StarTokens { tile: TileId, stars: u8 },
    /// Building constructed through a quarry.
    Construction { tile: TileId },
    /// Leaders held at the end of the game.
    Leaders { count: usize },
}

/// A message variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Message {
    CenturyStarted {
        century: u8,
    },
    PointsScored {
        color: PlayerColor,
        points: u32,
        reason: ScoreReason,
    },
    /// The follow-up of a tile offered nothing to choose.
    ActionSkipped {
        color: PlayerColor,
        tile: TileId,
        action_type: ActionType,
    },
    GameOver {
        winners: Vec<PlayerColor>,
        score: u32,
    },
}

impl Message {
    /// Where on the board this message belongs.
    #[must_use]
    pub fn anchor(&self) -> BoardAnchor {
        match self {
            Message::CenturyStarted { .. } => BoardAnchor::Citadel,
            Message::PointsScored { color, reason, .. } => match *reason {
                ScoreReason::ZoneMajority { zone, .. } => BoardAnchor::Zone(zone),
                ScoreReason::StarTokens { tile, .. } | ScoreReason::Construction { tile } => {
                    BoardAnchor::Tile(tile)
                }
                ScoreReason::Leaders { .. } => BoardAnchor::Player(*color),
            },
            Message::ActionSkipped { tile, .. } => BoardAnchor::Tile(*tile),
            Message::GameOver { .. } => BoardAnchor::Board,
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::CenturyStarted { century } => write!(f, "century {century} begins"),
            Message::PointsScored {
                color,
                points,
                reason,
            } => {
                write!(f, "{color} scores {points}")?;
                match reason {
                    ScoreReason::ZoneMajority { zone, cubes } => {
                        write!(f, " with {cubes} cubes in the {zone} zone")
                    }
                    ScoreReason::StarTokens { tile, stars } => {
                        write!(f, " for {stars} stars on {tile}")
                    }
                    ScoreReason::Construction { tile } => write!(f, " for building on {tile}"),
                    ScoreReason::Leaders { count } => write!(f, " for {count} leaders"),
                }
            }
            Message::ActionSkipped {
                color,
                tile,
                action_type,
            } => write!(f, "{color} has nothing to do with the {action_type} on {tile}"),
            Message::GameOver { winners, score } => {
                let names: Vec<String> = winners.iter().map(ToString::to_string).collect();
                let verb = if names.len() == 1 { "wins" } else { "share the win" };
                write!(f, "{} {verb} with {score} points", names.join(" and "))
            }
        }
    }
}

/// Board location a message points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardAnchor {
    Tile(TileId),
    Zone(InfluenceZone),
    Citadel,
    Player(PlayerColor),
    Board,
}

/// A message together with its anchor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextBoxInfo {
    pub message: Message,
    pub anchor: BoardAnchor,
}

impl TextBoxInfo {
    /// Anchor `message` at its natural location.
    #[must_use]
    pub fn new(message: Message) -> Self {
        let anchor = message.anchor();
        Self { message, anchor }
    }
}

impl From<Message> for TextBoxInfo {
    fn from(message: Message) -> Self {
        Self::new(message)
    }
}
