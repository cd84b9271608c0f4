//! Scoring.
//!
//! Scoring produces `ScorePoints` changes rather than mutating the state,
//! so the points show up in the change log and the message journal.
//!
//! ## Zone majority
//!
//! Players are ranked by cubes in the zone. First place scores the zone
//! value, second place half of it (rounded down). Tied players share the
//! rank and each scores it in full; the following rank is skipped. Players
//! without a cube in the zone never score.

use rustc_hash::FxHashMap;

use super::controller::GameResult;
use crate::changes::GameStateChange;
use crate::core::{GameState, InfluenceZone, PlayerColor, RuleViolation};
use crate::messages::ScoreReason;

/// Points awarded per majority rank, as a share of the zone value.
fn rank_points(zone: InfluenceZone, rank: usize) -> u32 {
    match rank {
        0 => zone.points(),
        1 => zone.points() / 2,
        _ => 0,
    }
}

/// Cube count per color in `zone`.
fn zone_tally(
    state: &GameState,
    zone: InfluenceZone,
) -> Result<FxHashMap<PlayerColor, u32>, RuleViolation> {
    let mut tally = FxHashMap::default();
    for tile in zone.tiles() {
        for (color, &cubes) in state.find_tile_state(tile)?.cube_counts().iter() {
            if cubes > 0 {
                *tally.entry(color).or_insert(0) += u32::from(cubes);
            }
        }
    }
    Ok(tally)
}

/// Majority points of one zone, in rank then turn order.
pub fn zone_majority(
    state: &GameState,
    zone: InfluenceZone,
) -> Result<Vec<GameStateChange>, RuleViolation> {
    let tally = zone_tally(state, zone)?;
    let mut ranked: Vec<(PlayerColor, u32)> = state
        .turn_order()
        .filter_map(|color| tally.get(&color).map(|&cubes| (color, cubes)))
        .collect();
    // Stable: ties keep turn order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut changes = Vec::new();
    for &(color, cubes) in &ranked {
        let rank = ranked.iter().take_while(|(_, c)| *c > cubes).count();
        let points = rank_points(zone, rank);
        if points > 0 {
            changes.push(GameStateChange::ScorePoints {
                color,
                points,
                reason: ScoreReason::ZoneMajority { zone, cubes },
            });
        }
    }
    Ok(changes)
}

/// Star token points: the star count, doubled on a constructed building.
pub fn star_tokens(state: &GameState) -> Vec<GameStateChange> {
    state
        .tiles()
        .iter()
        .filter_map(|tile| {
            let token = tile.star_token()?;
            let factor = if tile.building_facing() { 2 } else { 1 };
            Some(GameStateChange::ScorePoints {
                color: token.color,
                points: u32::from(token.count) * factor,
                reason: ScoreReason::StarTokens {
                    tile: tile.tile(),
                    stars: token.count,
                },
            })
        })
        .collect()
}

/// Everything scored when a century closes.
pub fn century_scoring(state: &GameState) -> Result<Vec<GameStateChange>, RuleViolation> {
    let mut changes = Vec::new();
    for zone in InfluenceZone::ALL {
        changes.extend(zone_majority(state, zone)?);
    }
    changes.extend(star_tokens(state));
    Ok(changes)
}

/// Leader points added at the end of the game.
pub fn leader_scoring(state: &GameState) -> Vec<GameStateChange> {
    state
        .players()
        .iter()
        .filter(|player| !player.leaders().is_empty())
        .map(|player| GameStateChange::ScorePoints {
            color: player.color(),
            points: player.leaders().iter().map(|l| l.points()).sum(),
            reason: ScoreReason::Leaders {
                count: player.leaders().len(),
            },
        })
        .collect()
}

/// Scores, highest first. Ties keep turn order.
#[must_use]
pub fn standings(state: &GameState) -> Vec<(PlayerColor, u32)> {
    let mut scores: Vec<(PlayerColor, u32)> = state
        .players()
        .iter()
        .map(|p| (p.color(), p.score()))
        .collect();
    scores.sort_by(|a, b| b.1.cmp(&a.1));
    scores
}

/// The highest score wins; a tie is a shared victory.
#[must_use]
pub fn game_result(state: &GameState) -> Option<GameResult> {
    let standings = standings(state);
    let best = standings.first()?.1;
    let mut winners: Vec<PlayerColor> = standings
        .iter()
        .take_while(|(_, score)| *score == best)
        .map(|&(color, _)| color)
        .collect();
    if winners.len() == 1 {
        winners.pop().map(GameResult::Winner)
    } else {
        Some(GameResult::Winners(winners))
    }
}
