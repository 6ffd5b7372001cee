//! Obstacle placement
//!
//! New obstacles enter just past a random screen edge, away from both ships.

use glam::Vec2;
use rand::Rng;

use super::obstacle::Obstacle;
use super::state::Ship;
use crate::consts::*;
use crate::{toroidal_distance_squared, wrap_position};

/// Number of obstacles in a fresh wave at the given layout scale
pub fn wave_size(scale: f32) -> usize {
    let scaled = (WAVE_OBSTACLE_COUNT as f32 * scale).round();
    (scaled.max(0.0) as usize).max(WAVE_MIN_OBSTACLES)
}

/// Spawn one obstacle of `size` at a screen edge, clear of every ship
///
/// Rejection sampling is capped; once the cap is hit the last sample is
/// used as-is so placement always terminates.
pub fn spawn_obstacle<R: Rng + ?Sized>(
    size: u8,
    ships: &[Ship],
    bounds: Vec2,
    scale: f32,
    rng: &mut R,
) -> Obstacle {
    let min_distance_sq = (SPAWN_MIN_PLAYER_DISTANCE * scale).powi(2);

    let mut candidate = edge_position(bounds, rng);
    for _ in 1..SPAWN_MAX_ATTEMPTS {
        if clear_of_ships(candidate, ships, bounds, min_distance_sq) {
            return Obstacle::new(candidate, size, rng);
        }
        candidate = edge_position(bounds, rng);
    }

    if !clear_of_ships(candidate, ships, bounds, min_distance_sq) {
        log::warn!(
            "No clear spawn point after {} attempts, placing obstacle at ({:.0}, {:.0})",
            SPAWN_MAX_ATTEMPTS,
            candidate.x,
            candidate.y
        );
    }
    Obstacle::new(candidate, size, rng)
}

/// A full wave of largest-size obstacles
pub fn repopulate<R: Rng + ?Sized>(
    ships: &[Ship],
    bounds: Vec2,
    scale: f32,
    rng: &mut R,
) -> Vec<Obstacle> {
    let count = wave_size(scale);
    (0..count)
        .map(|_| spawn_obstacle(OBSTACLE_MAX_SIZE, ships, bounds, scale, rng))
        .collect()
}

/// Distance is measured around the torus, so a ship hugging one edge is
/// protected from spawns just past the opposite edge.
fn clear_of_ships(pos: Vec2, ships: &[Ship], bounds: Vec2, min_distance_sq: f32) -> bool {
    ships
        .iter()
        .all(|ship| toroidal_distance_squared(ship.pos, pos, bounds) >= min_distance_sq)
}

/// Sample a point just outside one of the four edges, folded onto the torus
fn edge_position<R: Rng + ?Sized>(bounds: Vec2, rng: &mut R) -> Vec2 {
    let raw = match rng.random_range(0..4u8) {
        // Top
        0 => Vec2::new(rng.random_range(0.0..bounds.x), -SPAWN_EDGE_MARGIN),
        // Bottom
        1 => Vec2::new(rng.random_range(0.0..bounds.x), bounds.y + SPAWN_EDGE_MARGIN),
        // Left
        2 => Vec2::new(-SPAWN_EDGE_MARGIN, rng.random_range(0.0..bounds.y)),
        // Right
        _ => Vec2::new(bounds.x + SPAWN_EDGE_MARGIN, rng.random_range(0.0..bounds.y)),
    };
    wrap_position(raw, bounds)
}
