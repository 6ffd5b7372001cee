//! Rendering-facing views
//!
//! The draw backend never touches `World` directly. After each step it takes
//! a `FrameView` snapshot and turns it into line geometry with `shapes`.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{MatchOutcome, MatchPhase, PlayerId, Ship, World};

/// Invincible ships alternate hidden/shown at this period
pub const BLINK_INTERVAL_MS: u64 = 200;

pub fn player_color(id: PlayerId) -> [f32; 4] {
    match id {
        PlayerId::One => colors::PLAYER_ONE,
        PlayerId::Two => colors::PLAYER_TWO,
    }
}

/// Whether a ship is drawn this frame
///
/// Eliminated ships are hidden; respawning ships blink.
pub fn ship_visible(ship: &Ship, now: f64) -> bool {
    if ship.is_eliminated() {
        return false;
    }
    if ship.is_invincible(now) {
        let ms = (now.max(0.0) * 1000.0) as u64;
        return (ms / BLINK_INTERVAL_MS) % 2 != 0;
    }
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub id: PlayerId,
    pub pos: Vec2,
    pub heading: f32,
    pub color: [f32; 4],
    pub lives: u8,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub owner: PlayerId,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub pos: Vec2,
    pub rotation: f32,
    pub size: u8,
    /// World-space outline
    pub outline: Vec<Vec2>,
}

/// Read-only snapshot of everything a frame draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub elapsed: f64,
    pub screen: Vec2,
    pub ships: [ShipView; 2],
    pub projectiles: Vec<ProjectileView>,
    pub obstacles: Vec<ObstacleView>,
    pub phase: MatchPhase,
}

impl FrameView {
    pub fn capture(world: &World) -> Self {
        let now = world.elapsed;
        let ships = world.ships.each_ref().map(|ship| ShipView {
            id: ship.id,
            pos: ship.pos,
            heading: ship.heading,
            color: player_color(ship.id),
            lives: ship.lives,
            visible: ship_visible(ship, now),
        });
        let projectiles = world
            .projectiles
            .iter()
            .map(|p| ProjectileView {
                owner: p.owner,
                pos: p.pos,
            })
            .collect();
        let obstacles = world
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                pos: o.pos,
                rotation: o.rotation,
                size: o.size,
                outline: o.world_outline(),
            })
            .collect();

        Self {
            elapsed: now,
            screen: world.size,
            ships,
            projectiles,
            obstacles,
            phase: world.phase,
        }
    }

    /// End-of-match banner text, if the match is over
    pub fn banner(&self) -> Option<String> {
        match self.phase {
            MatchPhase::Playing => None,
            MatchPhase::GameOver(MatchOutcome::Winner(id)) => {
                Some(format!("Player {} Wins!", id.number()))
            }
            MatchPhase::GameOver(MatchOutcome::Draw) => Some("Draw!".to_string()),
        }
    }

    /// All geometry for the frame as one line list
    pub fn line_list(&self) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for obstacle in &self.obstacles {
            vertices.extend(shapes::obstacle_lines(obstacle, colors::OBSTACLE));
        }
        vertices.extend(shapes::projectile_lines(&self.projectiles, colors::PROJECTILE));
        for ship in &self.ships {
            vertices.extend(shapes::ship_lines(ship));
            vertices.extend(shapes::lives_pips(ship, self.screen));
        }
        vertices
    }
}
