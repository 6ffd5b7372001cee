//! Drifting rocks that split when destroyed
//!
//! Each obstacle carries a jagged outline generated once at creation. The
//! outline is purely visual; collisions use the nominal radius.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{heading_vector, rotate_degrees, wrap_position};

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1..=3, 3 being the largest
    pub size: u8,
    /// `size * OBSTACLE_BASE_RADIUS`
    pub radius: f32,
    /// Degrees
    pub rotation: f32,
    /// Degrees per second
    pub rotation_rate: f32,
    /// Outline vertices relative to the center, unrotated
    pub outline: Vec<Vec2>,
    /// Destroyed this frame; dropped at end-of-frame compaction
    #[serde(skip)]
    pub removed: bool,
}

impl Obstacle {
    /// Create an obstacle with random drift, spin and outline
    pub fn new<R: Rng + ?Sized>(pos: Vec2, size: u8, rng: &mut R) -> Self {
        let size = size.clamp(1, OBSTACLE_MAX_SIZE);
        let radius = f32::from(size) * OBSTACLE_BASE_RADIUS;

        let speed = rng.random_range(OBSTACLE_MIN_SPEED..=OBSTACLE_MAX_SPEED);
        let direction = rng.random_range(0.0..360.0);
        let rotation_rate =
            rng.random_range(-OBSTACLE_MAX_ROTATION_RATE..=OBSTACLE_MAX_ROTATION_RATE);

        Self {
            pos,
            vel: heading_vector(direction) * speed,
            size,
            radius,
            rotation: 0.0,
            rotation_rate,
            outline: jagged_outline(radius, rng),
            removed: false,
        }
    }

    pub fn integrate(&mut self, dt: f32, bounds: Vec2) {
        self.pos = wrap_position(self.pos + self.vel * dt, bounds);
        self.rotation += self.rotation_rate * dt;
    }

    /// Two fresh obstacles one size down at the same spot, or nothing for the smallest
    pub fn split<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<[Obstacle; 2]> {
        if self.size <= 1 {
            return None;
        }
        let child_size = self.size - 1;
        Some([
            Obstacle::new(self.pos, child_size, rng),
            Obstacle::new(self.pos, child_size, rng),
        ])
    }

    /// Outline in world space, rotated and translated
    pub fn world_outline(&self) -> Vec<Vec2> {
        self.outline
            .iter()
            .map(|&p| self.pos + rotate_degrees(p, self.rotation))
            .collect()
    }
}

/// Evenly spaced vertices with each radius jittered around the nominal one
fn jagged_outline<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec<Vec2> {
    let count = rng.random_range(OBSTACLE_MIN_VERTICES..=OBSTACLE_MAX_VERTICES);
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * 360.0;
            let jitter = rng.random_range(-OBSTACLE_OUTLINE_JITTER..=OBSTACLE_OUTLINE_JITTER);
            heading_vector(angle) * radius * (1.0 + jitter)
        })
        .collect()
}
