//! Duel Asteroids - two-player asteroids for the arcade cabinet
//!
//! Core modules:
//! - `sim`: Simulation core (ships, projectiles, obstacles, collisions, match state)
//! - `input`: Control-line decoding and keyboard fallback
//! - `platform`: Frame pacing
//! - `renderer`: Read-only frame snapshots and line geometry for a draw backend
//! - `settings`: Screen geometry and seed

pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use input::{ControlDecoder, ControlLine, InputError, KeyboardState};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
///
/// All rates are per second and get scaled by `dt` every step.
pub mod consts {
    /// Width the cabinet layout was tuned for; larger screens are not scaled up
    pub const REFERENCE_WIDTH: f32 = 1280.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 10.0;
    pub const SHIP_STARTING_LIVES: u8 = 5;
    /// Degrees per second at full stick deflection
    pub const SHIP_TURN_RATE: f32 = 150.0;
    /// Thrust acceleration (units/s²)
    pub const SHIP_ACCELERATION: f32 = 720.0;
    /// Linear drag coefficient (1/s)
    pub const SHIP_DAMPING: f32 = 0.3;
    /// Minimum seconds between two shots of the same ship
    pub const SHIP_FIRE_COOLDOWN: f64 = 0.25;
    /// Post-respawn window during which the ship is immobile and untouchable
    pub const SHIP_INVINCIBILITY_SECS: f64 = 3.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 3.0;
    pub const PROJECTILE_MUZZLE_SPEED: f32 = 600.0;
    pub const PROJECTILE_LIFESPAN_SECS: f64 = 2.5;

    /// Obstacle defaults
    pub const OBSTACLE_MAX_SIZE: u8 = 3;
    pub const OBSTACLE_BASE_RADIUS: f32 = 10.0;
    /// Speed floor so a fresh obstacle is never stationary
    pub const OBSTACLE_MIN_SPEED: f32 = 15.0;
    pub const OBSTACLE_MAX_SPEED: f32 = 90.0;
    /// Degrees per second, either direction
    pub const OBSTACLE_MAX_ROTATION_RATE: f32 = 60.0;
    pub const OBSTACLE_MIN_VERTICES: usize = 7;
    pub const OBSTACLE_MAX_VERTICES: usize = 12;
    /// Outline vertex radius jitter as a fraction of the nominal radius
    pub const OBSTACLE_OUTLINE_JITTER: f32 = 0.25;

    /// Spawner defaults
    pub const SPAWN_EDGE_MARGIN: f32 = 30.0;
    /// Minimum distance from either ship at reference scale
    pub const SPAWN_MIN_PLAYER_DISTANCE: f32 = 200.0;
    pub const SPAWN_MAX_ATTEMPTS: u32 = 64;
    /// Wave size at reference scale
    pub const WAVE_OBSTACLE_COUNT: usize = 8;
    pub const WAVE_MIN_OBSTACLES: usize = 3;

    /// Target frame cadence
    pub const TARGET_FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame the simulation will integrate in one step
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Unit vector pointing along a heading given in degrees
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(cos, sin)
}

/// Rotate a vector counter-clockwise (in math orientation) by `degrees`
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    heading_vector(degrees).rotate(v)
}

/// Fold a single coordinate into `[0, extent)`
///
/// Negative values wrap to the far side instead of truncating toward zero.
#[inline]
pub fn wrap_coordinate(value: f32, extent: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid of a tiny negative can round up to exactly `extent`
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Fold a position into the `[0, size.x) × [0, size.y)` torus
#[inline]
pub fn wrap_position(pos: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(wrap_coordinate(pos.x, size.x), wrap_coordinate(pos.y, size.y))
}

/// Squared distance between two points on the `size` torus
///
/// Takes the shorter way around on each axis, so points on opposite edges
/// are close. Inputs need not be wrapped.
#[inline]
pub fn toroidal_distance_squared(a: Vec2, b: Vec2, size: Vec2) -> f32 {
    let axis = |delta: f32, extent: f32| {
        let d = delta.abs().rem_euclid(extent);
        d.min(extent - d)
    };
    let dx = axis(a.x - b.x, size.x);
    let dy = axis(a.y - b.y, size.y);
    dx * dx + dy * dy
}
