//! Game state and core simulation types
//!
//! Ships, projectiles and the world that owns them. Obstacles live in
//! `obstacle.rs` since they carry their own shape generation.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::spawner;
use crate::consts::*;
use crate::settings::{Settings, SettingsError};
use crate::{heading_vector, wrap_position};

/// One of the two cabinet players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Player number as shown on screen (1 or 2)
    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    /// Index into per-player arrays
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Fixed spawn point, mirrored across the vertical midline
    pub fn spawn_point(self, screen: Vec2) -> Vec2 {
        match self {
            PlayerId::One => Vec2::new(screen.x / 4.0, screen.y / 2.0),
            PlayerId::Two => Vec2::new(3.0 * screen.x / 4.0, screen.y / 2.0),
        }
    }
}

/// A player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: PlayerId,
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    /// Degrees, unbounded
    pub heading: f32,
    pub radius: f32,
    pub lives: u8,
    /// Thrust state as resolved by the input layer
    pub is_accelerating: bool,
    /// -1, 0 or 1
    pub turn_direction: i8,
    /// Sim time of the last shot, `None` before the first one
    pub last_shot_time: Option<f64>,
    /// End of the post-respawn window, `None` when vulnerable
    pub invincible_until: Option<f64>,
    spawn_point: Vec2,
}

impl Ship {
    pub fn new(id: PlayerId, spawn_point: Vec2) -> Self {
        Self {
            id,
            pos: spawn_point,
            vel: Vec2::ZERO,
            heading: 0.0,
            radius: SHIP_RADIUS,
            lives: SHIP_STARTING_LIVES,
            is_accelerating: false,
            turn_direction: 0,
            last_shot_time: None,
            invincible_until: None,
            spawn_point,
        }
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    /// Out of lives; the record stays around for the end screen
    pub fn is_eliminated(&self) -> bool {
        self.lives == 0
    }

    pub fn is_invincible(&self, now: f64) -> bool {
        self.invincible_until.is_some_and(|until| now < until)
    }

    /// Can be struck by obstacles and enemy fire
    pub fn is_vulnerable(&self, now: f64) -> bool {
        !self.is_eliminated() && !self.is_invincible(now)
    }

    /// Advance the ship by `dt` seconds
    pub fn integrate(&mut self, dt: f32, now: f64, bounds: Vec2) {
        if self.is_eliminated() {
            return;
        }

        self.heading += f32::from(self.turn_direction) * SHIP_TURN_RATE * dt;

        // Respawned ships can aim but not move until the window closes
        if self.is_invincible(now) {
            self.vel = Vec2::ZERO;
            return;
        }
        self.invincible_until = None;

        if self.is_accelerating {
            self.vel += heading_vector(self.heading) * SHIP_ACCELERATION * dt;
        }
        self.vel -= self.vel * (SHIP_DAMPING * dt).min(1.0);
        self.pos = wrap_position(self.pos + self.vel * dt, bounds);
    }

    /// Fire a projectile if alive, vulnerable and off cooldown
    pub fn fire(&mut self, now: f64) -> Option<Projectile> {
        if self.is_eliminated() || self.is_invincible(now) {
            return None;
        }
        if let Some(last) = self.last_shot_time
            && now - last <= SHIP_FIRE_COOLDOWN
        {
            return None;
        }

        self.last_shot_time = Some(now);
        let vel = self.vel + heading_vector(self.heading) * PROJECTILE_MUZZLE_SPEED;
        Some(Projectile::new(self.id, self.pos, vel, now))
    }

    /// Take a hit. Returns false when the hit was ignored.
    ///
    /// The eliminating hit still counts as a hit but does not respawn.
    pub fn hit(&mut self, now: f64) -> bool {
        if !self.is_vulnerable(now) {
            return false;
        }
        self.lives -= 1;
        if self.lives > 0 {
            self.respawn(now);
        }
        true
    }

    /// Return to the spawn point, stopped and facing right, invincible for a while
    pub fn respawn(&mut self, now: f64) {
        self.pos = self.spawn_point;
        self.vel = Vec2::ZERO;
        self.heading = 0.0;
        self.invincible_until = Some(now + SHIP_INVINCIBILITY_SECS);
    }
}

/// A shot fired by a ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: PlayerId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub birth_time: f64,
    /// Seconds; forced to zero when the shot connects
    pub lifespan: f64,
}

impl Projectile {
    pub fn new(owner: PlayerId, pos: Vec2, vel: Vec2, birth_time: f64) -> Self {
        Self {
            owner,
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
            birth_time,
            lifespan: PROJECTILE_LIFESPAN_SECS,
        }
    }

    pub fn integrate(&mut self, dt: f32, bounds: Vec2) {
        self.pos = wrap_position(self.pos + self.vel * dt, bounds);
    }

    pub fn age(&self, now: f64) -> f64 {
        (now - self.birth_time).max(0.0)
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.age(now) >= self.lifespan
    }

    /// Spend the shot; it is dropped at end of frame
    pub fn expire(&mut self) {
        self.lifespan = 0.0;
    }
}

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(PlayerId),
    /// Both ships eliminated in the same frame
    Draw,
}

impl MatchOutcome {
    /// Decide the match from the ships' remaining lives, if it is decided
    pub fn from_ships(ships: &[Ship; 2]) -> Option<Self> {
        match (ships[0].is_eliminated(), ships[1].is_eliminated()) {
            (true, true) => Some(MatchOutcome::Draw),
            (true, false) => Some(MatchOutcome::Winner(ships[1].id)),
            (false, true) => Some(MatchOutcome::Winner(ships[0].id)),
            (false, false) => None,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    Playing,
    /// Terminal; build a fresh world to play again
    GameOver(MatchOutcome),
}

impl MatchPhase {
    pub fn is_over(&self) -> bool {
        matches!(self, MatchPhase::GameOver(_))
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            MatchPhase::GameOver(MatchOutcome::Winner(id)) => Some(*id),
            _ => None,
        }
    }
}

/// Things that happened during a step, for cosmetic layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { player: PlayerId },
    ObstacleDestroyed { size: u8, pos: Vec2, by: PlayerId },
    ShipHit { player: PlayerId, lives_left: u8 },
    ShipEliminated { player: PlayerId },
    WaveSpawned { count: usize },
    MatchOver { outcome: MatchOutcome },
}

/// Complete simulation state for one match
#[derive(Debug, Clone)]
pub struct World {
    /// Toroidal extent (screen size)
    pub size: Vec2,
    /// Layout scale relative to the reference cabinet
    pub scale: f32,
    /// Simulation clock in seconds
    pub elapsed: f64,
    /// Time step of the most recent frame
    pub dt: f32,
    pub ships: [Ship; 2],
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub phase: MatchPhase,
    /// Events from the most recent step
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
}

impl World {
    /// Start a match: both ships at their spawn points and a first wave
    ///
    /// Fails if the screen size cannot hold a torus.
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let size = settings.screen_size();
        let scale = settings.scale_factor();
        let ships = PlayerId::ALL.map(|id| Ship::new(id, id.spawn_point(size)));
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let obstacles = spawner::repopulate(&ships, size, scale, &mut rng);

        log::info!(
            "Match started on {}x{} (scale {:.2}, seed {}, {} obstacles)",
            size.x,
            size.y,
            scale,
            settings.seed,
            obstacles.len()
        );

        Ok(Self {
            size,
            scale,
            elapsed: 0.0,
            dt: 0.0,
            ships,
            projectiles: Vec::new(),
            obstacles,
            phase: MatchPhase::Playing,
            events: Vec::new(),
            rng,
        })
    }

    pub fn ship(&self, id: PlayerId) -> &Ship {
        &self.ships[id.index()]
    }

    pub fn ship_mut(&mut self, id: PlayerId) -> &mut Ship {
        &mut self.ships[id.index()]
    }
}
