//! Per-frame simulation step
//!
//! Phases run in a fixed order; each one sees the results of the previous.

use serde::{Deserialize, Serialize};

use super::collision::{obstacle_hits_ship, projectile_hits_obstacle, projectile_hits_ship};
use super::spawner;
use super::state::{GameEvent, MatchOutcome, MatchPhase, PlayerId, World};

/// One player's controls for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerControls {
    /// Turn intent; anything outside -1..=1 is clamped
    pub turn: i32,
    /// Thrust state after the input layer resolved switch toggles
    pub accelerate: bool,
    /// Fire requested this frame (rising edge on the cabinet)
    pub fire: bool,
}

impl PlayerControls {
    pub fn turn_direction(&self) -> i8 {
        self.turn.clamp(-1, 1) as i8
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub players: [PlayerControls; 2],
}

impl TickInput {
    pub fn controls(&self, id: PlayerId) -> &PlayerControls {
        &self.players[id.index()]
    }

    pub fn controls_mut(&mut self, id: PlayerId) -> &mut PlayerControls {
        &mut self.players[id.index()]
    }
}

/// Advance the world by `dt` seconds and return the resulting match phase
///
/// Never panics on odd input: a negative or non-finite `dt` is treated as
/// zero and out-of-range turn values are clamped.
pub fn step(world: &mut World, input: &TickInput, dt: f32) -> MatchPhase {
    world.events.clear();

    if world.phase.is_over() {
        return world.phase;
    }

    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
    world.dt = dt;
    world.elapsed += f64::from(dt);

    apply_input(world, input);
    integrate(world, dt);
    drop_expired_projectiles(world);
    resolve_projectile_obstacle_hits(world);
    resolve_obstacle_ship_hits(world);
    resolve_projectile_ship_hits(world);
    compact(world);
    repopulate_if_empty(world);
    check_match_end(world);

    world.phase
}

fn apply_input(world: &mut World, input: &TickInput) {
    let now = world.elapsed;
    for ship in world.ships.iter_mut() {
        let controls = input.controls(ship.id);
        ship.turn_direction = controls.turn_direction();
        ship.is_accelerating = controls.accelerate;

        if controls.fire
            && let Some(projectile) = ship.fire(now)
        {
            world.projectiles.push(projectile);
            world.events.push(GameEvent::ShotFired { player: ship.id });
        }
    }
}

fn integrate(world: &mut World, dt: f32) {
    let now = world.elapsed;
    let bounds = world.size;

    for ship in world.ships.iter_mut() {
        ship.integrate(dt, now, bounds);
    }
    for projectile in world.projectiles.iter_mut() {
        projectile.integrate(dt, bounds);
    }
    for obstacle in world.obstacles.iter_mut() {
        obstacle.integrate(dt, bounds);
    }
}

fn drop_expired_projectiles(world: &mut World) {
    let now = world.elapsed;
    world.projectiles.retain(|p| !p.is_expired(now));
}

/// Each obstacle can be destroyed by at most one projectile per frame. A
/// projectile that connects is spent but still resolves against any other
/// obstacle it overlaps this frame.
fn resolve_projectile_obstacle_hits(world: &mut World) {
    let mut children = Vec::new();

    for projectile in world.projectiles.iter_mut() {
        for obstacle in world.obstacles.iter_mut() {
            if obstacle.removed || !projectile_hits_obstacle(projectile, obstacle) {
                continue;
            }

            obstacle.removed = true;
            projectile.expire();
            world.events.push(GameEvent::ObstacleDestroyed {
                size: obstacle.size,
                pos: obstacle.pos,
                by: projectile.owner,
            });
            if let Some(pair) = obstacle.split(&mut world.rng) {
                children.extend(pair);
            }
        }
    }

    world.obstacles.extend(children);
}

/// Ramming destroys the first obstacle found per ship and splits it on the spot
fn resolve_obstacle_ship_hits(world: &mut World) {
    let now = world.elapsed;

    for ship in world.ships.iter_mut() {
        if !ship.is_vulnerable(now) {
            continue;
        }
        let Some(index) = world
            .obstacles
            .iter()
            .position(|o| !o.removed && obstacle_hits_ship(o, ship))
        else {
            continue;
        };
        if !ship.hit(now) {
            continue;
        }

        let obstacle = &mut world.obstacles[index];
        obstacle.removed = true;
        log::debug!(
            "Player {} rammed a size {} obstacle ({} lives left)",
            ship.id.number(),
            obstacle.size,
            ship.lives
        );
        world.events.push(GameEvent::ObstacleDestroyed {
            size: obstacle.size,
            pos: obstacle.pos,
            by: ship.id,
        });
        push_ship_hit_events(&mut world.events, ship.id, ship.lives);

        if let Some(pair) = world.obstacles[index].split(&mut world.rng) {
            world.obstacles.extend(pair);
        }
    }
}

fn resolve_projectile_ship_hits(world: &mut World) {
    let now = world.elapsed;

    for ship in world.ships.iter_mut() {
        if !ship.is_vulnerable(now) {
            continue;
        }
        for projectile in world.projectiles.iter_mut() {
            if projectile.owner == ship.id
                || projectile.is_expired(now)
                || !projectile_hits_ship(projectile, ship)
            {
                continue;
            }
            if ship.hit(now) {
                projectile.expire();
                log::debug!(
                    "Player {} shot player {} ({} lives left)",
                    projectile.owner.number(),
                    ship.id.number(),
                    ship.lives
                );
                push_ship_hit_events(&mut world.events, ship.id, ship.lives);
            }
        }
    }
}

fn push_ship_hit_events(events: &mut Vec<GameEvent>, player: PlayerId, lives_left: u8) {
    events.push(GameEvent::ShipHit { player, lives_left });
    if lives_left == 0 {
        events.push(GameEvent::ShipEliminated { player });
    }
}

fn compact(world: &mut World) {
    let now = world.elapsed;
    world.projectiles.retain(|p| !p.is_expired(now));
    world.obstacles.retain(|o| !o.removed);
}

fn repopulate_if_empty(world: &mut World) {
    if !world.obstacles.is_empty() {
        return;
    }
    world.obstacles = spawner::repopulate(&world.ships, world.size, world.scale, &mut world.rng);
    let count = world.obstacles.len();
    log::info!("Field cleared, spawning a new wave of {}", count);
    world.events.push(GameEvent::WaveSpawned { count });
}

fn check_match_end(world: &mut World) {
    let Some(outcome) = MatchOutcome::from_ships(&world.ships) else {
        return;
    };
    match outcome {
        MatchOutcome::Winner(id) => log::info!("Player {} wins", id.number()),
        MatchOutcome::Draw => log::info!("Both ships destroyed, match drawn"),
    }
    world.phase = MatchPhase::GameOver(outcome);
    world.events.push(GameEvent::MatchOver { outcome });
}
