//! Match-level behavior driven through the public API

use duel_asteroids::{Settings, SettingsError, toroidal_distance_squared};
use duel_asteroids::consts::*;
use duel_asteroids::sim::{
    GameEvent, MatchOutcome, MatchPhase, Obstacle, PlayerId, Projectile, Ship, TickInput, World,
    step,
};
use glam::Vec2;
use proptest::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn world_with_screen(width: f32, height: f32) -> World {
    World::new(&Settings::with_screen(width, height)).expect("valid screen")
}

/// Stationary obstacle so tests control exactly what overlaps
fn parked_obstacle(world: &mut World, pos: Vec2, size: u8) -> Obstacle {
    let mut obstacle = Obstacle::new(pos, size, &mut world.rng);
    obstacle.vel = Vec2::ZERO;
    obstacle
}

fn in_bounds(pos: Vec2, bounds: Vec2) -> bool {
    pos.x >= 0.0 && pos.x < bounds.x && pos.y >= 0.0 && pos.y < bounds.y
}

#[test]
fn scenario_a_thrust_one_second() {
    let mut ship = Ship::new(PlayerId::One, Vec2::new(100.0, 100.0));
    ship.is_accelerating = true;
    ship.integrate(1.0, 0.0, Vec2::new(2000.0, 2000.0));

    let expected = SHIP_ACCELERATION * (1.0 - SHIP_DAMPING);
    assert!((ship.vel.x - expected).abs() < 1e-3);
    assert!(ship.vel.y.abs() < 1e-3);
    assert!((ship.pos.x - (100.0 + expected)).abs() < 1e-3);
    assert!((ship.pos.y - 100.0).abs() < 1e-3);
}

#[test]
fn scenario_b_projectile_splits_large_obstacle() {
    let mut world = world_with_screen(1280.0, 720.0);
    world.obstacles.clear();
    let target = parked_obstacle(&mut world, Vec2::new(500.0, 500.0), 3);
    world.obstacles.push(target);
    world.projectiles.push(Projectile::new(
        PlayerId::One,
        Vec2::new(510.0, 500.0),
        Vec2::ZERO,
        0.0,
    ));

    step(&mut world, &TickInput::default(), DT);

    assert_eq!(world.obstacles.len(), 2);
    for child in &world.obstacles {
        assert_eq!(child.size, 2);
        assert_eq!(child.pos, Vec2::new(500.0, 500.0));
        assert!(child.vel.length() > 0.0);
    }
    assert!(world.projectiles.is_empty());
}

#[test]
fn scenario_c_last_life_lost_to_obstacle() {
    let mut world = world_with_screen(1280.0, 720.0);
    world.obstacles.clear();
    let crash_site = Vec2::new(200.0, 600.0);
    {
        let ship = world.ship_mut(PlayerId::One);
        ship.lives = 1;
        ship.pos = crash_site;
    }
    let rock = parked_obstacle(&mut world, crash_site + Vec2::new(15.0, 0.0), 2);
    world.obstacles.push(rock);

    let phase = step(&mut world, &TickInput::default(), DT);

    let ship = world.ship(PlayerId::One);
    assert_eq!(ship.lives, 0);
    assert_eq!(ship.pos, crash_site, "eliminated ship must not respawn");
    assert!(ship.invincible_until.is_none());
    assert_eq!(phase, MatchPhase::GameOver(MatchOutcome::Winner(PlayerId::Two)));
    // Rammed obstacle still split
    assert_eq!(world.obstacles.iter().filter(|o| o.size == 1).count(), 2);
}

#[test]
fn scenario_d_empty_field_repopulates_away_from_ships() {
    for (width, height) in [(1280.0, 720.0), (1920.0, 1080.0), (640.0, 480.0)] {
        let mut world = world_with_screen(width, height);
        world.obstacles.clear();

        step(&mut world, &TickInput::default(), DT);

        let expected = (WAVE_OBSTACLE_COUNT as f32 * world.scale).round() as usize;
        assert_eq!(world.obstacles.len(), expected.max(WAVE_MIN_OBSTACLES));
        assert!(world.events.iter().any(|e| matches!(e, GameEvent::WaveSpawned { .. })));

        let min_distance = SPAWN_MIN_PLAYER_DISTANCE * world.scale;
        for obstacle in &world.obstacles {
            assert_eq!(obstacle.size, OBSTACLE_MAX_SIZE);
            assert!(in_bounds(obstacle.pos, world.size));
            for ship in &world.ships {
                let d_sq = toroidal_distance_squared(ship.pos, obstacle.pos, world.size);
                assert!(d_sq.sqrt() >= min_distance);
            }
        }
    }
}

#[test]
fn degenerate_screen_is_an_error() {
    let err = World::new(&Settings::with_screen(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidDimensions { .. }));
}

#[test]
fn elimination_is_terminal() {
    let mut world = world_with_screen(1280.0, 720.0);
    world.obstacles.clear();
    let far_rock = parked_obstacle(&mut world, Vec2::new(640.0, 40.0), 1);
    world.obstacles.push(far_rock);
    world.ship_mut(PlayerId::Two).lives = 1;
    let p2 = world.ship(PlayerId::Two).pos;
    world
        .projectiles
        .push(Projectile::new(PlayerId::One, p2, Vec2::ZERO, 0.0));

    let phase = step(&mut world, &TickInput::default(), DT);
    assert_eq!(phase.winner(), Some(PlayerId::One));
    let over_events = world
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::MatchOver { .. }))
        .count();
    assert_eq!(over_events, 1);

    for _ in 0..10 {
        let phase = step(&mut world, &TickInput::default(), DT);
        assert_eq!(phase.winner(), Some(PlayerId::One));
        assert!(world.events.is_empty());
    }

    let now = world.elapsed;
    let loser = world.ship_mut(PlayerId::Two);
    assert!(!loser.hit(now + 100.0));
    assert_eq!(loser.lives, 0);
}

#[test]
fn cooldown_allows_one_shot_per_window() {
    let mut world = world_with_screen(1280.0, 720.0);
    let mut input = TickInput::default();
    input.controls_mut(PlayerId::Two).fire = true;

    // 0.2s of held fire at 60 Hz stays inside one cooldown window
    for _ in 0..12 {
        step(&mut world, &input, DT);
    }
    let shots = world
        .projectiles
        .iter()
        .filter(|p| p.owner == PlayerId::Two)
        .count();
    assert_eq!(shots, 1);
}

#[test]
fn full_match_stays_in_bounds() {
    let mut world = world_with_screen(1024.0, 600.0);
    let mut input = TickInput::default();
    input.controls_mut(PlayerId::One).accelerate = true;
    input.controls_mut(PlayerId::One).turn = 1;
    input.controls_mut(PlayerId::One).fire = true;
    input.controls_mut(PlayerId::Two).accelerate = true;
    input.controls_mut(PlayerId::Two).turn = -3;
    input.controls_mut(PlayerId::Two).fire = true;

    for _ in 0..3600 {
        step(&mut world, &input, DT);
        for ship in &world.ships {
            assert!(in_bounds(ship.pos, world.size));
        }
        for projectile in &world.projectiles {
            assert!(in_bounds(projectile.pos, world.size));
        }
        for obstacle in &world.obstacles {
            assert!(in_bounds(obstacle.pos, world.size));
            assert!(!obstacle.removed);
        }
        if world.phase.is_over() {
            break;
        }
    }
}

proptest! {
    #[test]
    fn prop_integrate_wraps_every_entity(
        x in 0.0f32..1280.0,
        y in 0.0f32..720.0,
        vx in -1.0e5f32..1.0e5,
        vy in -1.0e5f32..1.0e5,
        dt in 0.0f32..10.0,
    ) {
        let bounds = Vec2::new(1280.0, 720.0);
        let pos = Vec2::new(x, y);
        let vel = Vec2::new(vx, vy);

        let mut ship = Ship::new(PlayerId::One, pos);
        ship.vel = vel;
        ship.is_accelerating = true;
        ship.integrate(dt, 0.0, bounds);
        prop_assert!(in_bounds(ship.pos, bounds));

        let mut projectile = Projectile::new(PlayerId::Two, pos, vel, 0.0);
        projectile.integrate(dt, bounds);
        prop_assert!(in_bounds(projectile.pos, bounds));

        let mut world = world_with_screen(bounds.x, bounds.y);
        let mut obstacle = Obstacle::new(pos, 2, &mut world.rng);
        obstacle.vel = vel;
        obstacle.integrate(dt, bounds);
        prop_assert!(in_bounds(obstacle.pos, bounds));
    }

    #[test]
    fn prop_invincible_ship_keeps_lives(
        offset_x in -20.0f32..20.0,
        offset_y in -20.0f32..20.0,
        frames in 1usize..170,
    ) {
        let mut world = World::new(&Settings::default()).expect("default settings");
        world.obstacles.clear();
        let now = world.elapsed;
        world.ship_mut(PlayerId::One).respawn(now);
        let lives = world.ship(PlayerId::One).lives;
        let p1 = world.ship(PlayerId::One).pos + Vec2::new(offset_x, offset_y);

        let rock = parked_obstacle(&mut world, p1, 3);
        world.obstacles.push(rock);
        for _ in 0..4 {
            world.projectiles.push(Projectile::new(PlayerId::Two, p1, Vec2::ZERO, 0.0));
        }

        // 170 frames at 60 Hz stays inside the three second window
        for _ in 0..frames {
            step(&mut world, &TickInput::default(), DT);
            prop_assert_eq!(world.ship(PlayerId::One).lives, lives);
        }
    }
}
