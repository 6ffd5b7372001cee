//! Duel Asteroids entry point
//!
//! Headless native driver. Usage:
//!
//! ```text
//! duel-asteroids [settings.json] [controls.txt]
//! ```
//!
//! With a control capture (one board line per frame) the match is replayed
//! from it at cabinet speed; otherwise both ships fly on autopilot. The final frame is
//! printed to stdout as JSON.

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::time::Instant;

use duel_asteroids::consts::TARGET_FRAME_DT;
use duel_asteroids::platform::FrameClock;
use duel_asteroids::renderer::FrameView;
use duel_asteroids::sim::{GameEvent, PlayerControls, PlayerId, TickInput, World, step};
use duel_asteroids::{ControlDecoder, Settings};

/// Longest autopilot match in simulated seconds
const DEMO_SECONDS: f32 = 180.0;
/// Autopilot stops turning when this close to its target bearing (degrees)
const AIM_TOLERANCE: f32 = 5.0;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    log::info!("Duel Asteroids (native) starting...");

    let mut world = World::new(&settings)?;
    match args.next() {
        Some(path) => replay(&mut world, &path)?,
        None => autoplay(&mut world),
    }

    let view = FrameView::capture(&world);
    match view.banner() {
        Some(banner) => log::info!("{banner}"),
        None => log::info!("Match still running after {:.1}s", world.elapsed),
    }
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// Feed one captured board line per frame, paced like the cabinet loop
fn replay(world: &mut World, path: &str) -> Result<(), Box<dyn Error>> {
    let reader = BufReader::new(File::open(path)?);
    let mut decoder = ControlDecoder::new();
    let mut clock = FrameClock::new();

    for (number, line) in reader.lines().enumerate() {
        let frame_start = Instant::now();
        let dt = clock.tick_at(frame_start);

        let line = line?;
        if let Err(err) = decoder.apply_line(&line) {
            log::warn!("Skipping line {}: {err}", number + 1);
        }
        let input = decoder.snapshot();
        let phase = step(world, &input, dt);
        log_events(world);
        if phase.is_over() {
            break;
        }

        std::thread::sleep(clock.remaining_budget(frame_start, Instant::now()));
    }
    log::debug!("Replay finished at {} fps", clock.fps());
    Ok(())
}

fn autoplay(world: &mut World) {
    let frames = (DEMO_SECONDS / TARGET_FRAME_DT) as u32;
    for _ in 0..frames {
        let mut input = TickInput::default();
        for id in PlayerId::ALL {
            *input.controls_mut(id) = autopilot(world, id);
        }
        let phase = step(world, &input, TARGET_FRAME_DT);
        log_events(world);
        if phase.is_over() {
            break;
        }
    }
}

/// Turn toward the closest obstacle or the opponent, whichever is nearer, and keep firing
fn autopilot(world: &World, id: PlayerId) -> PlayerControls {
    let ship = world.ship(id);
    let opponent = world.ship(id.opponent());

    let mut target = (!opponent.is_eliminated()).then_some(opponent.pos);
    for obstacle in &world.obstacles {
        let closer = target.is_none_or(|t| {
            ship.pos.distance_squared(obstacle.pos) < ship.pos.distance_squared(t)
        });
        if closer {
            target = Some(obstacle.pos);
        }
    }

    let Some(target) = target else {
        return PlayerControls::default();
    };
    let to_target = target - ship.pos;
    let bearing = to_target.y.atan2(to_target.x).to_degrees();
    let mut delta = (bearing - ship.heading).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }

    PlayerControls {
        turn: if delta.abs() < AIM_TOLERANCE {
            0
        } else {
            delta.signum() as i32
        },
        accelerate: false,
        fire: delta.abs() < AIM_TOLERANCE * 4.0,
    }
}

fn log_events(world: &World) {
    for event in &world.events {
        match event {
            GameEvent::ShipHit { player, lives_left } => {
                log::info!("Player {} hit, {} lives left", player.number(), lives_left)
            }
            GameEvent::ShipEliminated { player } => {
                log::info!("Player {} eliminated", player.number())
            }
            other => log::trace!("{other:?}"),
        }
    }
}
