//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Variable `dt`, everything expressed per second
//! - Seeded RNG only
//! - Stable iteration order (ships by player, entities by insertion)
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, point_in_circle};
pub use obstacle::Obstacle;
pub use spawner::{repopulate, spawn_obstacle, wave_size};
pub use state::{GameEvent, MatchOutcome, MatchPhase, PlayerId, Projectile, Ship, World};
pub use tick::{PlayerControls, TickInput, step};
