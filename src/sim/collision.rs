//! Overlap queries
//!
//! Everything collides as a circle. Comparisons are done on squared
//! distances throughout so no query mixes squared and plain lengths.

use glam::Vec2;

use super::obstacle::Obstacle;
use super::state::{Projectile, Ship};

/// Point strictly inside a circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}

/// Two circles strictly overlapping
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Projectile center inside the obstacle's nominal radius
#[inline]
pub fn projectile_hits_obstacle(projectile: &Projectile, obstacle: &Obstacle) -> bool {
    point_in_circle(projectile.pos, obstacle.pos, obstacle.radius)
}

/// Obstacle and ship bodies touching
#[inline]
pub fn obstacle_hits_ship(obstacle: &Obstacle, ship: &Ship) -> bool {
    circles_overlap(obstacle.pos, obstacle.radius, ship.pos, ship.radius)
}

/// Projectile center inside the ship's radius
#[inline]
pub fn projectile_hits_ship(projectile: &Projectile, ship: &Ship) -> bool {
    point_in_circle(projectile.pos, ship.pos, ship.radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlayerId;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_point_in_circle_is_strict() {
        assert!(point_in_circle(Vec2::new(9.9, 0.0), Vec2::ZERO, 10.0));
        assert!(!point_in_circle(Vec2::new(10.0, 0.0), Vec2::ZERO, 10.0));
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(0.0, 29.0), 20.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(0.0, 30.0), 20.0));
    }

    #[test]
    fn test_entity_queries() {
        let mut rng = Pcg32::seed_from_u64(5);
        let obstacle = Obstacle::new(Vec2::new(500.0, 500.0), 3, &mut rng);
        let ship = Ship::new(PlayerId::One, Vec2::new(535.0, 500.0));
        let near_shot = Projectile::new(PlayerId::Two, Vec2::new(520.0, 500.0), Vec2::ZERO, 0.0);
        let far_shot = Projectile::new(PlayerId::Two, Vec2::new(531.0, 500.0), Vec2::ZERO, 0.0);

        assert!(obstacle_hits_ship(&obstacle, &ship));
        assert!(projectile_hits_obstacle(&near_shot, &obstacle));
        assert!(!projectile_hits_obstacle(&far_shot, &obstacle));
        assert!(projectile_hits_ship(&far_shot, &ship));
        assert!(!projectile_hits_ship(&near_shot, &ship));
    }
}
