//! Line geometry for vector-style drawing
//!
//! Every function returns a line list: consecutive vertex pairs are segments.

use glam::Vec2;

use super::vertex::Vertex;
use super::{ObstacleView, ProjectileView, ShipView};
use crate::heading_vector;
use crate::sim::PlayerId;

/// Distance from ship center to each hull vertex
pub const SHIP_HULL_RADIUS: f32 = 15.0;
/// Angle of the two rear hull vertices away from the nose
pub const SHIP_REAR_ANGLE: f32 = 140.0;
/// Half the side of the square drawn for a projectile
pub const PROJECTILE_HALF_SIZE: f32 = 2.0;
/// Lives pips: distance from the side edge, first row, row pitch, half size
pub const LIVES_EDGE_INSET: f32 = 30.0;
pub const LIVES_TOP: f32 = 40.0;
pub const LIVES_PITCH: f32 = 20.0;
pub const LIVES_PIP_HALF_SIZE: f32 = 5.0;

/// Append a closed polygon as line segments
fn push_loop(vertices: &mut Vec<Vertex>, points: &[Vec2], color: [f32; 4]) {
    if points.len() < 2 {
        return;
    }
    for (i, p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }
}

/// Axis-aligned square outline around `center`
fn push_square(vertices: &mut Vec<Vertex>, center: Vec2, half: f32, color: [f32; 4]) {
    let corners = [
        center + Vec2::new(-half, -half),
        center + Vec2::new(half, -half),
        center + Vec2::new(half, half),
        center + Vec2::new(-half, half),
    ];
    push_loop(vertices, &corners, color);
}

/// Triangle hull points: nose first, then the two rear corners
pub fn ship_hull(pos: Vec2, heading: f32) -> [Vec2; 3] {
    [
        pos + heading_vector(heading) * SHIP_HULL_RADIUS,
        pos + heading_vector(heading + SHIP_REAR_ANGLE) * SHIP_HULL_RADIUS,
        pos + heading_vector(heading - SHIP_REAR_ANGLE) * SHIP_HULL_RADIUS,
    ]
}

/// Ship outline; hidden ships produce nothing
pub fn ship_lines(ship: &ShipView) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    if ship.visible {
        push_loop(&mut vertices, &ship_hull(ship.pos, ship.heading), ship.color);
    }
    vertices
}

pub fn obstacle_lines(obstacle: &ObstacleView, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(obstacle.outline.len() * 2);
    push_loop(&mut vertices, &obstacle.outline, color);
    vertices
}

pub fn projectile_lines(projectiles: &[ProjectileView], color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(projectiles.len() * 8);
    for projectile in projectiles {
        push_square(&mut vertices, projectile.pos, PROJECTILE_HALF_SIZE, color);
    }
    vertices
}

/// Remaining lives as pips down the player's side of the screen
pub fn lives_pips(ship: &ShipView, screen: Vec2) -> Vec<Vertex> {
    let x = match ship.id {
        PlayerId::One => LIVES_EDGE_INSET,
        PlayerId::Two => screen.x - LIVES_EDGE_INSET,
    };
    let mut vertices = Vec::new();
    for i in 0..ship.lives {
        let center = Vec2::new(x, LIVES_TOP + f32::from(i) * LIVES_PITCH);
        push_square(&mut vertices, center, LIVES_PIP_HALF_SIZE, ship.color);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::colors;

    fn ship_view(id: PlayerId, visible: bool, lives: u8) -> ShipView {
        ShipView {
            id,
            pos: Vec2::new(100.0, 100.0),
            heading: 0.0,
            color: colors::PLAYER_ONE,
            lives,
            visible,
        }
    }

    #[test]
    fn test_ship_hull_nose_leads() {
        let hull = ship_hull(Vec2::new(100.0, 100.0), 0.0);
        assert!((hull[0] - Vec2::new(115.0, 100.0)).length() < 1e-4);
        // Rear corners mirror across the heading axis
        assert!((hull[1].x - hull[2].x).abs() < 1e-4);
        assert!((hull[1].y - 100.0 + (hull[2].y - 100.0)).abs() < 1e-4);
    }

    #[test]
    fn test_ship_lines_respect_visibility() {
        assert_eq!(ship_lines(&ship_view(PlayerId::One, true, 3)).len(), 6);
        assert!(ship_lines(&ship_view(PlayerId::One, false, 3)).is_empty());
    }

    #[test]
    fn test_obstacle_loop_is_closed() {
        let view = ObstacleView {
            pos: Vec2::ZERO,
            rotation: 0.0,
            size: 1,
            outline: vec![Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(-1.0, 0.0)],
        };
        let lines = obstacle_lines(&view, colors::OBSTACLE);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5].position, [1.0, 0.0]);
    }

    #[test]
    fn test_lives_pips_side() {
        let screen = Vec2::new(1280.0, 720.0);
        let left = lives_pips(&ship_view(PlayerId::One, true, 2), screen);
        let right = lives_pips(&ship_view(PlayerId::Two, true, 5), screen);
        assert_eq!(left.len(), 16);
        assert_eq!(right.len(), 40);
        assert!(left.iter().all(|v| v.position[0] < 40.0));
        assert!(right.iter().all(|v| v.position[0] > 1240.0));
    }
}
