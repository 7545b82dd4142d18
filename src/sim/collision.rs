//! Collision tests between bullets, enemies and the player
//!
//! Both tests use the enemy square's center as its reference point where a
//! single point is needed, matching the point enemies steer from.

use glam::Vec2;

use super::geometry::Square;
use super::state::Enemy;

/// Point-in-square hit test for a bullet
#[inline]
pub fn bullet_hits(bullet_pos: Vec2, square: &Square) -> bool {
    square.contains(bullet_pos)
}

/// Index of the first enemy (in spawn order) the bullet is inside
pub fn first_hit(bullet_pos: Vec2, enemies: &[Enemy]) -> Option<usize> {
    enemies
        .iter()
        .position(|enemy| bullet_hits(bullet_pos, &enemy.square))
}

/// An enemy touches the player when its center is closer than the player's radius
pub fn touches_player(square: &Square, player_pos: Vec2, player_radius: f32) -> bool {
    square.center().distance(player_pos) < player_radius
}
