//! Collision detection for the runner
//!
//! Two primitive tests cover every shape: axis-aligned box overlap for the
//! angular shapes and a shrunken center-distance test for the round ones.
//! `resolve_obstacle` layers the per-shape effects on top.

use glam::Vec2;

use super::state::{FloatingBlock, Obstacle, ObstacleShape, Player};
use crate::consts::{PLATFORM_LANDING_BAND, ROUND_HIT_SHRINK};
use crate::within_distance;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    /// Strict overlap; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

impl From<&Player> for Aabb {
    fn from(p: &Player) -> Self {
        Aabb::from_xywh(p.x, p.y, p.w, p.h)
    }
}

impl From<&Obstacle> for Aabb {
    fn from(o: &Obstacle) -> Self {
        Aabb::from_xywh(o.x, o.y, o.w, o.h)
    }
}

/// Round shapes hit when the centers are closer than the summed half-widths
/// minus a fixed shrink, so grazing contact is forgiven.
#[inline]
pub fn round_overlap(player: &Player, obstacle: &Obstacle) -> bool {
    let threshold = obstacle.w / 2.0 + player.w / 2.0 - ROUND_HIT_SHRINK;
    within_distance(obstacle.center(), player.center(), threshold)
}

/// Shape-specific overlap test between the player and one obstacle
pub fn obstacle_hit(player: &Player, obstacle: &Obstacle) -> bool {
    match obstacle.shape {
        ObstacleShape::Rect | ObstacleShape::Triangle | ObstacleShape::Diamond => {
            Aabb::from(player).overlaps(&Aabb::from(obstacle))
        }
        ObstacleShape::Circle | ObstacleShape::Star | ObstacleShape::Octagon => {
            round_overlap(player, obstacle)
        }
    }
}

/// What touching an obstacle does to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// No contact, or contact that has no effect right now
    Miss,
    /// Ends the run
    Lethal,
    /// Upward boost plus one jump back
    StarBoost,
    /// Starts the flip window
    Flip,
}

/// Classify contact with one obstacle. Does not mutate anything.
///
/// Octagons are not even tested while flipped, and lethal contact is
/// forgiven for the whole flip window. Stars work either way.
pub fn resolve_obstacle(player: &Player, obstacle: &Obstacle, flipped: bool) -> CollisionOutcome {
    match obstacle.shape {
        ObstacleShape::Star => {
            if round_overlap(player, obstacle) {
                CollisionOutcome::StarBoost
            } else {
                CollisionOutcome::Miss
            }
        }
        ObstacleShape::Octagon => {
            if !flipped && round_overlap(player, obstacle) {
                CollisionOutcome::Flip
            } else {
                CollisionOutcome::Miss
            }
        }
        _ => {
            if !flipped && obstacle_hit(player, obstacle) {
                CollisionOutcome::Lethal
            } else {
                CollisionOutcome::Miss
            }
        }
    }
}

/// Whether the player should settle onto a platform this tick.
///
/// The player must overlap the platform horizontally, must not be rising,
/// must have its bottom edge past the platform top, and one tick ago that
/// edge must have been no more than the landing band below the top.
pub fn lands_on_platform(player: &Player, block: &FloatingBlock) -> bool {
    let bottom = player.bottom();
    player.x + player.w > block.x
        && player.x < block.x + block.w
        && bottom > block.y
        && bottom - player.vy <= block.y + PLATFORM_LANDING_BAND
        && player.vy >= 0.0
}
