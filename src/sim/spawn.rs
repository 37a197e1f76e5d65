//! Obstacle and platform spawning
//!
//! Entities enter just past the right edge. A new one is considered only once
//! the newest of its kind has scrolled far enough left, and then only with a
//! fixed probability, so gaps vary from run to run.

use rand::Rng;

use super::state::{FloatingBlock, GameState, Obstacle, ObstacleShape, Viewport};
use crate::consts::*;
use crate::palette::NeonColor;

/// Pick a shape by weighted roll over `ObstacleShape::spawn_weight`
pub fn pick_shape<R: Rng + ?Sized>(rng: &mut R) -> ObstacleShape {
    let total: u32 = ObstacleShape::ALL.iter().map(|s| s.spawn_weight()).sum();
    let mut roll = rng.random_range(0..total);
    for shape in ObstacleShape::ALL {
        let weight = shape.spawn_weight();
        if roll < weight {
            return shape;
        }
        roll -= weight;
    }
    ObstacleShape::Octagon
}

pub fn pick_color<R: Rng + ?Sized>(rng: &mut R) -> NeonColor {
    NeonColor::ALL[rng.random_range(0..NeonColor::ALL.len())]
}

/// New obstacle resting on the walking surface
pub fn spawn_obstacle<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> Obstacle {
    let h = (OBSTACLE_MIN_HEIGHT + rng.random_range(0..OBSTACLE_HEIGHT_SPREAD)) as f32;
    let w = (OBSTACLE_MIN_WIDTH + rng.random_range(0..OBSTACLE_WIDTH_SPREAD)) as f32;
    let color = pick_color(rng);
    let shape = pick_shape(rng);
    Obstacle {
        x: viewport.spawn_x(),
        y: viewport.surface_y() - h,
        w,
        h,
        color,
        shape,
    }
}

/// New platform floating within jump reach above the ground line
pub fn spawn_floating_block<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> FloatingBlock {
    let w = PLATFORM_MIN_WIDTH + rng.random::<f32>() * PLATFORM_WIDTH_SPREAD;
    let y = viewport.ground_y() - PLATFORM_LIFT - rng.random::<f32>() * PLATFORM_LIFT_SPREAD;
    let color = pick_color(rng);
    FloatingBlock {
        x: viewport.spawn_x(),
        y,
        w,
        h: PLATFORM_HEIGHT,
        color,
    }
}

/// Whether the cadence allows another entity: either none is alive, or the
/// newest has crossed `width / divisor`.
#[inline]
pub fn cadence_open(newest_x: Option<f32>, viewport: &Viewport, divisor: f32) -> bool {
    newest_x.is_none_or(|x| x < viewport.width / divisor)
}

/// Run the spawn policy for one tick. Obstacles and platforms roll independently.
pub fn maybe_spawn(state: &mut GameState) {
    let viewport = state.viewport;

    let newest_obstacle = state.obstacles.last().map(|o| o.x);
    if cadence_open(newest_obstacle, &viewport, OBSTACLE_SPAWN_DIVISOR)
        && state.rng.random::<f32>() < OBSTACLE_SPAWN_CHANCE
    {
        let obstacle = spawn_obstacle(&mut state.rng, &viewport);
        state.obstacles.push(obstacle);
    }

    let newest_block = state.floating_blocks.last().map(|b| b.x);
    if cadence_open(newest_block, &viewport, PLATFORM_SPAWN_DIVISOR)
        && state.rng.random::<f32>() < PLATFORM_SPAWN_CHANCE
    {
        let block = spawn_floating_block(&mut state.rng, &viewport);
        state.floating_blocks.push(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    #[test]
    fn test_obstacle_rests_on_surface() {
        let mut rng = Pcg32::seed_from_u64(1);
        let viewport = Viewport::new(1000.0, 700.0);
        for _ in 0..200 {
            let ob = spawn_obstacle(&mut rng, &viewport);
            assert_eq!(ob.y + ob.h, viewport.surface_y());
            assert_eq!(ob.x, 1010.0);
            assert!((36.0..76.0).contains(&ob.h));
            assert!((24.0..56.0).contains(&ob.w));
            assert_eq!(ob.h.fract(), 0.0);
        }
    }

    #[test]
    fn test_platform_band() {
        let mut rng = Pcg32::seed_from_u64(2);
        let viewport = Viewport::new(1000.0, 700.0);
        let ground = viewport.ground_y();
        for _ in 0..200 {
            let block = spawn_floating_block(&mut rng, &viewport);
            assert!(block.y <= ground - 80.0 && block.y > ground - 160.0);
            assert!(block.w >= 80.0 && block.w < 140.0);
            assert_eq!(block.h, 24.0);
        }
    }

    #[test]
    fn test_shape_weights_roughly_hold() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut counts: HashMap<ObstacleShape, u32> = HashMap::new();
        let draws = 20_000;
        for _ in 0..draws {
            *counts.entry(pick_shape(&mut rng)).or_default() += 1;
        }
        for shape in ObstacleShape::ALL {
            let share = counts[&shape] as f32 / draws as f32 * 100.0;
            let expected = shape.spawn_weight() as f32;
            assert!(
                (share - expected).abs() < 2.0,
                "{:?}: {:.1}% vs {}%",
                shape,
                share,
                expected
            );
        }
    }

    #[test]
    fn test_cadence() {
        let viewport = Viewport::new(1000.0, 700.0);
        assert!(cadence_open(None, &viewport, 2.0));
        assert!(!cadence_open(Some(600.0), &viewport, 2.0));
        assert!(cadence_open(Some(499.0), &viewport, 2.0));
        assert!(!cadence_open(Some(450.0), &viewport, 2.5));
        assert!(cadence_open(Some(399.0), &viewport, 2.5));
    }

    #[test]
    fn test_maybe_spawn_waits_for_cadence() {
        let mut state = GameState::with_viewport(4, Viewport::new(1000.0, 700.0));
        // Retry until both rolls succeed on an empty world
        for _ in 0..50 {
            maybe_spawn(&mut state);
        }
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.floating_blocks.len(), 1);
    }
}
