//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (physics constants are per tick)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionOutcome, lands_on_platform, obstacle_hit, resolve_obstacle};
pub use spawn::{maybe_spawn, spawn_floating_block, spawn_obstacle};
pub use state::{
    FlipStatus, FloatingBlock, GameEvent, GameState, Obstacle, ObstacleShape, Player, Viewport,
};
pub use tick::{TickInput, apply_input, tick};
