//! Neon Runner - A single-screen neon endless runner
//!
//! Core modules:
//! - `autopilot`: Demo player used by the headless native run
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `driver`: Fixed timestep driver that feeds ticks from host frame deltas
//! - `input`: Key mapping to edge-triggered commands
//! - `renderer`: Neon scene geometry and WebGPU pipeline
//! - `settings`: Host-side settings loaded from JSON
//! - `palette`: The neon color palette

pub mod autopilot;
pub mod driver;
pub mod input;
pub mod palette;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::FixedStepDriver;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
///
/// Physics values are per tick and tuned against `SIM_HZ`.
pub mod consts {
    /// Fixed simulation rate
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest host frame delta the driver will accept (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Viewport used before the host reports a real size
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;

    /// Ground line sits this far above the bottom of the viewport
    pub const GROUND_OFFSET: f32 = 100.0;
    /// Walking surface sits this far below the ground line
    pub const SURFACE_DROP: f32 = 36.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_SIZE: f32 = 72.0;
    /// Maximum jumps before landing (double jump)
    pub const MAX_JUMPS: u8 = 2;

    /// Downward acceleration (px/tick²)
    pub const GRAVITY: f32 = 0.7;
    /// Upward velocity set by a jump (px/tick)
    pub const JUMP_POWER: f32 = 16.0;
    /// Upward velocity set by a star pickup (px/tick)
    pub const STAR_BOOST: f32 = 32.0;
    /// Horizontal scroll speed of the world (px/tick)
    pub const SCROLL_SPEED: f32 = 8.0;
    /// Rotation added per airborne tick (radians)
    pub const SPIN_RATE: f32 = 0.25;

    /// Tolerance below a platform top that still counts as landing on it
    pub const PLATFORM_LANDING_BAND: f32 = 8.0;
    /// Shrink applied to the round-shape distance test
    pub const ROUND_HIT_SHRINK: f32 = 8.0;

    /// Flip status duration (3 seconds at 60 Hz)
    pub const FLIP_DURATION_TICKS: u32 = 180;

    /// Where consumed obstacles are parked until the next prune
    pub const NEUTRALIZED_X: f32 = -9999.0;
    /// Entities spawn this far past the right edge
    pub const SPAWN_MARGIN: f32 = 10.0;

    /// Obstacle size ranges (inclusive lower, exclusive upper)
    pub const OBSTACLE_MIN_HEIGHT: u32 = 36;
    pub const OBSTACLE_HEIGHT_SPREAD: u32 = 40;
    pub const OBSTACLE_MIN_WIDTH: u32 = 24;
    pub const OBSTACLE_WIDTH_SPREAD: u32 = 32;
    /// Spawn once the newest obstacle passes `width / OBSTACLE_SPAWN_DIVISOR`
    pub const OBSTACLE_SPAWN_DIVISOR: f32 = 2.0;
    pub const OBSTACLE_SPAWN_CHANCE: f32 = 0.9;

    /// Floating platform dimensions
    pub const PLATFORM_MIN_WIDTH: f32 = 80.0;
    pub const PLATFORM_WIDTH_SPREAD: f32 = 60.0;
    pub const PLATFORM_HEIGHT: f32 = 24.0;
    /// Platform tops sit between `ground - LIFT - SPREAD` and `ground - LIFT`
    pub const PLATFORM_LIFT: f32 = 80.0;
    pub const PLATFORM_LIFT_SPREAD: f32 = 80.0;
    pub const PLATFORM_SPAWN_DIVISOR: f32 = 2.5;
    pub const PLATFORM_SPAWN_CHANCE: f32 = 0.7;
}

/// Euclidean distance between two centers compared against a threshold
#[inline]
pub fn within_distance(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// Rotate a point around a pivot
#[inline]
pub fn rotate_about(point: Vec2, pivot: Vec2, angle: f32) -> Vec2 {
    pivot + Vec2::from_angle(angle).rotate(point - pivot)
}
