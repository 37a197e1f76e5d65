//! Game state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`; nothing is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::palette::NeonColor;

/// Viewport dimensions reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Ground line (fixed offset from the bottom edge)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_OFFSET
    }

    /// Surface that the player and obstacles rest on
    #[inline]
    pub fn surface_y(&self) -> f32 {
        self.ground_y() + SURFACE_DROP
    }

    /// X coordinate where new entities appear
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.width + SPAWN_MARGIN
    }
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    /// Rotation in radians, only non-zero while spinning
    pub angle: f32,
    /// Jumps used since the last landing (0..=MAX_JUMPS)
    pub jumps: u8,
    pub spinning: bool,
    pub jumping: bool,
}

impl Player {
    /// Player at its starting spot: one ground line above the bottom, resting
    /// a short drop above the walking surface.
    pub fn spawn(viewport: &Viewport) -> Self {
        Self {
            x: PLAYER_X,
            y: viewport.ground_y() - PLAYER_SIZE,
            w: PLAYER_SIZE,
            h: PLAYER_SIZE,
            vy: 0.0,
            angle: 0.0,
            jumps: 0,
            spinning: false,
            jumping: false,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.jumps > 0
    }

    /// Try to jump; returns false when the double-jump budget is spent
    pub fn jump(&mut self) -> bool {
        if self.jumps >= MAX_JUMPS {
            return false;
        }
        self.vy = -JUMP_POWER;
        self.jumping = true;
        self.spinning = true;
        self.jumps += 1;
        true
    }

    /// Come to rest with the bottom edge at `top`
    pub fn land_on(&mut self, top: f32) {
        self.y = top - self.h;
        self.vy = 0.0;
        self.jumping = false;
        self.jumps = 0;
    }

    /// Star pickup: launch upward and hand back one jump
    pub fn boost(&mut self) {
        self.vy = -STAR_BOOST;
        self.jumping = true;
        self.spinning = true;
        self.jumps = 1;
    }
}

/// Obstacle shapes, each with its own hit test and effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleShape {
    Rect,
    Triangle,
    Circle,
    Star,
    Diamond,
    Octagon,
}

impl ObstacleShape {
    pub const ALL: [ObstacleShape; 6] = [
        ObstacleShape::Rect,
        ObstacleShape::Triangle,
        ObstacleShape::Circle,
        ObstacleShape::Star,
        ObstacleShape::Diamond,
        ObstacleShape::Octagon,
    ];

    /// Relative spawn weight (sums to 100)
    pub fn spawn_weight(&self) -> u32 {
        match self {
            ObstacleShape::Rect => 15,
            ObstacleShape::Triangle => 15,
            ObstacleShape::Circle => 20,
            ObstacleShape::Star => 20,
            ObstacleShape::Diamond => 15,
            ObstacleShape::Octagon => 15,
        }
    }

    /// Shapes that end the run on contact
    pub fn is_lethal(&self) -> bool {
        !matches!(self, ObstacleShape::Star | ObstacleShape::Octagon)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleShape::Rect => "rect",
            ObstacleShape::Triangle => "triangle",
            ObstacleShape::Circle => "circle",
            ObstacleShape::Star => "star",
            ObstacleShape::Diamond => "diamond",
            ObstacleShape::Octagon => "octagon",
        }
    }
}

/// A ground obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: NeonColor,
    pub shape: ObstacleShape,
}

impl Obstacle {
    /// Center used by the round hit test.
    ///
    /// Stars are drawn as a circle of radius `w / 2` from the top-left corner,
    /// so their center is measured with the width on both axes.
    pub fn center(&self) -> Vec2 {
        let half_h = match self.shape {
            ObstacleShape::Star => self.w / 2.0,
            _ => self.h / 2.0,
        };
        Vec2::new(self.x + self.w / 2.0, self.y + half_h)
    }

    /// Park the obstacle off-stage so it no longer collides or renders
    pub fn neutralize(&mut self) {
        self.x = NEUTRALIZED_X;
    }

    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.x + self.w <= 0.0
    }

    /// Put the obstacle back on the walking surface
    pub fn seat_on(&mut self, surface_y: f32) {
        self.y = surface_y - self.h;
    }
}

/// A platform the player can land on from above
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingBlock {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: NeonColor,
}

impl FloatingBlock {
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.x + self.w <= 0.0
    }
}

/// Timed invulnerability that also turns the scene upside down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlipStatus {
    pub active: bool,
    pub ticks_left: u32,
}

impl FlipStatus {
    pub fn start(&mut self, ticks: u32) {
        self.active = true;
        self.ticks_left = ticks;
    }

    /// Count down one tick; returns true when the flip just ended
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.ticks_left = self.ticks_left.saturating_sub(1);
        if self.ticks_left == 0 {
            self.active = false;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Something noteworthy that happened during a tick.
///
/// Events are for logging and presentation; the simulation never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped { jumps: u8 },
    Landed,
    StarBoost,
    FlipStarted,
    FlipEnded,
    Crashed { shape: ObstacleShape, score: u64 },
    Restarted,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub viewport: Viewport,
    pub player: Player,
    /// Active obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Active floating platforms, oldest first
    pub floating_blocks: Vec<FloatingBlock>,
    pub score: u64,
    pub game_over: bool,
    pub flip: FlipStatus,
    /// Simulation tick counter (only advances while running)
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new game state with the given seed and the default viewport
    pub fn new(seed: u64) -> Self {
        Self::with_viewport(seed, Viewport::default())
    }

    pub fn with_viewport(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            player: Player::spawn(&viewport),
            obstacles: Vec::new(),
            floating_blocks: Vec::new(),
            score: 0,
            game_over: false,
            flip: FlipStatus::default(),
            time_ticks: 0,
        }
    }

    #[inline]
    pub fn is_flipped(&self) -> bool {
        self.flip.active
    }

    /// Start a fresh run in the same viewport. The RNG keeps its stream.
    ///
    /// Restart also drops an active flip. Earlier builds of the game carried
    /// it over into the new run; a run should never start inverted or
    /// invulnerable.
    pub fn reset(&mut self) {
        self.player = Player::spawn(&self.viewport);
        self.obstacles.clear();
        self.floating_blocks.clear();
        self.score = 0;
        self.game_over = false;
        self.flip.clear();
    }

    /// Adapt to a new viewport size without leaving anything below ground
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        let surface = self.viewport.surface_y();

        if self.player.bottom() > surface {
            self.player.y = surface - self.player.h;
            self.player.vy = 0.0;
            self.player.jumping = false;
            self.player.angle = 0.0;
            self.player.spinning = false;
        }

        for obstacle in &mut self.obstacles {
            obstacle.seat_on(surface);
        }

        let ground = self.viewport.ground_y();
        for block in &mut self.floating_blocks {
            block.y = ground - PLATFORM_LIFT - self.rng.random::<f32>() * PLATFORM_LIFT_SPREAD;
        }

        log::debug!("Viewport resized to {}x{}", width, height);
    }
}
