//! Scene assembly
//!
//! Reads a post-tick `GameState` and produces one triangle list in screen
//! pixels. Nothing here feeds back into the simulation.

use glam::Vec2;
use std::f32::consts::PI;

use super::shapes::{self, neon, quad};
use super::vertex::Vertex;
use crate::consts::SURFACE_DROP;
use crate::palette::{NeonColor, fixed};
use crate::rotate_about;
use crate::settings::Settings;
use crate::sim::{FloatingBlock, GameState, Obstacle, ObstacleShape, Player};

/// Ground band height below the walking surface
const GROUND_BAND_HEIGHT: f32 = 40.0;
/// Neon dashes along the surface
const STRIPE_PITCH: usize = 80;
const STRIPE_LENGTH: f32 = 60.0;
const STRIPE_THICKNESS: f32 = 2.0;
/// Eye placement in player-local pixels
const EYE_OFFSETS: [(f32, f32); 2] = [(20.0, 28.0), (52.0, 28.0)];
const EYE_RADIUS: f32 = 6.0;
const EYE_SEGMENTS: u32 = 12;

/// Build every vertex for the current frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);

    ground(state, &mut vertices);
    for block in &state.floating_blocks {
        floating_block(block, settings.glow, &mut vertices);
    }
    player(&state.player, settings.glow, &mut vertices);
    for obstacle in &state.obstacles {
        if obstacle.is_offscreen() {
            continue;
        }
        vertices.extend(neon(
            &obstacle_outline(obstacle),
            obstacle.color.rgba(1.0),
            settings.glow,
        ));
    }

    if settings.effective_flip_rotation(state.is_flipped()) {
        let pivot = Vec2::new(state.viewport.width / 2.0, state.viewport.height / 2.0);
        for v in &mut vertices {
            let p = rotate_about(v.pos(), pivot, PI);
            v.position = p.to_array();
        }
    }

    vertices
}

/// Outline for an obstacle, matching how each shape is drawn on screen
pub fn obstacle_outline(obstacle: &Obstacle) -> Vec<Vec2> {
    let Obstacle { x, y, w, h, .. } = *obstacle;
    match obstacle.shape {
        ObstacleShape::Rect => shapes::rect_points(x, y, w, h),
        ObstacleShape::Triangle => shapes::triangle_points(x, y, w, h),
        ObstacleShape::Circle => shapes::circle_points(x, y, w / 2.0),
        ObstacleShape::Star => shapes::star_points(x, y, w / 2.0),
        ObstacleShape::Diamond => shapes::diamond_points(x, y, w, h),
        ObstacleShape::Octagon => shapes::octagon_points(x, y, w),
    }
}

fn ground(state: &GameState, out: &mut Vec<Vertex>) {
    let width = state.viewport.width;
    let top = state.viewport.ground_y() + SURFACE_DROP;

    let band = shapes::rect_points(0.0, top, width, GROUND_BAND_HEIGHT);
    out.extend(shapes::glow(&band, fixed::GROUND_GLOW));
    out.extend(quad(0.0, top, width, GROUND_BAND_HEIGHT, fixed::GROUND));

    let mut x = 0;
    while (x as f32) < width {
        let color = NeonColor::cycle(x).rgba(1.0);
        out.extend(quad(
            x as f32,
            top - STRIPE_THICKNESS / 2.0,
            STRIPE_LENGTH,
            STRIPE_THICKNESS,
            color,
        ));
        x += STRIPE_PITCH;
    }
}

fn floating_block(block: &FloatingBlock, with_glow: bool, out: &mut Vec<Vertex>) {
    let outline = shapes::rect_points(block.x, block.y, block.w, block.h);
    out.extend(neon(&outline, block.color.rgba(1.0), with_glow));
}

/// Player body and eyes, rotated about the body center
fn player(player: &Player, with_glow: bool, out: &mut Vec<Vertex>) {
    let pivot = player.center();
    let spin = |p: Vec2| rotate_about(p, pivot, player.angle);

    let body: Vec<Vec2> = shapes::rect_points(player.x, player.y, player.w, player.h)
        .into_iter()
        .map(spin)
        .collect();
    out.extend(neon(&body, NeonColor::HotPink.rgba(1.0), with_glow));

    for (ex, ey) in EYE_OFFSETS {
        let center = spin(Vec2::new(player.x + ex, player.y + ey));
        let eye = shapes::regular_polygon(center, EYE_RADIUS, EYE_SEGMENTS, 0.0);
        out.extend(shapes::fill(&eye, fixed::EYES));
    }
}
