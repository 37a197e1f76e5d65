//! Shape generation for neon 2D primitives
//!
//! Outlines are point lists in screen pixels. `neon` turns one into a glow
//! halo, a solid fill and a white rim, all as triangle lists.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::vertex::Vertex;
use crate::palette::fixed::OUTLINE;

/// Width of the halo drawn outside each shape
pub const GLOW_SPREAD: f32 = 12.0;
/// Peak alpha of the halo at the shape edge
pub const GLOW_ALPHA: f32 = 0.45;
/// Rim thickness
pub const OUTLINE_WIDTH: f32 = 2.0;
/// Segments used for circles
pub const CIRCLE_SEGMENTS: u32 = 32;

pub fn rect_points(x: f32, y: f32, w: f32, h: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(x, y),
        Vec2::new(x + w, y),
        Vec2::new(x + w, y + h),
        Vec2::new(x, y + h),
    ]
}

/// Apex centered at the top, base along the bottom edge
pub fn triangle_points(x: f32, y: f32, w: f32, h: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(x + w / 2.0, y),
        Vec2::new(x, y + h),
        Vec2::new(x + w, y + h),
    ]
}

pub fn diamond_points(x: f32, y: f32, w: f32, h: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(x + w / 2.0, y),
        Vec2::new(x, y + h / 2.0),
        Vec2::new(x + w / 2.0, y + h),
        Vec2::new(x + w, y + h / 2.0),
    ]
}

/// Regular polygon of `sides` around `center`, first vertex at `phase`
pub fn regular_polygon(center: Vec2, radius: f32, sides: u32, phase: f32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let theta = TAU / sides as f32 * i as f32 + phase;
            center + Vec2::from_angle(theta) * radius
        })
        .collect()
}

/// Circle of radius `r` whose bounding box starts at (x, y)
pub fn circle_points(x: f32, y: f32, r: f32) -> Vec<Vec2> {
    regular_polygon(Vec2::new(x + r, y + r), r, CIRCLE_SEGMENTS, 0.0)
}

/// Octagon inscribed in a `size` square starting at (x, y), flat on top
pub fn octagon_points(x: f32, y: f32, size: f32) -> Vec<Vec2> {
    let half = size / 2.0;
    regular_polygon(Vec2::new(x + half, y + half), half, 8, -PI / 8.0)
}

/// Five-pointed star, point up, inner radius half the outer
pub fn star_points(x: f32, y: f32, r: f32) -> Vec<Vec2> {
    let center = Vec2::new(x + r, y + r);
    let mut points = Vec::with_capacity(10);
    for i in 0..5 {
        let outer = TAU / 5.0 * i as f32 - PI / 2.0;
        points.push(center + Vec2::from_angle(outer) * r);
        points.push(center + Vec2::from_angle(outer + PI / 5.0) * (r * 0.5));
    }
    points
}

/// Average of the outline points
pub fn centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    points.iter().copied().sum::<Vec2>() / points.len() as f32
}

/// Triangle fan from the centroid (fine for every star-shaped outline here)
pub fn fill(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    let center = centroid(points);
    let mut vertices = Vec::with_capacity(points.len() * 3);
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(a, color));
        vertices.push(Vertex::at(b, color));
    }
    vertices
}

/// Band between the outline and a copy pushed `spread` pixels away from the
/// centroid. Inner and outer edges get their own colors.
fn band(
    points: &[Vec2],
    inset: f32,
    spread: f32,
    inner: [f32; 4],
    outer: [f32; 4],
) -> Vec<Vertex> {
    let center = centroid(points);
    let offset = |p: Vec2, d: f32| p + (p - center).normalize_or_zero() * d;

    let mut vertices = Vec::with_capacity(points.len() * 6);
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        let a_in = offset(a, inset);
        let b_in = offset(b, inset);
        let a_out = offset(a, inset + spread);
        let b_out = offset(b, inset + spread);

        // Two triangles per edge
        vertices.push(Vertex::at(a_in, inner));
        vertices.push(Vertex::at(a_out, outer));
        vertices.push(Vertex::at(b_in, inner));

        vertices.push(Vertex::at(b_in, inner));
        vertices.push(Vertex::at(a_out, outer));
        vertices.push(Vertex::at(b_out, outer));
    }
    vertices
}

/// Soft halo fading out from the outline
pub fn glow(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    let inner = [color[0], color[1], color[2], GLOW_ALPHA];
    let outer = [color[0], color[1], color[2], 0.0];
    band(points, 0.0, GLOW_SPREAD, inner, outer)
}

/// Thin rim centered on the outline
pub fn outline(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    band(points, -OUTLINE_WIDTH / 2.0, OUTLINE_WIDTH, color, color)
}

/// Glow (optional), fill and white rim for one outline
pub fn neon(points: &[Vec2], color: [f32; 4], with_glow: bool) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    if with_glow {
        vertices.extend(glow(points, color));
    }
    vertices.extend(fill(points, color));
    vertices.extend(outline(points, OUTLINE));
    vertices
}

/// Axis-aligned solid quad (ground stripes, bands)
pub fn quad(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    fill(&rect_points(x, y, w, h), color)
}
