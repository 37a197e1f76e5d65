//! Neon color palette shared by the spawner and the renderer

use serde::{Deserialize, Serialize};

/// The six pink neon tones obstacles and platforms are painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeonColor {
    HotPink,
    DeepPink,
    Blush,
    Bubblegum,
    Candy,
    Raspberry,
}

impl NeonColor {
    pub const ALL: [NeonColor; 6] = [
        NeonColor::HotPink,
        NeonColor::DeepPink,
        NeonColor::Blush,
        NeonColor::Bubblegum,
        NeonColor::Candy,
        NeonColor::Raspberry,
    ];

    /// Linear RGBA with the given alpha
    pub fn rgba(&self, alpha: f32) -> [f32; 4] {
        let [r, g, b] = match self {
            NeonColor::HotPink => [0xff, 0x69, 0xb4],
            NeonColor::DeepPink => [0xff, 0x14, 0x93],
            NeonColor::Blush => [0xff, 0xb6, 0xd5],
            NeonColor::Bubblegum => [0xff, 0x4f, 0xa3],
            NeonColor::Candy => [0xff, 0x85, 0xc2],
            NeonColor::Raspberry => [0xb8, 0x32, 0x6a],
        };
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), alpha]
    }

    /// Palette entry for a cycling index (ground stripes)
    pub fn cycle(index: usize) -> NeonColor {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// Fixed colors outside the obstacle palette
pub mod fixed {
    /// Player eyes
    pub const EYES: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
    /// Outline drawn around every neon shape
    pub const OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Ground band
    pub const GROUND: [f32; 4] = [0.010, 0.0, 0.102, 1.0];
    /// Ground glow
    pub const GROUND_GLOW: [f32; 4] = [0.0, 1.0, 0.930, 0.25];
    /// Clear color behind the scene
    pub const BACKGROUND: [f32; 4] = [0.006, 0.0, 0.040, 1.0];
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
