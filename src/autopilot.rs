//! Demo autopilot
//!
//! Plays the runner for the headless native loop. It only
//! produces `TickInput`s, so the simulation cannot tell it from a keyboard.

use crate::consts::{MAX_JUMPS, SCROLL_SPEED};
use crate::sim::{GameState, Obstacle, TickInput};

/// Jump when a lethal obstacle is this many ticks away
const LEAD_TICKS: f32 = 6.0;

/// Pick this tick's input
pub fn autopilot_input(state: &GameState) -> TickInput {
    if state.game_over {
        return TickInput {
            restart: true,
            ..Default::default()
        };
    }

    let Some(threat) = nearest_threat(state) else {
        return TickInput::default();
    };

    let player = &state.player;
    let gap = threat.x - (player.x + player.w);
    let lead = LEAD_TICKS * SCROLL_SPEED;
    let grounded = player.jumps == 0 && player.vy == 0.0;

    // Second jump only once falling and still short of clearing the top
    let falling_into_it =
        player.jumps > 0 && player.jumps < MAX_JUMPS && player.vy > 0.0 && player.bottom() > threat.y;

    TickInput {
        jump: gap <= lead && (grounded || falling_into_it),
        ..Default::default()
    }
}

/// Closest lethal obstacle that has not passed the player yet. Lethal shapes
/// are ignored while flipped.
fn nearest_threat(state: &GameState) -> Option<&Obstacle> {
    if state.is_flipped() {
        return None;
    }
    state
        .obstacles
        .iter()
        .filter(|o| o.shape.is_lethal() && o.x + o.w > state.player.x)
        .min_by(|a, b| a.x.total_cmp(&b.x))
}
